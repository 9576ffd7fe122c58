//! Room enrollment panel.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{PENCIL, PLUS};

use super::app::App;
use super::components::{action_button, colors, field_error, panel_header, primary_button};
use crate::forms::RoomForm;
use crate::forms::room::{CAPACITY, CHARGES, DESCRIPTION, ROOM_TYPE};
use crate::models::room::RoomType;

/// Show the rooms panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Manage Rooms");

    ui.horizontal(|ui| {
        if primary_button(ui, !app.room_form.is_open, PLUS, "Add Room").clicked() {
            app.room_form = RoomForm::add();
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    // Form dialog
    if app.room_form.is_open {
        show_form_dialog(app, ui.ctx());
    }
}

fn show_table(app: &mut App, ui: &mut Ui) {
    if app.rooms.is_empty() {
        ui.weak("No rooms saved yet. Rooms you add or update appear here.");
        return;
    }

    ui.label(format!("{} rooms saved this session", app.rooms.len()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("rooms_scroll").show(ui, |ui| {
        egui::Grid::new("rooms_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("ID");
                ui.strong("Type");
                ui.strong("Description");
                ui.strong("Charges");
                ui.strong("Capacity");
                ui.strong("Actions");
                ui.end_row();

                for room in &app.rooms {
                    ui.label(room.id.to_string());
                    ui.label(room.room_type.name());
                    ui.label(&room.description);
                    ui.label(format!("{:.2}", room.charges));
                    ui.label(room.capacity.to_string());

                    let enabled = !app.room_form.is_open;
                    ui.add_enabled_ui(enabled, |ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.room_form = RoomForm::edit(room);
                        }
                    });
                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = format!("{} Room", app.room_form.mode().verb());
    let mut open = true;
    let mut submission = None;

    egui::Window::new(title)
        .id(egui::Id::new("room_form_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let form = &mut app.room_form;
            ui.add_space(10.0);

            egui::Grid::new("room_form_grid")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Room Type:");
                    ui.vertical(|ui| {
                        egui::ComboBox::from_id_salt("room_form_type")
                            .width(200.0)
                            .selected_text(form.room_type.map(|t| t.name()).unwrap_or("Select room type"))
                            .show_ui(ui, |ui| {
                                for room_type in RoomType::ALL {
                                    if ui
                                        .selectable_label(form.room_type == Some(room_type), room_type.name())
                                        .clicked()
                                    {
                                        form.room_type = Some(room_type);
                                        form.touched.touch(ROOM_TYPE);
                                    }
                                }
                            });
                        field_error(ui, form.visible_error(ROOM_TYPE));
                    });
                    ui.end_row();

                    ui.label("Description:");
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::TextEdit::multiline(&mut form.description)
                                .desired_width(250.0)
                                .desired_rows(3),
                        );
                        if response.changed() || response.lost_focus() {
                            form.touched.touch(DESCRIPTION);
                        }
                        field_error(ui, form.visible_error(DESCRIPTION));
                    });
                    ui.end_row();

                    ui.label("Charges:");
                    ui.vertical(|ui| {
                        let response =
                            ui.add(egui::TextEdit::singleline(&mut form.charges).desired_width(120.0));
                        if response.changed() || response.lost_focus() {
                            form.touched.touch(CHARGES);
                        }
                        field_error(ui, form.visible_error(CHARGES));
                    });
                    ui.end_row();

                    ui.label("Capacity:");
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut form.capacity)
                                .desired_width(120.0)
                                .hint_text("1 - 100"),
                        );
                        if response.changed() || response.lost_focus() {
                            form.touched.touch(CAPACITY);
                        }
                        field_error(ui, form.visible_error(CAPACITY));
                    });
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button(ui, form.can_submit(), "", "Submit").clicked() {
                        submission = form.begin_submit();
                    }
                    if form.is_submitting() {
                        ui.spinner();
                        ui.colored_label(colors::NEUTRAL, "Saving...");
                    }
                });
            });
        });

    if !open {
        app.room_form.reset();
    }

    if let Some((ticket, submission)) = submission {
        app.submit_room(ticket, submission);
    }
}
