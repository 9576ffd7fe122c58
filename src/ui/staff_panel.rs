//! Staff enrollment panel.

use chrono::NaiveDate;
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{PENCIL, USER_PLUS};

use super::app::App;
use super::components::{action_button, colors, field_error, panel_header, primary_button};
use crate::forms::staff::{DATE_OF_BIRTH, EMAIL, FIRST_NAME, GENDER, LAST_NAME, PASSWORD, PHONE_NO};
use crate::forms::{FormMode, StaffForm, parse_flexible_date};
use crate::models::staff::Gender;

/// Date shown by the picker when the field is empty.
fn picker_default() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default()
}

/// Show the staff panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Manage Staff");

    ui.horizontal(|ui| {
        if primary_button(ui, !app.staff_form.is_open, USER_PLUS, "Add Staff").clicked() {
            app.staff_form = StaffForm::add();
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    // Form dialog
    if app.staff_form.is_open {
        show_form_dialog(app, ui.ctx());
    }
}

fn show_table(app: &mut App, ui: &mut Ui) {
    if app.staff.is_empty() {
        ui.weak("No staff saved yet. Staff you enroll or update appear here.");
        return;
    }

    ui.label(format!("{} staff saved this session", app.staff.len()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("staff_scroll").show(ui, |ui| {
        egui::Grid::new("staff_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("User ID");
                ui.strong("Name");
                ui.strong("Date of Birth");
                ui.strong("Gender");
                ui.strong("Phone");
                ui.strong("Actions");
                ui.end_row();

                for detail in &app.staff {
                    ui.label(detail.user_id.to_string());
                    ui.label(detail.full_name());
                    ui.label(detail.date_of_birth.to_string());
                    ui.label(detail.gender.name());
                    ui.label(&detail.phone_no);

                    let enabled = !app.staff_form.is_open;
                    ui.add_enabled_ui(enabled, |ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.staff_form = StaffForm::edit(detail);
                        }
                    });
                    ui.end_row();
                }
            });
    });
}

/// Single-line input with touch tracking and its validation message.
fn text_field(ui: &mut Ui, form: &mut StaffForm, field: &'static str, password: bool) {
    ui.vertical(|ui| {
        let value = match field {
            FIRST_NAME => &mut form.first_name,
            LAST_NAME => &mut form.last_name,
            PHONE_NO => &mut form.phone_no,
            EMAIL => &mut form.email,
            _ => &mut form.password,
        };
        let response = ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(250.0)
                .password(password),
        );
        if response.changed() || response.lost_focus() {
            form.touched.touch(field);
        }
        field_error(ui, form.visible_error(field));
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = format!("{} Staff", app.staff_form.mode().verb());
    let mut open = true;
    let mut submission = None;

    egui::Window::new(title)
        .id(egui::Id::new("staff_form_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .max_height(560.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let form = &mut app.staff_form;
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(460.0).show(ui, |ui| {
                egui::Grid::new("staff_form_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("First Name:");
                        text_field(ui, form, FIRST_NAME, false);
                        ui.end_row();

                        ui.label("Last Name:");
                        text_field(ui, form, LAST_NAME, false);
                        ui.end_row();

                        ui.label("Date of Birth:");
                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                let response = ui.add(
                                    egui::TextEdit::singleline(&mut form.date_of_birth)
                                        .desired_width(120.0)
                                        .hint_text("YYYY-MM-DD"),
                                );
                                if response.changed() || response.lost_focus() {
                                    form.touched.touch(DATE_OF_BIRTH);
                                }

                                let mut picked =
                                    parse_flexible_date(&form.date_of_birth).unwrap_or_else(picker_default);
                                if ui
                                    .add(egui_extras::DatePickerButton::new(&mut picked).id_salt("staff_form_dob"))
                                    .changed()
                                {
                                    form.date_of_birth = picked.format("%Y-%m-%d").to_string();
                                    form.touched.touch(DATE_OF_BIRTH);
                                }
                            });
                            field_error(ui, form.visible_error(DATE_OF_BIRTH));
                        });
                        ui.end_row();

                        ui.label("Gender:");
                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                for gender in Gender::ALL {
                                    if ui.radio_value(&mut form.gender, Some(gender), gender.name()).changed() {
                                        form.touched.touch(GENDER);
                                    }
                                }
                            });
                            field_error(ui, form.visible_error(GENDER));
                        });
                        ui.end_row();

                        ui.label("Phone Number:");
                        text_field(ui, form, PHONE_NO, false);
                        ui.end_row();

                        // Credentials belong to the user account and are only set on enrollment
                        if form.mode() == FormMode::Add {
                            ui.label("Email:");
                            text_field(ui, form, EMAIL, false);
                            ui.end_row();

                            ui.label("Password:");
                            text_field(ui, form, PASSWORD, true);
                            ui.end_row();
                        }
                    });
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
        app.staff_form.reset();
    }

    if let Some((ticket, submission)) = submission {
        app.submit_staff(ticket, submission);
    }
}
