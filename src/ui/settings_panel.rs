//! Settings panel for backend connection, credentials, and UI options.

use eframe::egui::{self, RichText};

use super::app::App;
use super::components::{colors, panel_header, primary_button};
use crate::config::AppConfig;

/// Editable copy of the settings; applied on save.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub base_url: String,
    pub timeout_secs: String,
    pub toast_secs: String,
    pub token: String,
    pub modified: bool,
}

impl SettingsForm {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout_secs: config.api.timeout_secs.to_string(),
            toast_secs: config.ui.toast_secs.to_string(),
            token: String::new(),
            modified: false,
        }
    }

    /// Build a config from the edited values on top of `current`.
    pub fn to_config(&self, current: &AppConfig) -> Result<AppConfig, String> {
        let timeout_secs = self
            .timeout_secs
            .trim()
            .parse()
            .map_err(|_| "Request timeout must be a whole number of seconds".to_string())?;
        let toast_secs = self
            .toast_secs
            .trim()
            .parse()
            .map_err(|_| "Notification duration must be a whole number of seconds".to_string())?;

        let mut config = current.clone();
        config.api.base_url = self.base_url.trim().to_string();
        config.api.timeout_secs = timeout_secs;
        config.ui.toast_secs = toast_secs;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// Show the settings panel.
pub fn show(app: &mut App, ui: &mut egui::Ui) {
    panel_header(ui, "Settings");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Backend
        ui.group(|ui| {
            ui.heading("Backend");
            ui.add_space(5.0);

            egui::Grid::new("api_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Base URL:");
                    if ui.text_edit_singleline(&mut app.settings.base_url).changed() {
                        app.settings.modified = true;
                    }
                    ui.end_row();

                    ui.label("Timeout (seconds):");
                    if ui.text_edit_singleline(&mut app.settings.timeout_secs).changed() {
                        app.settings.modified = true;
                    }
                    ui.end_row();
                });
        });

        ui.add_space(15.0);

        // Authentication
        ui.group(|ui| {
            ui.heading("Authentication");
            ui.add_space(5.0);

            if app.token_override.is_some() {
                ui.label(RichText::new("Using the token given on the command line.").color(colors::NEUTRAL));
                return;
            }

            let has_token = app.token_store.token_present();
            ui.horizontal(|ui| {
                ui.label("Stored token:");
                if has_token {
                    ui.label(RichText::new("present").color(colors::SUCCESS));
                } else {
                    ui.label(RichText::new("none").color(colors::ERROR));
                }
            });
            ui.weak(format!("{}", app.token_store.path().display()));
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.label("New token:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.settings.token)
                        .password(true)
                        .desired_width(280.0),
                );

                if ui
                    .add_enabled(!app.settings.token.trim().is_empty(), egui::Button::new("Save Token"))
                    .clicked()
                {
                    match app.token_store.save(&app.settings.token) {
                        Ok(()) => {
                            app.settings.token.clear();
                            app.toasts.success("Token saved");
                        }
                        Err(e) => app.toasts.error(format!("Failed to save token: {e}")),
                    }
                }

                if ui.add_enabled(has_token, egui::Button::new("Clear Token")).clicked() {
                    match app.token_store.clear() {
                        Ok(()) => app.toasts.success("Token cleared"),
                        Err(e) => app.toasts.error(format!("Failed to clear token: {e}")),
                    }
                }
            });
        });

        ui.add_space(15.0);

        // UI Options
        ui.group(|ui| {
            ui.heading("UI Options");
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.label("Notification duration (seconds):");
                if ui.text_edit_singleline(&mut app.settings.toast_secs).changed() {
                    app.settings.modified = true;
                }
            });
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            if primary_button(ui, app.settings.modified, "", "Save Settings").clicked() {
                save_settings(app);
            }

            if app.settings.modified {
                ui.label(RichText::new("(unsaved changes)").color(colors::NEUTRAL).italics());
            }

            if ui.button("Reset to Defaults").clicked() {
                let token = std::mem::take(&mut app.settings.token);
                app.settings = SettingsForm::from_config(&AppConfig::default());
                app.settings.token = token;
                app.settings.modified = true;
            }
        });
    });
}

fn save_settings(app: &mut App) {
    let config = match app.settings.to_config(&app.config) {
        Ok(config) => config,
        Err(e) => {
            app.toasts.error(e);
            return;
        }
    };

    match app.apply_config(config) {
        Ok(()) => {
            app.settings.modified = false;
            app.toasts.success("Settings saved");
        }
        Err(e) => {
            tracing::error!("Failed to save settings: {}", e);
            app.toasts.error(format!("Failed to save settings: {e}"));
        }
    }
}
