//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const ACCENT: Color32 = Color32::from_rgb(70, 130, 200);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Filled button used for the main action of a panel or dialog.
pub fn primary_button(ui: &mut Ui, enabled: bool, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon}  {text}")
    };
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(colors::ACCENT)
            .min_size(egui::vec2(110.0, 30.0)),
    )
}

/// Small inline button for row actions.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.button(RichText::new(icon).size(14.0)).on_hover_text(tooltip)
}

/// Validation message under a form field; keeps the row height stable.
pub fn field_error(ui: &mut Ui, message: Option<String>) {
    match message {
        Some(message) => {
            ui.colored_label(colors::ERROR, RichText::new(message).size(12.0));
        }
        None => {
            ui.label(RichText::new(" ").size(12.0));
        }
    }
}
