//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod rooms_panel;
pub mod settings_panel;
pub mod sidebar;
pub mod staff_panel;
pub mod toast;

pub use app::App;
