//! Navigation sidebar with a fixed admin menu.

use eframe::egui::{RichText, Ui};
use egui_phosphor::regular::{BED, GEAR, USERS};

/// Entries of the admin menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Rooms,
    Staff,
    Settings,
}

/// Menu in display order. The first entry is selected on startup.
pub const ADMIN_MENU: [MenuItem; 3] = [MenuItem::Rooms, MenuItem::Staff, MenuItem::Settings];

impl MenuItem {
    /// Get the display name for the entry.
    pub fn name(&self) -> &'static str {
        match self {
            MenuItem::Rooms => "Rooms",
            MenuItem::Staff => "Staff",
            MenuItem::Settings => "Settings",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            MenuItem::Rooms => BED,
            MenuItem::Staff => USERS,
            MenuItem::Settings => GEAR,
        }
    }
}

/// Sidebar selection state.
#[derive(Debug, Clone)]
pub struct Sidebar {
    selected: MenuItem,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self {
            selected: ADMIN_MENU[0],
        }
    }

    pub fn selected(&self) -> MenuItem {
        self.selected
    }

    /// Notify the caller, then make `item` the selected entry.
    pub fn select(&mut self, item: MenuItem, on_select: &mut impl FnMut(MenuItem)) {
        on_select(item);
        self.selected = item;
    }

    /// Render the menu, highlighting the selected entry.
    pub fn show(&mut self, ui: &mut Ui, mut on_select: impl FnMut(MenuItem)) {
        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Hotel Admin").size(20.0).strong());
        });
        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        for item in ADMIN_MENU {
            let text = RichText::new(format!("{}  {}", item.icon(), item.name())).size(16.0);
            if ui.selectable_label(self.selected == item, text).clicked() {
                self.select(item, &mut on_select);
            }
            ui.add_space(4.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entry_selected_initially() {
        assert_eq!(Sidebar::new().selected(), MenuItem::Rooms);
    }

    #[test]
    fn test_select_notifies_and_updates() {
        let mut sidebar = Sidebar::new();
        let mut notified = Vec::new();

        sidebar.select(MenuItem::Staff, &mut |item| notified.push(item));
        sidebar.select(MenuItem::Settings, &mut |item| notified.push(item));

        assert_eq!(notified, vec![MenuItem::Staff, MenuItem::Settings]);
        assert_eq!(sidebar.selected(), MenuItem::Settings);
    }

    #[test]
    fn test_menu_names() {
        let names: Vec<_> = ADMIN_MENU.iter().map(MenuItem::name).collect();
        assert_eq!(names, vec!["Rooms", "Staff", "Settings"]);
    }
}
