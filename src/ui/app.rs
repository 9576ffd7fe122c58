//! Main application UI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::enroll::{EnrollService, Submitted};
use crate::error::Result;
use crate::forms::{RoomForm, RoomSubmission, StaffForm, StaffSubmission, Ticket};
use crate::models::room::Room;
use crate::models::staff::UserDetail;
use crate::token::{FileTokenStore, StaticToken, TokenSource};

use super::components::colors;
use super::settings_panel::SettingsForm;
use super::sidebar::{MenuItem, Sidebar};
use super::toast::Toasts;
use super::{rooms_panel, settings_panel, staff_panel};

/// Messages from async tasks to UI. Each result carries the ticket of the
/// submission that produced it.
pub enum UiMessage {
    RoomSubmitted(Ticket, Submitted<Room>),
    StaffSubmitted(Ticket, Submitted<UserDetail>),
}

/// Main application state.
pub struct App {
    // Runtime and backend
    pub rt: tokio::runtime::Runtime,
    pub service: EnrollService,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,
    /// Submissions whose result has not been received yet.
    pub outstanding: usize,

    // Navigation
    pub sidebar: Sidebar,

    // Records saved during this session
    pub rooms: Vec<Room>,
    pub staff: Vec<UserDetail>,

    // Forms
    pub room_form: RoomForm,
    pub staff_form: StaffForm,
    pub settings: SettingsForm,

    // Notifications and dialogs
    pub toasts: Toasts,
    pub error_message: Option<String>,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub token_store: FileTokenStore,
    /// Token given on the command line; the token file is ignored.
    pub token_override: Option<String>,
}

impl App {
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        token_override: Option<String>,
        rt: tokio::runtime::Runtime,
        initial_error: Option<String>,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let token_store = FileTokenStore::new(config.auth.token_path());
        let tokens = token_source(&token_store, token_override.as_deref());
        let service = EnrollService::new(ApiClient::http(&config.api, tokens)?);

        tracing::info!(
            "Backend: {} (token from {})",
            config.api.base_url,
            if token_override.is_some() {
                "command line".to_string()
            } else {
                format!("{:?}", token_store.path())
            }
        );

        Ok(Self {
            rt,
            service,
            tx,
            rx,
            outstanding: 0,
            sidebar: Sidebar::new(),
            rooms: Vec::new(),
            staff: Vec::new(),
            room_form: RoomForm::default(),
            staff_form: StaffForm::default(),
            settings: SettingsForm::from_config(&config),
            toasts: Toasts::new(Duration::from_secs(config.ui.toast_secs)),
            error_message: initial_error,
            config,
            config_path,
            token_store,
            token_override,
        })
    }

    /// Send a room submission in the background.
    pub fn submit_room(&mut self, ticket: Ticket, submission: RoomSubmission) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        self.outstanding += 1;

        self.rt.spawn(async move {
            let result = service.submit_room(submission).await;
            let _ = tx.send(UiMessage::RoomSubmitted(ticket, result));
        });
    }

    /// Send a staff submission in the background.
    pub fn submit_staff(&mut self, ticket: Ticket, submission: StaffSubmission) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        self.outstanding += 1;

        self.rt.spawn(async move {
            let result = service.submit_staff(submission).await;
            let _ = tx.send(UiMessage::StaffSubmitted(ticket, result));
        });
    }

    /// Persist settings and point the client at the new configuration.
    pub fn apply_config(&mut self, config: AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| crate::error::AppError::config(e.to_string()))?;

        let token_store = FileTokenStore::new(config.auth.token_path());
        let tokens = token_source(&token_store, self.token_override.as_deref());
        let service = EnrollService::new(ApiClient::http(&config.api, tokens)?);

        config
            .save(&self.config_path)
            .map_err(|e| crate::error::AppError::config(e.to_string()))?;

        self.service = service;
        self.toasts.set_lifetime(Duration::from_secs(config.ui.toast_secs));
        self.token_store = token_store;
        self.config = config;
        tracing::info!("Settings saved to {:?}", self.config_path);
        Ok(())
    }

    /// Poll async operation results.
    ///
    /// A result whose form was closed or replaced meanwhile still updates the
    /// session list and shows its notices, but leaves the current form alone.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.outstanding = self.outstanding.saturating_sub(1);
            match msg {
                UiMessage::RoomSubmitted(ticket, result) => {
                    let current = self.room_form.finish_submit(ticket);
                    self.show_notices(result.notices());
                    if let Submitted::Saved { record, .. } = result {
                        upsert(&mut self.rooms, record, |a, b| a.id == b.id);
                        if current {
                            self.room_form.reset();
                        }
                    }
                }
                UiMessage::StaffSubmitted(ticket, result) => {
                    let current = self.staff_form.finish_submit(ticket);
                    self.show_notices(result.notices());
                    if let Submitted::Saved { record, .. } = result {
                        upsert(&mut self.staff, record, |a, b| a.user_id == b.user_id);
                        if current {
                            self.staff_form.reset();
                        }
                    }
                }
            }
        }
    }

    fn show_notices(&mut self, notices: &[crate::enroll::Notice]) {
        for notice in notices {
            self.toasts.push(notice.clone());
        }
    }

    /// Render the error dialog.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint while a submission is outstanding
        if self.outstanding > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(190.0)
            .show(ctx, |ui| {
                self.sidebar
                    .show(ui, |item| tracing::debug!("Navigated to {}", item.name()));
            });

        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.sidebar.selected() {
            MenuItem::Rooms => rooms_panel::show(self, ui),
            MenuItem::Staff => staff_panel::show(self, ui),
            MenuItem::Settings => settings_panel::show(self, ui),
        });

        self.toasts.show(ctx);
    }
}

fn token_source(store: &FileTokenStore, token_override: Option<&str>) -> Arc<dyn TokenSource> {
    match token_override {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(store.clone()),
    }
}

/// Replace the matching record, or append a new one.
fn upsert<T>(records: &mut Vec<T>, record: T, same: impl Fn(&T, &T) -> bool) {
    match records.iter_mut().find(|existing| same(existing, &record)) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enroll::Notice;
    use crate::models::room::{RoomFields, RoomType};

    fn test_app(config_path: PathBuf) -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        App::new(AppConfig::default(), config_path, Some("test-token".to_string()), rt, None).unwrap()
    }

    fn room_fields(description: &str) -> RoomFields {
        RoomFields {
            room_type: RoomType::Single,
            description: description.to_string(),
            charges: 80.0,
            capacity: 1,
        }
    }

    fn saved_room(id: i64, description: &str, message: &str) -> Submitted<Room> {
        Submitted::Saved {
            record: Room::from_fields(id, room_fields(description)),
            notices: vec![Notice::success(message)],
        }
    }

    #[test]
    fn test_late_result_leaves_reopened_dialog_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path().join("config.toml"));

        // Add submitted, then the dialog is cancelled while the request runs
        app.room_form = RoomForm {
            room_type: Some(RoomType::Single),
            description: "Quiet side".to_string(),
            capacity: "1".to_string(),
            ..RoomForm::add()
        };
        let (stale, _) = app.room_form.begin_submit().unwrap();
        app.room_form.reset();

        // An edit dialog is opened, changed and submitted
        let existing = Room::from_fields(7, room_fields("Garden"));
        app.room_form = RoomForm::edit(&existing);
        app.room_form.description = "Renovated".to_string();
        let (current, _) = app.room_form.begin_submit().unwrap();

        let late = saved_room(3, "Quiet side", "Room added successfully!");
        assert!(app.tx.send(UiMessage::RoomSubmitted(stale, late)).is_ok());
        app.poll_async_results();

        assert!(app.room_form.is_open);
        assert_eq!(app.room_form.description, "Renovated");
        assert!(app.room_form.is_submitting());
        assert!(app.room_form.begin_submit().is_none());
        assert_eq!(app.rooms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(app.toasts.messages().count(), 1);

        let updated = saved_room(7, "Renovated", "Room updated successfully!");
        assert!(app.tx.send(UiMessage::RoomSubmitted(current, updated)).is_ok());
        app.poll_async_results();

        assert!(!app.room_form.is_open);
        assert_eq!(app.rooms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(app.toasts.messages().count(), 2);
    }

    #[test]
    fn test_failed_result_keeps_form_open_and_accepts_resubmit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path().join("config.toml"));

        app.room_form = RoomForm::edit(&Room::from_fields(7, room_fields("Garden")));
        let (ticket, _) = app.room_form.begin_submit().unwrap();

        let failed = Submitted::Failed {
            notices: vec![Notice::error("Type taken")],
        };
        assert!(app.tx.send(UiMessage::RoomSubmitted(ticket, failed)).is_ok());
        app.poll_async_results();

        assert!(app.room_form.is_open);
        assert!(!app.room_form.is_submitting());
        assert!(app.rooms.is_empty());
        assert!(app.room_form.begin_submit().is_some());
    }

    #[test]
    fn test_apply_config_keeps_state_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path().join("missing").join("config.toml"));
        let before = app.config.clone();

        let mut config = before.clone();
        config.api.base_url = "https://api.example.com".to_string();

        assert!(app.apply_config(config).is_err());
        assert_eq!(app.config, before);
    }

    #[test]
    fn test_apply_config_saves_and_switches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = test_app(path.clone());

        let mut config = app.config.clone();
        config.api.base_url = "https://api.example.com".to_string();
        app.apply_config(config.clone()).unwrap();

        assert_eq!(app.config, config);
        assert!(matches!(
            AppConfig::try_load(&path),
            crate::config::ConfigLoadResult::Loaded(loaded) if loaded == config
        ));
    }

    #[test]
    fn test_upsert_replaces_matching_record() {
        let mut records = vec![(1, "a"), (2, "b")];
        upsert(&mut records, (2, "c"), |x, y| x.0 == y.0);
        upsert(&mut records, (3, "d"), |x, y| x.0 == y.0);
        assert_eq!(records, vec![(1, "a"), (2, "c"), (3, "d")]);
    }

    #[test]
    fn test_token_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.save("from-file").unwrap();

        assert_eq!(token_source(&store, Some("from-cli")).token().as_deref(), Some("from-cli"));
        assert_eq!(token_source(&store, None).token().as_deref(), Some("from-file"));
    }
}
