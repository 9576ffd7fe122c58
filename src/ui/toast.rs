//! Transient notifications in the top-right corner.

use std::time::{Duration, Instant};

use eframe::egui::{self, RichText};

use super::components::colors;
use crate::enroll::{Notice, NoticeLevel};

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

/// Queue of notifications, each visible for a fixed time.
pub struct Toasts {
    toasts: Vec<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime,
        }
    }

    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn push_at(&mut self, notice: Notice, now: Instant) {
        self.toasts.push(Toast { notice, shown_at: now });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notice::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::error(message));
    }

    /// Drop expired notifications.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts.retain(|t| now.duration_since(t.shown_at) < lifetime);
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &Notice> {
        self.toasts.iter().map(|t| &t.notice)
    }

    /// Render the queue; clicking a notification dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(400.0);
                for (index, toast) in self.toasts.iter().enumerate() {
                    let color = match toast.notice.level {
                        NoticeLevel::Success => colors::SUCCESS,
                        NoticeLevel::Error => colors::ERROR,
                    };
                    let response = egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.5, color))
                        .show(ui, |ui| {
                            ui.set_min_width(300.0);
                            ui.label(RichText::new(&toast.notice.message).color(color).size(14.0));
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(index);
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(index) = dismissed {
            self.toasts.remove(index);
        }

        // Repaint so expired notifications disappear without input
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
