//! Transient notices stacked in the bottom-right corner.
//!
//! A drop refused because of school hours is its own kind: it carries a
//! lock icon and a heading, and stays up longer than a form validation
//! warning. Posting a notice that is still on screen restarts it instead of
//! stacking a copy, so repeated drops onto school time show one notice.

use egui::{Align2, Color32, Context, RichText, Stroke, Ui, Vec2};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 4;
const FADE: Duration = Duration::from_millis(400);
const WIDTH: f32 = 320.0;
const MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    /// Form input or selection problems.
    Warning,
    /// A drop that would overlap school hours.
    Blocked,
    Error,
}

impl ToastKind {
    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Success | ToastKind::Info => Duration::from_secs(3),
            ToastKind::Warning => Duration::from_secs(4),
            ToastKind::Blocked => Duration::from_secs(5),
            ToastKind::Error => Duration::from_secs(6),
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Info => "ℹ",
            ToastKind::Warning => "⚠",
            ToastKind::Blocked => "🔒",
            ToastKind::Error => "✗",
        }
    }

    fn heading(self) -> Option<&'static str> {
        match self {
            ToastKind::Blocked => Some("Blocked by school hours"),
            ToastKind::Error => Some("Something went wrong"),
            _ => None,
        }
    }

    fn accent(self, is_dark: bool) -> Color32 {
        let (light, dark) = match self {
            ToastKind::Success => ((22, 128, 61), (74, 222, 128)),
            ToastKind::Info => ((37, 99, 235), (96, 165, 250)),
            ToastKind::Warning => ((180, 83, 9), (251, 191, 36)),
            ToastKind::Blocked => ((190, 18, 60), (251, 113, 133)),
            ToastKind::Error => ((185, 28, 28), (248, 113, 113)),
        };
        let (r, g, b) = if is_dark { dark } else { light };
        Color32::from_rgb(r, g, b)
    }
}

#[derive(Debug, Clone)]
struct Toast {
    kind: ToastKind,
    message: String,
    shown_at: Instant,
}

impl Toast {
    fn expires_at(&self) -> Instant {
        self.shown_at + self.kind.lifetime()
    }

    /// 1.0 until the last `FADE` of the lifetime, then linear down to 0.0.
    fn opacity(&self, now: Instant) -> f32 {
        let remaining = self.expires_at().saturating_duration_since(now);
        (remaining.as_secs_f32() / FADE.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(ToastKind::Success, message.into(), Instant::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.post(ToastKind::Info, message.into(), Instant::now());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.post(ToastKind::Warning, message.into(), Instant::now());
    }

    pub fn blocked(&mut self, message: impl Into<String>) {
        self.post(ToastKind::Blocked, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(ToastKind::Error, message.into(), Instant::now());
    }

    fn post(&mut self, kind: ToastKind, message: String, now: Instant) {
        if let Some(existing) = self
            .toasts
            .iter_mut()
            .find(|toast| toast.kind == kind && toast.message == message)
        {
            existing.shown_at = now;
            return;
        }

        self.toasts.push_back(Toast {
            kind,
            message,
            shown_at: now,
        });
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at() > now);
    }

    #[cfg(test)]
    pub(super) fn kinds(&self) -> Vec<ToastKind> {
        self.toasts.iter().map(|toast| toast.kind).collect()
    }

    /// Paints the stack, newest nearest the corner.
    pub fn render(&mut self, ctx: &Context, is_dark: bool) {
        let now = Instant::now();
        self.prune(now);
        if self.toasts.is_empty() {
            return;
        }
        ctx.request_repaint();

        egui::Area::new(egui::Id::new("timetable_toasts"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-MARGIN, -MARGIN))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_width(WIDTH);
                ui.spacing_mut().item_spacing.y = 6.0;
                for toast in &self.toasts {
                    show_toast(ui, toast, now, is_dark);
                }
            });
    }
}

fn show_toast(ui: &mut Ui, toast: &Toast, now: Instant, is_dark: bool) {
    let opacity = toast.opacity(now);
    let accent = toast.kind.accent(is_dark).gamma_multiply(opacity);
    let text = ui.visuals().text_color().gamma_multiply(opacity);
    let fill = ui.visuals().window_fill.gamma_multiply(0.95 * opacity);

    egui::Frame::none()
        .fill(fill)
        .rounding(6.0)
        .stroke(Stroke::new(1.0, accent))
        .inner_margin(egui::Margin::symmetric(10.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(WIDTH - 20.0);
            ui.horizontal_top(|ui| {
                ui.label(RichText::new(toast.kind.icon()).size(16.0).color(accent));
                ui.vertical(|ui| {
                    if let Some(heading) = toast.kind.heading() {
                        ui.label(RichText::new(heading).strong().color(accent));
                    }
                    ui.label(RichText::new(&toast.message).color(text));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_school_rejections_outlast_validation_warnings() {
        assert!(ToastKind::Blocked.lifetime() > ToastKind::Warning.lifetime());
        assert_eq!(ToastKind::Blocked.heading(), Some("Blocked by school hours"));
        assert_eq!(ToastKind::Warning.heading(), None);
        assert_ne!(ToastKind::Blocked.icon(), ToastKind::Warning.icon());
        assert_ne!(ToastKind::Blocked.accent(false), ToastKind::Warning.accent(false));
    }

    #[test]
    fn test_repeated_notice_restarts_instead_of_stacking() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        manager.post(ToastKind::Blocked, "Mon 12:00".into(), start);
        manager.post(ToastKind::Blocked, "Mon 12:00".into(), start + Duration::from_secs(4));

        assert_eq!(manager.kinds(), vec![ToastKind::Blocked]);
        manager.prune(start + Duration::from_secs(6));
        assert_eq!(manager.kinds(), vec![ToastKind::Blocked]);
    }

    #[test]
    fn test_oldest_notice_drops_past_the_limit() {
        let now = Instant::now();
        let mut manager = ToastManager::new();
        manager.post(ToastKind::Error, "first".into(), now);
        for i in 0..MAX_VISIBLE {
            manager.post(ToastKind::Info, format!("note {}", i), now);
        }

        assert_eq!(manager.kinds(), vec![ToastKind::Info; MAX_VISIBLE]);
    }

    #[test]
    fn test_fades_only_at_the_end() {
        let start = Instant::now();
        let toast = Toast {
            kind: ToastKind::Success,
            message: "saved".into(),
            shown_at: start,
        };
        let lifetime = ToastKind::Success.lifetime();

        assert_eq!(toast.opacity(start), 1.0);
        let halfway_fade = start + lifetime - FADE / 2;
        assert!((toast.opacity(halfway_fade) - 0.5).abs() < 0.01);
        assert_eq!(toast.opacity(start + lifetime), 0.0);
    }

    #[test]
    fn test_prune_drops_expired() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        manager.post(ToastKind::Success, "short".into(), start);
        manager.post(ToastKind::Error, "long".into(), start);

        manager.prune(start + Duration::from_secs(4));
        assert_eq!(manager.kinds(), vec![ToastKind::Error]);
    }
}
