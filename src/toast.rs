//! Transient bottom-right notifications.
//!
//! DESIGN
//! ======
//! Each call mounts its own element and schedules its own fade and removal.
//! There is no queue, dedup or cap: concurrent toasts stack on top of each
//! other until their timers run out.

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PanelConfig;
use crate::env::{CancelToken, Scheduler, ToastNode, ToastSurface};
use crate::error::PanelError;

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

const BASE_CLASSES: &str = "fixed bottom-4 right-4";
const BODY_CLASSES: &str = "text-white px-6 py-3 rounded-lg shadow-lg z-50 animate-slide-in-right";
/// Classes added when the display window ends.
pub const FADE_CLASSES: [&str; 3] = ["opacity-0", "transition-opacity", "duration-300"];

/// Severity of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastLevel {
    /// Parse a level label; anything unrecognized is `Info`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            "info" => Self::Info,
            other => {
                debug!("toast: unknown level {other:?}, using info");
                Self::Info
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Background color class for the level.
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "bg-green-600",
            Self::Error => "bg-red-600",
            Self::Warning => "bg-yellow-600",
            Self::Info => "bg-blue-600",
        }
    }

    /// Full class attribute for a toast of this level.
    pub fn class_names(self) -> String {
        format!("{BASE_CLASSES} {} {BODY_CLASSES}", self.color())
    }
}

/// A notification that was shown. Not persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToastRecord {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at_ms: f64,
}

/// Returned by [`ToastNotifier::show`].
#[derive(Clone, Debug)]
pub struct ToastHandle {
    pub record: ToastRecord,
    cancel: CancelToken,
}

impl ToastHandle {
    /// Stop the pending fade and removal; the toast stays on screen.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Fire-and-forget user notification, used by other helpers to report
/// failures without depending on a concrete surface.
pub trait Notify {
    fn notify(&self, message: &str, level: ToastLevel);
}

/// Mounts toasts on a surface and retires them on a timer.
pub struct ToastNotifier<S, T> {
    surface: S,
    scheduler: T,
    display: Duration,
    fade: Duration,
}

impl<S, T> ToastNotifier<S, T>
where
    S: ToastSurface,
    T: Scheduler + Clone + 'static,
{
    pub fn new(config: &PanelConfig, surface: S, scheduler: T) -> Self {
        Self {
            surface,
            scheduler,
            display: config.toast_display(),
            fade: config.toast_fade(),
        }
    }

    /// Show `message` now; fade after the display window, remove after the fade.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the element cannot be mounted.
    pub fn show(&self, message: &str, level: ToastLevel) -> Result<ToastHandle, PanelError> {
        let record = ToastRecord {
            id: Uuid::new_v4(),
            level,
            message: message.to_owned(),
            created_at_ms: self.scheduler.now_ms(),
        };
        let node = self
            .surface
            .append(&record.id.to_string(), &level.class_names(), message)?;
        debug!("toast: showing {} {}", level.as_str(), record.id);

        let cancel = CancelToken::default();
        let scheduler = self.scheduler.clone();
        let fade = self.fade;
        let token = cancel.clone();
        self.scheduler.schedule(
            self.display,
            Box::new(move || {
                if token.is_cancelled() {
                    return;
                }
                node.add_classes(&FADE_CLASSES);
                scheduler.schedule(
                    fade,
                    Box::new(move || {
                        if !token.is_cancelled() {
                            node.remove();
                        }
                    }),
                );
            }),
        );

        Ok(ToastHandle { record, cancel })
    }
}

impl<S, T> Notify for ToastNotifier<S, T>
where
    S: ToastSurface,
    T: Scheduler + Clone + 'static,
{
    fn notify(&self, message: &str, level: ToastLevel) {
        if let Err(err) = self.show(message, level) {
            warn!("toast: could not show {message:?}: {err}");
        }
    }
}
