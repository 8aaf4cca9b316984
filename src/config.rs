//! Host-tunable constants for the panel helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server-rendered pages embed one script tag that boots the helpers.
//! Hosts that need different timings or keys pass a JSON object; every field
//! is optional and missing fields keep the defaults below.

use std::time::Duration;

use serde::Deserialize;

use crate::error::PanelError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// `localStorage` key holding the explicit dark mode choice.
pub const DARK_MODE_KEY: &str = "darkMode";
/// Class toggled on `<html>` when the dark theme is active.
pub const DARK_CLASS: &str = "dark";
/// Media query tracked for the OS color scheme.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";
/// Lucide placeholder swapped into a copy button after a successful copy.
pub const COPY_CONFIRM_GLYPH: &str = r#"<i data-lucide="check" class="w-4 h-4"></i>"#;

const DEFAULT_COPY_RESTORE_MS: u64 = 2000;
const DEFAULT_TOAST_DISPLAY_MS: u64 = 3000;
const DEFAULT_TOAST_FADE_MS: u64 = 300;

/// Runtime configuration for all panel helpers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    pub storage_key: String,
    pub dark_class: String,
    pub media_query: String,
    pub confirm_glyph: String,
    pub copy_restore_ms: u64,
    pub toast_display_ms: u64,
    pub toast_fade_ms: u64,
    /// Message shown in an error toast when a copy is rejected. Empty disables it.
    pub copy_failed_message: String,
    /// Console log level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            storage_key: DARK_MODE_KEY.to_owned(),
            dark_class: DARK_CLASS.to_owned(),
            media_query: PREFERS_DARK_QUERY.to_owned(),
            confirm_glyph: COPY_CONFIRM_GLYPH.to_owned(),
            copy_restore_ms: DEFAULT_COPY_RESTORE_MS,
            toast_display_ms: DEFAULT_TOAST_DISPLAY_MS,
            toast_fade_ms: DEFAULT_TOAST_FADE_MS,
            copy_failed_message: "Failed to copy to clipboard".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl PanelConfig {
    /// Parse a host-supplied JSON object. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Config`] for malformed JSON or mistyped fields.
    pub fn from_json(raw: &str) -> Result<Self, PanelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    pub fn copy_restore_delay(&self) -> Duration {
        Duration::from_millis(self.copy_restore_ms)
    }

    pub fn toast_display(&self) -> Duration {
        Duration::from_millis(self.toast_display_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }

    /// Resolve `log_level`, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
