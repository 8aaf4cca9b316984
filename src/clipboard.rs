//! Copy-to-clipboard buttons with transient confirmation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Copy buttons in the server-rendered tables (IP addresses, IDs, tokens)
//! call into this module. On success the button briefly shows a check icon,
//! then its original markup comes back.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping copies on one button are not serialized: the second call
//! captures the check icon as the "original" markup, so the last restore
//! wins and the button can end up showing the icon. Callers that care can
//! cancel the previous restore with its [`CancelToken`].

use std::rc::Rc;
use std::time::Duration;

use log::{debug, warn};

use crate::config::PanelConfig;
use crate::env::{CancelToken, Clipboard, ContentElement, IconRenderer, Scheduler};
use crate::error::PanelError;
use crate::toast::{Notify, ToastLevel};

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

/// Writes to the clipboard and swaps the trigger's markup on success.
pub struct ClipboardManager<C, I, T> {
    clipboard: C,
    icons: Rc<I>,
    scheduler: T,
    glyph: String,
    restore_delay: Duration,
    failure_message: String,
    notifier: Option<Rc<dyn Notify>>,
}

impl<C, I, T> ClipboardManager<C, I, T>
where
    C: Clipboard,
    I: IconRenderer + 'static,
    T: Scheduler,
{
    pub fn new(config: &PanelConfig, clipboard: C, icons: Rc<I>, scheduler: T) -> Self {
        Self {
            clipboard,
            icons,
            scheduler,
            glyph: config.confirm_glyph.clone(),
            restore_delay: config.copy_restore_delay(),
            failure_message: config.copy_failed_message.clone(),
            notifier: None,
        }
    }

    /// Report rejected writes through `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn Notify>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Copy `text`, then show the confirmation glyph on `trigger` until the
    /// restore delay elapses.
    ///
    /// The returned token cancels the pending restore.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Clipboard`] when the write is rejected. The
    /// trigger is left untouched and an error toast is shown if a notifier
    /// is attached.
    pub async fn copy<E>(&self, text: &str, trigger: &E) -> Result<CancelToken, PanelError>
    where
        E: ContentElement + Clone + 'static,
    {
        if let Err(err) = self.clipboard.write_text(text).await {
            warn!("clipboard: {err}");
            if let Some(notifier) = &self.notifier {
                if !self.failure_message.is_empty() {
                    notifier.notify(&self.failure_message, ToastLevel::Error);
                }
            }
            return Err(err);
        }

        let original = trigger.inner_html();
        trigger.set_inner_html(&self.glyph);
        self.icons.render_icons();
        debug!("clipboard: copied {} bytes", text.len());

        let cancel = CancelToken::default();
        let token = cancel.clone();
        let trigger = trigger.clone();
        let icons = Rc::clone(&self.icons);
        self.scheduler.schedule(
            self.restore_delay,
            Box::new(move || {
                if token.is_cancelled() {
                    return;
                }
                trigger.set_inner_html(&original);
                icons.render_icons();
            }),
        );
        Ok(cancel)
    }
}
