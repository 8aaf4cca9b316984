//! Host environment seams for the panel helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every browser capability the helpers touch (storage, media queries, the
//! root class list, clipboard, icons, timers, the toast container) sits behind
//! a small trait here. Components receive implementations at construction so
//! the same logic runs against the real page (`browser`, `hydrate` feature)
//! and against deterministic in-memory fakes (`memory`).
//!
//! TRADE-OFFS
//! ==========
//! The page is single-threaded, so nothing here is `Send`. Shared state uses
//! `Rc`/`RefCell` and callbacks are plain boxed closures.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::error::PanelError;

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod memory;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

/// Durable per-origin string store (`localStorage`).
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means absent.
    ///
    /// # Errors
    ///
    /// [`PanelError::MissingCapability`] when the store itself is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, PanelError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Fails when the store is unavailable or rejects the write (quota).
    fn set(&self, key: &str, value: &str) -> Result<(), PanelError>;
}

/// OS-level dark color scheme preference.
pub trait ColorSchemeSignal {
    /// Current value, or `None` when media queries are unsupported.
    fn prefers_dark(&self) -> Option<bool>;

    /// Call `on_change` with the new value each time the preference flips.
    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription;
}

/// Class list of the document root element.
pub trait ThemeTarget {
    fn set_class(&self, class: &str, present: bool);
    fn has_class(&self, class: &str) -> bool;
}

/// An element whose markup can be captured and replaced.
pub trait ContentElement {
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
}

/// Re-renders icon placeholders currently in the page. Idempotent.
pub trait IconRenderer {
    fn render_icons(&self);
}

/// Signal fired after a region of the page is swapped out-of-band.
pub trait PageUpdates {
    fn on_swap(&self, callback: Box<dyn Fn()>) -> Subscription;
}

/// Asynchronous, write-only system clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PanelError>>;
}

/// Container that notification elements are appended to.
pub trait ToastSurface {
    type Node: ToastNode + 'static;

    /// Append a visible element with `class_name` and text `message`.
    ///
    /// # Errors
    ///
    /// Fails when the container is missing or element creation throws.
    fn append(&self, id: &str, class_name: &str, message: &str) -> Result<Self::Node, PanelError>;
}

/// A mounted notification element.
pub trait ToastNode {
    fn add_classes(&self, classes: &[&str]);
    fn remove(&self);
}

/// Clock and one-shot timers of the host event loop.
pub trait Scheduler {
    /// Milliseconds on the host clock.
    fn now_ms(&self) -> f64;

    /// Run `task` once after `delay`. Timers are never cancelled by the host;
    /// callers guard their tasks with a [`CancelToken`].
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Live listener registration. Dropping it removes the listener.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release (capability missing).
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Keep the listener registered for the rest of the page lifetime.
    pub fn detach(mut self) {
        if let Some(release) = self.release.take() {
            std::mem::forget(release);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Cancellation flag shared between a caller and its pending timer tasks.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}
