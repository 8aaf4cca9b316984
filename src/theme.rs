//! Dark mode resolution and application.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel stores an explicit choice under `darkMode` in `localStorage` and
//! otherwise follows `prefers-color-scheme`. The applied theme is a `dark`
//! class on `<html>`; no class means light.
//!
//! DESIGN
//! ======
//! Resolution is a pure function of the stored flag and the OS signal. Every
//! path that changes either input (startup, OS change, explicit choice) goes
//! through [`resolve`] and then applies the result, so the marker class never
//! disagrees with the inputs after the current callback returns.
//!
//! TRADE-OFFS
//! ==========
//! An explicit choice pins the theme until the flag is cleared outside the
//! panel (site data reset). There is no "follow system" setter.

use std::rc::Rc;

use log::{debug, warn};

use crate::config::PanelConfig;
use crate::env::{ColorSchemeSignal, PreferenceStore, Subscription, ThemeTarget};
use crate::error::PanelError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Visual theme applied to the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Stored dark mode choice, read fresh on every resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemePreference {
    ExplicitDark,
    ExplicitLight,
    /// No stored choice; follow the OS.
    Unset,
}

impl ThemePreference {
    /// Interpret the raw stored flag. `"true"` is dark, any other non-empty
    /// value is light, absent or empty defers to the OS.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Unset,
            Some("true") => Self::ExplicitDark,
            Some(_) => Self::ExplicitLight,
        }
    }

    /// Flag value written for an explicit choice.
    pub fn stored_value(dark: bool) -> &'static str {
        if dark { "true" } else { "false" }
    }
}

/// Resolve the theme from the stored choice and the OS signal.
///
/// A missing OS signal (`None`) resolves to light.
pub fn resolve(preference: ThemePreference, system_prefers_dark: Option<bool>) -> Theme {
    match preference {
        ThemePreference::ExplicitDark => Theme::Dark,
        ThemePreference::ExplicitLight => Theme::Light,
        ThemePreference::Unset if system_prefers_dark == Some(true) => Theme::Dark,
        ThemePreference::Unset => Theme::Light,
    }
}

struct ThemeShared<S, T> {
    store: S,
    target: T,
    storage_key: String,
    dark_class: String,
}

impl<S: PreferenceStore, T: ThemeTarget> ThemeShared<S, T> {
    fn preference(&self) -> Result<ThemePreference, PanelError> {
        let raw = self.store.get(&self.storage_key)?;
        Ok(ThemePreference::from_stored(raw.as_deref()))
    }

    fn apply(&self, theme: Theme) {
        self.target.set_class(&self.dark_class, theme.is_dark());
    }
}

/// Applies and tracks the page theme.
pub struct ThemeManager<S, M, T> {
    shared: Rc<ThemeShared<S, T>>,
    signal: M,
}

impl<S, M, T> ThemeManager<S, M, T>
where
    S: PreferenceStore + 'static,
    M: ColorSchemeSignal,
    T: ThemeTarget + 'static,
{
    pub fn new(config: &PanelConfig, store: S, signal: M, target: T) -> Self {
        Self {
            shared: Rc::new(ThemeShared {
                store,
                target,
                storage_key: config.storage_key.clone(),
                dark_class: config.dark_class.clone(),
            }),
            signal,
        }
    }

    /// Stored choice. An unreadable store counts as no choice.
    pub fn preference(&self) -> ThemePreference {
        self.shared.preference().unwrap_or(ThemePreference::Unset)
    }

    /// Theme the inputs currently resolve to.
    ///
    /// Without a readable store the page stays on the default light theme.
    pub fn resolved(&self) -> Theme {
        match self.shared.preference() {
            Ok(preference) => resolve(preference, self.signal.prefers_dark()),
            Err(err) => {
                debug!("theme: {err}; keeping light theme");
                Theme::Light
            }
        }
    }

    /// Theme currently applied to the root element.
    pub fn applied(&self) -> Theme {
        if self.shared.target.has_class(&self.shared.dark_class) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Apply the resolved theme and start following OS changes.
    ///
    /// The returned subscription owns the OS listener; detach it to keep the
    /// listener for the page lifetime.
    pub fn init(&self) -> Subscription {
        let theme = self.resolved();
        self.shared.apply(theme);
        debug!("theme: applied {theme:?} at startup");

        let shared = Rc::clone(&self.shared);
        self.signal.subscribe(Box::new(move |prefers_dark| {
            match shared.preference() {
                Ok(ThemePreference::Unset) => {
                    let theme = resolve(ThemePreference::Unset, Some(prefers_dark));
                    shared.apply(theme);
                    debug!("theme: OS preference changed, applied {theme:?}");
                }
                Ok(_) => debug!("theme: OS preference changed, explicit choice kept"),
                Err(err) => debug!("theme: OS preference changed, {err}"),
            }
        }))
    }

    /// Persist an explicit choice and re-apply.
    ///
    /// # Errors
    ///
    /// Returns the store error when the choice cannot be persisted; the
    /// applied theme is left unchanged in that case.
    pub fn set_dark(&self, dark: bool) -> Result<Theme, PanelError> {
        if let Err(err) = self
            .shared
            .store
            .set(&self.shared.storage_key, ThemePreference::stored_value(dark))
        {
            warn!("theme: could not persist choice: {err}");
            return Err(err);
        }
        let theme = self.resolved();
        self.shared.apply(theme);
        Ok(theme)
    }

    /// Flip the applied theme and persist it as an explicit choice.
    ///
    /// # Errors
    ///
    /// Same as [`ThemeManager::set_dark`].
    pub fn toggle(&self) -> Result<Theme, PanelError> {
        self.set_dark(self.applied().toggled().is_dark())
    }
}
