//! # panel-ui
//!
//! Browser-side helpers for the hosting panel's server-rendered pages:
//! dark mode that follows the OS until the user picks a side, VPS status
//! badge colors, copy buttons with a confirmation icon, and toast
//! notifications.
//!
//! Logic is host-agnostic and runs against the traits in [`env`]; the
//! `hydrate` feature adds the `web-sys` implementations and the JS exports
//! in `bindings`.

pub mod boot;
pub mod clipboard;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod status;
pub mod theme;
pub mod toast;

#[cfg(feature = "hydrate")]
pub mod bindings;

pub use boot::{Collaborators, Host, Panel, boot};
pub use config::PanelConfig;
pub use error::PanelError;
pub use status::{StyleToken, VpsStatus, status_style};
pub use theme::{Theme, ThemeManager, ThemePreference, resolve};
pub use toast::{ToastLevel, ToastNotifier, ToastRecord};
