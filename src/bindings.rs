//! JS entry points for the panel pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Templates call these from inline handlers, e.g.
//! `onclick="panel.copyToClipboard('10.0.0.1', this)"` or
//! `panel.showToast('Saved', 'success')` from an `htmx:afterRequest` hook.
//! `start()` must run once after `DOMContentLoaded`; calls made before that
//! are logged and ignored.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::boot::{Panel, boot};
use crate::config::PanelConfig;
use crate::env::browser::BrowserHost;
use crate::error::PanelError;
use crate::logging;
use crate::status::status_style;
use crate::toast::ToastLevel;

thread_local! {
    static PANEL: RefCell<Option<Rc<Panel<BrowserHost>>>> = const { RefCell::new(None) };
}

fn panel() -> Result<Rc<Panel<BrowserHost>>, JsValue> {
    PANEL
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("panel helpers not started"))
}

fn to_js(err: &PanelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn start_with(config: &PanelConfig) {
    logging::init(config.log_level());
    PANEL.with(|slot| {
        if slot.borrow().is_some() {
            warn!("panel: start called twice, ignoring");
            return;
        }
        let panel = boot(config, BrowserHost::collaborators(config));
        *slot.borrow_mut() = Some(Rc::new(panel));
    });
}

/// Boot with default settings.
#[wasm_bindgen]
pub fn start() {
    start_with(&PanelConfig::default());
}

/// Boot with a JSON settings object (see `PanelConfig`).
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(raw: &str) -> Result<(), JsValue> {
    let config = PanelConfig::from_json(raw).map_err(|err| to_js(&err))?;
    start_with(&config);
    Ok(())
}

#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, level: Option<String>) -> Result<(), JsValue> {
    let level = level.as_deref().map_or(ToastLevel::Info, ToastLevel::from_label);
    panel()?
        .toasts
        .show(message, level)
        .map(|_| ())
        .map_err(|err| to_js(&err))
}

/// Copy `text` and flash a check icon on `trigger`. Rejects when the
/// clipboard write fails.
#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: String, trigger: web_sys::Element) -> js_sys::Promise {
    future_to_promise(async move {
        let panel = panel()?;
        panel
            .clipboard
            .copy(&text, &trigger)
            .await
            .map(|_| JsValue::UNDEFINED)
            .map_err(|err| to_js(&err))
    })
}

/// Badge classes for a VPS status label.
#[wasm_bindgen(js_name = statusColor)]
pub fn status_color(status: &str) -> String {
    status_style(status).class_names()
}

/// Flip and persist the theme. Returns `true` when dark is now applied.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<bool, JsValue> {
    let theme = panel()?.theme.toggle().map_err(|err| to_js(&err))?;
    Ok(theme.is_dark())
}

#[wasm_bindgen(js_name = setDarkMode)]
pub fn set_dark_mode(dark: bool) -> Result<(), JsValue> {
    panel()?.theme.set_dark(dark).map(|_| ()).map_err(|err| to_js(&err))
}
