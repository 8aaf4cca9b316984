//! Error type shared by the panel helpers.
//!
//! Nothing here is fatal to the page: callers log these and fall back to the
//! default behavior for the component that failed.

use thiserror::Error;

/// Failures surfaced by the panel helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The system clipboard rejected the write (permission denied, no focus).
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// A browser capability the helper needs is not available.
    #[error("{0} is not available")]
    MissingCapability(&'static str),

    /// A DOM call returned an exception.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Host-supplied configuration could not be parsed.
    #[error("invalid panel config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "hydrate")]
impl PanelError {
    /// Render a thrown JS value into a `Dom` error.
    pub(crate) fn from_js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(js_error_text(value))
    }

    /// Render a rejected clipboard promise into a `Clipboard` error.
    pub(crate) fn clipboard_from_js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Clipboard(js_error_text(value))
    }
}

#[cfg(feature = "hydrate")]
fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
