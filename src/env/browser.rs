//! `web-sys` implementations of the host seams.
//!
//! Every lookup goes through `web_sys::window()` at call time and treats a
//! missing object (no storage, no `matchMedia`, no `<body>`, no `lucide`
//! global) as a missing capability rather than a panic.

use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{
    Clipboard, ColorSchemeSignal, ContentElement, IconRenderer, PageUpdates, PreferenceStore,
    Scheduler, Subscription, ThemeTarget, ToastNode, ToastSurface,
};
use crate::boot::{Collaborators, Host};
use crate::config::PanelConfig;
use crate::error::PanelError;

/// Event HTMX dispatches on `<body>` after swapping content in.
pub const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

fn document() -> Result<web_sys::Document, PanelError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PanelError::MissingCapability("document"))
}

fn js_property(target: &JsValue, name: &str) -> Result<JsValue, PanelError> {
    js_sys::Reflect::get(target, &JsValue::from_str(name)).map_err(|err| PanelError::from_js(&err))
}

// =============================================================
// Theme
// =============================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, PanelError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PanelError::MissingCapability("localStorage"))
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PanelError> {
        local_storage()?
            .get_item(key)
            .map_err(|err| PanelError::from_js(&err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PanelError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| PanelError::from_js(&err))
    }
}

/// `window.matchMedia(query)`, resolved once at construction.
#[derive(Clone, Debug)]
pub struct MediaQuery {
    list: Option<web_sys::MediaQueryList>,
}

impl MediaQuery {
    pub fn new(query: &str) -> Self {
        let list = web_sys::window().and_then(|w| w.match_media(query).ok().flatten());
        if list.is_none() {
            debug!("theme: matchMedia unavailable for {query}");
        }
        Self { list }
    }
}

impl ColorSchemeSignal for MediaQuery {
    fn prefers_dark(&self) -> Option<bool> {
        self.list.as_ref().map(web_sys::MediaQueryList::matches)
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        let Some(list) = self.list.clone() else {
            return Subscription::noop();
        };
        let callback = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
            move |event: web_sys::MediaQueryListEvent| on_change(event.matches()),
        );
        if let Err(err) = list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref()) {
            warn!("theme: could not watch color scheme: {}", PanelError::from_js(&err));
            return Subscription::noop();
        }
        Subscription::new(move || {
            if list
                .remove_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
                .is_err()
            {
                debug!("theme: color scheme listener already gone");
            }
        })
    }
}

/// Class list of `document.documentElement`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentRoot;

fn root_element() -> Option<web_sys::Element> {
    document().ok()?.document_element()
}

impl ThemeTarget for DocumentRoot {
    fn set_class(&self, class: &str, present: bool) {
        let Some(root) = root_element() else {
            debug!("theme: no root element");
            return;
        };
        let classes = root.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = result {
            warn!("theme: could not update root class: {}", PanelError::from_js(&err));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        root_element().is_some_and(|root| root.class_list().contains(class))
    }
}

// =============================================================
// Clipboard and icons
// =============================================================

impl ContentElement for web_sys::Element {
    fn inner_html(&self) -> String {
        web_sys::Element::inner_html(self)
    }

    fn set_inner_html(&self, html: &str) {
        web_sys::Element::set_inner_html(self, html);
    }
}

/// `navigator.clipboard.writeText`, looked up dynamically so insecure
/// contexts (where it is absent) fail with an error instead of a trap.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigatorClipboard;

fn write_text_promise(text: &str) -> Result<js_sys::Promise, PanelError> {
    let navigator = web_sys::window()
        .ok_or(PanelError::MissingCapability("window"))?
        .navigator();
    let clipboard = js_property(&navigator, "clipboard")?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(PanelError::MissingCapability("navigator.clipboard"));
    }
    let write = js_property(&clipboard, "writeText")?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| PanelError::MissingCapability("navigator.clipboard.writeText"))?;
    write
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|err| PanelError::clipboard_from_js(&err))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| PanelError::Clipboard("writeText did not return a promise".to_owned()))
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PanelError>> {
        let promise = write_text_promise(text);
        async move {
            JsFuture::from(promise?)
                .await
                .map(|_| ())
                .map_err(|err| PanelError::clipboard_from_js(&err))
        }
        .boxed_local()
    }
}

/// `lucide.createIcons()`; a page without the library is left alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct LucideIcons;

impl LucideIcons {
    fn create_icons() -> Result<(), PanelError> {
        let lucide = js_property(&js_sys::global(), "lucide")?;
        if lucide.is_undefined() || lucide.is_null() {
            return Err(PanelError::MissingCapability("lucide"));
        }
        let create = js_property(&lucide, "createIcons")?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| PanelError::MissingCapability("lucide.createIcons"))?;
        create.call0(&lucide).map_err(|err| PanelError::from_js(&err))?;
        Ok(())
    }
}

impl IconRenderer for LucideIcons {
    fn render_icons(&self) {
        match Self::create_icons() {
            Ok(()) => {}
            Err(PanelError::MissingCapability(what)) => debug!("icons: {what} not loaded"),
            Err(err) => warn!("icons: {err}"),
        }
    }
}

/// `htmx:afterSwap` events bubbling to `<body>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmxSwaps;

impl PageUpdates for HtmxSwaps {
    fn on_swap(&self, callback: Box<dyn Fn()>) -> Subscription {
        let Some(body) = document().ok().and_then(|d| d.body()) else {
            warn!("icons: no <body>, partial swaps will not re-render icons");
            return Subscription::noop();
        };
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| callback());
        if let Err(err) = body.add_event_listener_with_callback(AFTER_SWAP_EVENT, listener.as_ref().unchecked_ref()) {
            warn!("icons: could not watch {AFTER_SWAP_EVENT}: {}", PanelError::from_js(&err));
            return Subscription::noop();
        }
        Subscription::new(move || {
            if body
                .remove_event_listener_with_callback(AFTER_SWAP_EVENT, listener.as_ref().unchecked_ref())
                .is_err()
            {
                debug!("icons: swap listener already gone");
            }
        })
    }
}

// =============================================================
// Toasts and timers
// =============================================================

/// Appends toasts directly to `<body>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodySurface;

impl ToastSurface for BodySurface {
    type Node = web_sys::Element;

    fn append(&self, id: &str, class_name: &str, message: &str) -> Result<web_sys::Element, PanelError> {
        let document = document()?;
        let body = document
            .body()
            .ok_or(PanelError::MissingCapability("document.body"))?;
        let toast = document
            .create_element("div")
            .map_err(|err| PanelError::from_js(&err))?;
        toast.set_class_name(class_name);
        toast.set_text_content(Some(message));
        toast
            .set_attribute("data-toast-id", id)
            .map_err(|err| PanelError::from_js(&err))?;
        toast
            .set_attribute("role", "status")
            .map_err(|err| PanelError::from_js(&err))?;
        body.append_child(&toast)
            .map_err(|err| PanelError::from_js(&err))?;
        Ok(toast)
    }
}

impl ToastNode for web_sys::Element {
    fn add_classes(&self, classes: &[&str]) {
        let list = self.class_list();
        for class in classes {
            if let Err(err) = list.add_1(class) {
                warn!("toast: could not add {class}: {}", PanelError::from_js(&err));
            }
        }
    }

    fn remove(&self) {
        web_sys::Element::remove(self);
    }
}

/// `setTimeout` via `gloo-timers`, clock via `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

// =============================================================
// Host
// =============================================================

/// The real page.
#[derive(Debug)]
pub struct BrowserHost;

impl Host for BrowserHost {
    type Store = LocalStorage;
    type Signal = MediaQuery;
    type Target = DocumentRoot;
    type Clipboard = NavigatorClipboard;
    type Icons = LucideIcons;
    type Surface = BodySurface;
    type Scheduler = BrowserScheduler;
    type Updates = HtmxSwaps;
}

impl BrowserHost {
    pub fn collaborators(config: &PanelConfig) -> Collaborators<Self> {
        Collaborators {
            store: LocalStorage,
            signal: MediaQuery::new(&config.media_query),
            target: DocumentRoot,
            clipboard: NavigatorClipboard,
            icons: LucideIcons,
            surface: BodySurface,
            scheduler: BrowserScheduler,
            updates: HtmxSwaps,
        }
    }
}
