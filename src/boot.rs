//! Page startup wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel's pages load one script and call `start()` once the DOM is
//! ready. [`boot`] is that routine with the collaborators passed in: it
//! applies the theme, renders icons, re-renders them after every partial
//! page swap, and hands back the services for later calls.
//!
//! Components are set up independently; a missing capability in one (no
//! storage, no `<body>`) only degrades that component.

use std::rc::Rc;

use log::info;

use crate::clipboard::ClipboardManager;
use crate::config::PanelConfig;
use crate::env::{
    Clipboard, ColorSchemeSignal, IconRenderer, PageUpdates, PreferenceStore, Scheduler,
    Subscription, ThemeTarget, ToastSurface,
};
use crate::theme::ThemeManager;
use crate::toast::{Notify, ToastNotifier};

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

/// Family of collaborator types for one host environment.
pub trait Host: 'static {
    type Store: PreferenceStore + 'static;
    type Signal: ColorSchemeSignal;
    type Target: ThemeTarget + 'static;
    type Clipboard: Clipboard;
    type Icons: IconRenderer + 'static;
    type Surface: ToastSurface + 'static;
    type Scheduler: Scheduler + Clone + 'static;
    type Updates: PageUpdates;
}

/// Concrete collaborators handed to [`boot`].
pub struct Collaborators<H: Host> {
    pub store: H::Store,
    pub signal: H::Signal,
    pub target: H::Target,
    pub clipboard: H::Clipboard,
    pub icons: H::Icons,
    pub surface: H::Surface,
    pub scheduler: H::Scheduler,
    pub updates: H::Updates,
}

pub type PanelTheme<H> = ThemeManager<<H as Host>::Store, <H as Host>::Signal, <H as Host>::Target>;
pub type PanelClipboard<H> =
    ClipboardManager<<H as Host>::Clipboard, <H as Host>::Icons, <H as Host>::Scheduler>;
pub type PanelToasts<H> = ToastNotifier<<H as Host>::Surface, <H as Host>::Scheduler>;

/// Live helpers for one page. Dropping it removes the OS and swap listeners.
pub struct Panel<H: Host> {
    pub theme: PanelTheme<H>,
    pub clipboard: PanelClipboard<H>,
    pub toasts: Rc<PanelToasts<H>>,
    subscriptions: Vec<Subscription>,
}

impl<H: Host> Panel<H> {
    /// Number of listeners this panel keeps registered.
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Initialize every helper for the current page.
pub fn boot<H: Host>(config: &PanelConfig, parts: Collaborators<H>) -> Panel<H> {
    let Collaborators {
        store,
        signal,
        target,
        clipboard,
        icons,
        surface,
        scheduler,
        updates,
    } = parts;

    let theme = ThemeManager::new(config, store, signal, target);
    let theme_listener = theme.init();

    let icons = Rc::new(icons);
    icons.render_icons();
    let swap_icons = Rc::clone(&icons);
    let swap_listener = updates.on_swap(Box::new(move || swap_icons.render_icons()));

    let toasts = Rc::new(ToastNotifier::new(config, surface, scheduler.clone()));
    let clipboard = ClipboardManager::new(config, clipboard, icons, scheduler)
        .with_notifier(Rc::clone(&toasts) as Rc<dyn Notify>);

    info!("panel: helpers ready ({:?} theme)", theme.applied());

    Panel {
        theme,
        clipboard,
        toasts,
        subscriptions: vec![theme_listener, swap_listener],
    }
}
