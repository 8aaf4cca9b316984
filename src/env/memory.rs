//! In-memory host environment.
//!
//! Deterministic stand-ins for every browser seam: a key-value map for
//! `localStorage`, a flippable color scheme signal, a class set for `<html>`,
//! a manual clock for timers. Each type is a cheap `Clone` handle over shared
//! state so a test can hand one clone to a component and inspect the other.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::{
    Clipboard, ColorSchemeSignal, ContentElement, IconRenderer, PageUpdates, PreferenceStore,
    Scheduler, Subscription, ThemeTarget, ToastNode, ToastSurface,
};
use crate::boot::{Collaborators, Host};
use crate::error::PanelError;

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

type Listeners<F> = Rc<RefCell<Vec<(u64, Rc<F>)>>>;

fn add_listener<F: ?Sized + 'static>(listeners: &Listeners<F>, next_id: &Cell<u64>, f: Rc<F>) -> Subscription {
    let id = next_id.get();
    next_id.set(id + 1);
    listeners.borrow_mut().push((id, f));
    let listeners = Rc::clone(listeners);
    Subscription::new(move || listeners.borrow_mut().retain(|(other, _)| *other != id))
}

fn snapshot<F: ?Sized>(listeners: &Listeners<F>) -> Vec<Rc<F>> {
    listeners.borrow().iter().map(|(_, f)| Rc::clone(f)).collect()
}

// =============================================================
// Storage
// =============================================================

/// `localStorage` backed by a map. `unavailable()` models a browser with
/// storage disabled.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.insert(key, value);
        store
    }

    /// Write directly, bypassing the panel (another tab or devtools).
    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    /// Clear a key the way the user clearing site data would.
    pub fn clear(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PanelError> {
        if self.unavailable {
            return Err(PanelError::MissingCapability("localStorage"));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PanelError> {
        if self.unavailable {
            return Err(PanelError::MissingCapability("localStorage"));
        }
        self.insert(key, value);
        Ok(())
    }
}

// =============================================================
// Color scheme
// =============================================================

/// Color scheme preference that tests flip by hand.
#[derive(Clone, Default)]
pub struct MemorySignal {
    prefers_dark: Rc<Cell<Option<bool>>>,
    listeners: Listeners<dyn Fn(bool)>,
    next_id: Rc<Cell<u64>>,
}

impl MemorySignal {
    pub fn new(prefers_dark: bool) -> Self {
        let signal = Self::default();
        signal.prefers_dark.set(Some(prefers_dark));
        signal
    }

    /// No media query support: reads `None`, subscriptions never fire.
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// Flip the OS preference and notify listeners if it changed.
    pub fn set(&self, prefers_dark: bool) {
        if self.prefers_dark.get().is_none() || self.prefers_dark.get() == Some(prefers_dark) {
            return;
        }
        self.prefers_dark.set(Some(prefers_dark));
        for listener in snapshot(&self.listeners) {
            listener(prefers_dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ColorSchemeSignal for MemorySignal {
    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark.get()
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        if self.prefers_dark.get().is_none() {
            return Subscription::noop();
        }
        add_listener(&self.listeners, &self.next_id, Rc::from(on_change))
    }
}

// =============================================================
// Root class list
// =============================================================

#[derive(Clone, Debug, Default)]
pub struct ClassSet(Rc<RefCell<BTreeSet<String>>>);

impl ClassSet {
    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().iter().cloned().collect()
    }
}

impl ThemeTarget for ClassSet {
    fn set_class(&self, class: &str, present: bool) {
        let mut classes = self.0.borrow_mut();
        if present {
            classes.insert(class.to_owned());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().contains(class)
    }
}

// =============================================================
// Elements, icons, page updates
// =============================================================

/// A button-like element holding inner HTML.
#[derive(Clone, Debug, Default)]
pub struct MemoryElement(Rc<RefCell<String>>);

impl MemoryElement {
    pub fn new(html: &str) -> Self {
        Self(Rc::new(RefCell::new(html.to_owned())))
    }
}

impl ContentElement for MemoryElement {
    fn inner_html(&self) -> String {
        self.0.borrow().clone()
    }

    fn set_inner_html(&self, html: &str) {
        *self.0.borrow_mut() = html.to_owned();
    }
}

/// Icon renderer that counts invocations.
#[derive(Clone, Debug, Default)]
pub struct CountingIcons(Rc<Cell<usize>>);

impl CountingIcons {
    pub fn renders(&self) -> usize {
        self.0.get()
    }
}

impl IconRenderer for CountingIcons {
    fn render_icons(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Partial-page-update source fired by hand.
#[derive(Clone, Default)]
pub struct ManualUpdates {
    listeners: Listeners<dyn Fn()>,
    next_id: Rc<Cell<u64>>,
}

impl ManualUpdates {
    pub fn fire(&self) {
        for listener in snapshot(&self.listeners) {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl PageUpdates for ManualUpdates {
    fn on_swap(&self, callback: Box<dyn Fn()>) -> Subscription {
        add_listener(&self.listeners, &self.next_id, Rc::from(callback))
    }
}

// =============================================================
// Clipboard
// =============================================================

/// Clipboard that records writes, or rejects them after `deny()`.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    writes: Rc<RefCell<Vec<String>>>,
    denied: Rc<Cell<bool>>,
}

impl MemoryClipboard {
    pub fn deny(&self) {
        self.denied.set(true);
    }

    pub fn contents(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PanelError>> {
        let result = if self.denied.get() {
            Err(PanelError::Clipboard("NotAllowedError: write permission denied".to_owned()))
        } else {
            self.writes.borrow_mut().push(text.to_owned());
            Ok(())
        };
        futures::future::ready(result).boxed_local()
    }
}

// =============================================================
// Toast container
// =============================================================

/// What a mounted toast looks like at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastSnapshot {
    pub id: String,
    pub class_name: String,
    pub message: String,
}

impl ToastSnapshot {
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    mounted: Rc<RefCell<Vec<ToastSnapshot>>>,
    detached: bool,
}

impl MemorySurface {
    /// A page with no `<body>` to mount into.
    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    pub fn mounted(&self) -> Vec<ToastSnapshot> {
        self.mounted.borrow().clone()
    }
}

impl ToastSurface for MemorySurface {
    type Node = MemoryNode;

    fn append(&self, id: &str, class_name: &str, message: &str) -> Result<MemoryNode, PanelError> {
        if self.detached {
            return Err(PanelError::MissingCapability("document.body"));
        }
        self.mounted.borrow_mut().push(ToastSnapshot {
            id: id.to_owned(),
            class_name: class_name.to_owned(),
            message: message.to_owned(),
        });
        Ok(MemoryNode {
            id: id.to_owned(),
            mounted: Rc::clone(&self.mounted),
        })
    }
}

#[derive(Clone, Debug)]
pub struct MemoryNode {
    id: String,
    mounted: Rc<RefCell<Vec<ToastSnapshot>>>,
}

impl ToastNode for MemoryNode {
    fn add_classes(&self, classes: &[&str]) {
        let mut mounted = self.mounted.borrow_mut();
        if let Some(toast) = mounted.iter_mut().find(|t| t.id == self.id) {
            for class in classes {
                toast.class_name.push(' ');
                toast.class_name.push_str(class);
            }
        }
    }

    fn remove(&self) {
        self.mounted.borrow_mut().retain(|t| t.id != self.id);
    }
}

// =============================================================
// Timers
// =============================================================

struct PendingTask {
    due_ms: f64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Timeline {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Clock that only moves when `advance` is called. Tasks run in due order,
/// ties broken by scheduling order, and tasks scheduled while advancing run in
/// the same call if they fall inside the window.
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<Timeline>>);

impl ManualScheduler {
    pub fn advance(&self, by: Duration) {
        let target = self.0.borrow().now_ms + by.as_secs_f64() * 1000.0;
        while let Some(task) = self.pop_due(target) {
            task();
        }
        self.0.borrow_mut().now_ms = target;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }

    fn pop_due(&self, target: f64) -> Option<Box<dyn FnOnce()>> {
        let mut timeline = self.0.borrow_mut();
        let next = timeline
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= target)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(index, _)| index)?;
        let entry = timeline.pending.swap_remove(next);
        timeline.now_ms = entry.due_ms;
        Some(entry.task)
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.0.borrow().now_ms
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut timeline = self.0.borrow_mut();
        let due_ms = timeline.now_ms + delay.as_secs_f64() * 1000.0;
        let seq = timeline.next_seq;
        timeline.next_seq += 1;
        timeline.pending.push(PendingTask { due_ms, seq, task });
    }
}

// =============================================================
// Whole page
// =============================================================

/// Host whose collaborators are the in-memory types above.
#[derive(Debug)]
pub struct MemoryHost;

impl Host for MemoryHost {
    type Store = MemoryStore;
    type Signal = MemorySignal;
    type Target = ClassSet;
    type Clipboard = MemoryClipboard;
    type Icons = CountingIcons;
    type Surface = MemorySurface;
    type Scheduler = ManualScheduler;
    type Updates = ManualUpdates;
}

/// One simulated page. Hand `collaborators()` to `boot` and keep the page to
/// drive and inspect it.
#[derive(Clone, Default)]
pub struct MemoryPage {
    pub store: MemoryStore,
    pub signal: MemorySignal,
    pub root: ClassSet,
    pub clipboard: MemoryClipboard,
    pub icons: CountingIcons,
    pub surface: MemorySurface,
    pub clock: ManualScheduler,
    pub updates: ManualUpdates,
}

impl MemoryPage {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            signal: MemorySignal::new(prefers_dark),
            ..Self::default()
        }
    }

    pub fn collaborators(&self) -> Collaborators<MemoryHost> {
        Collaborators {
            store: self.store.clone(),
            signal: self.signal.clone(),
            target: self.root.clone(),
            clipboard: self.clipboard.clone(),
            icons: self.icons.clone(),
            surface: self.surface.clone(),
            scheduler: self.clock.clone(),
            updates: self.updates.clone(),
        }
    }
}
