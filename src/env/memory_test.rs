use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn scheduler_runs_tasks_in_due_order() {
    let scheduler = ManualScheduler::default();
    let order = Rc::new(RefCell::new(Vec::new()));
    for (label, ms) in [("late", 300), ("early", 100), ("tie", 100)] {
        let order = Rc::clone(&order);
        scheduler.schedule(Duration::from_millis(ms), Box::new(move || order.borrow_mut().push(label)));
    }
    scheduler.advance_ms(99);
    assert!(order.borrow().is_empty());
    scheduler.advance_ms(1);
    assert_eq!(*order.borrow(), vec!["early", "tie"]);
    scheduler.advance_ms(200);
    assert_eq!(*order.borrow(), vec!["early", "tie", "late"]);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn scheduler_runs_nested_tasks_inside_the_window() {
    let scheduler = ManualScheduler::default();
    let fired_at = Rc::new(Cell::new(None));
    let inner_scheduler = scheduler.clone();
    let seen = Rc::clone(&fired_at);
    scheduler.schedule(
        Duration::from_millis(100),
        Box::new(move || {
            let clock = inner_scheduler.clone();
            inner_scheduler.schedule(Duration::from_millis(50), Box::new(move || seen.set(Some(clock.now_ms()))));
        }),
    );
    scheduler.advance_ms(1000);
    assert_eq!(fired_at.get(), Some(150.0));
    assert_eq!(scheduler.now_ms(), 1000.0);
}

// =============================================================
// Storage and signal
// =============================================================

#[test]
fn unavailable_store_reports_missing_capability() {
    let store = MemoryStore::unavailable();
    assert_eq!(store.get("darkMode"), Err(PanelError::MissingCapability("localStorage")));
    assert!(store.set("darkMode", "true").is_err());
}

#[test]
fn store_clones_share_entries() {
    let store = MemoryStore::default();
    let other = store.clone();
    store.set("darkMode", "false").expect("write");
    assert_eq!(other.get("darkMode"), Ok(Some("false".to_owned())));
    other.clear("darkMode");
    assert_eq!(store.get("darkMode"), Ok(None));
}

#[test]
fn signal_notifies_only_on_change_and_stops_after_drop() {
    let signal = MemorySignal::new(false);
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&calls);
    let sub = signal.subscribe(Box::new(move |dark| seen.borrow_mut().push(dark)));
    signal.set(false);
    signal.set(true);
    assert_eq!(*calls.borrow(), vec![true]);
    drop(sub);
    assert_eq!(signal.listener_count(), 0);
    signal.set(false);
    assert_eq!(*calls.borrow(), vec![true]);
}

#[test]
fn unsupported_signal_reads_none() {
    let signal = MemorySignal::unsupported();
    assert_eq!(signal.prefers_dark(), None);
    let _sub = signal.subscribe(Box::new(|_| {}));
    assert_eq!(signal.listener_count(), 0);
}

// =============================================================
// Clipboard and surface
// =============================================================

#[test]
fn clipboard_records_or_rejects_writes() {
    let clipboard = MemoryClipboard::default();
    assert_eq!(block_on(clipboard.write_text("abc")), Ok(()));
    assert_eq!(clipboard.contents().as_deref(), Some("abc"));
    clipboard.deny();
    assert!(matches!(block_on(clipboard.write_text("def")), Err(PanelError::Clipboard(_))));
    assert_eq!(clipboard.writes(), 1);
}

#[test]
fn surface_nodes_update_and_remove_their_own_entry() {
    let surface = MemorySurface::default();
    let first = surface.append("a", "fixed", "one").expect("mount");
    let _second = surface.append("b", "fixed", "two").expect("mount");
    first.add_classes(&["opacity-0"]);
    let mounted = surface.mounted();
    assert!(mounted[0].has_class("opacity-0"));
    assert!(!mounted[1].has_class("opacity-0"));
    first.remove();
    assert_eq!(surface.mounted().len(), 1);
    assert_eq!(surface.mounted()[0].id, "b");
}

#[test]
fn detached_surface_refuses_to_mount() {
    assert!(MemorySurface::detached().append("a", "fixed", "one").is_err());
}
