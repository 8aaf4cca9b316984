use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn dropping_subscription_runs_release() {
    let released = Rc::new(Cell::new(false));
    let flag = Rc::clone(&released);
    let sub = Subscription::new(move || flag.set(true));
    assert!(!released.get());
    drop(sub);
    assert!(released.get());
}

#[test]
fn detached_subscription_never_releases() {
    let released = Rc::new(Cell::new(false));
    let flag = Rc::clone(&released);
    Subscription::new(move || flag.set(true)).detach();
    assert!(!released.get());
}

#[test]
fn noop_subscription_drops_cleanly() {
    let sub = Subscription::noop();
    assert_eq!(format!("{sub:?}"), "Subscription { active: false }");
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::default();
    let seen_by_task = token.clone();
    assert!(!seen_by_task.is_cancelled());
    token.cancel();
    assert!(seen_by_task.is_cancelled());
}
