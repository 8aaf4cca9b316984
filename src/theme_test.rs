use super::*;
use crate::env::memory::{ClassSet, MemorySignal, MemoryStore};

type MemoryTheme = ThemeManager<MemoryStore, MemorySignal, ClassSet>;

fn manager(store: &MemoryStore, signal: &MemorySignal, root: &ClassSet) -> MemoryTheme {
    ThemeManager::new(&PanelConfig::default(), store.clone(), signal.clone(), root.clone())
}

fn store_with(flag: Option<&str>) -> MemoryStore {
    flag.map_or_else(MemoryStore::default, |value| MemoryStore::with_entry("darkMode", value))
}

// =============================================================
// resolve
// =============================================================

#[test]
fn from_stored_reads_flag_values() {
    assert_eq!(ThemePreference::from_stored(Some("true")), ThemePreference::ExplicitDark);
    assert_eq!(ThemePreference::from_stored(Some("false")), ThemePreference::ExplicitLight);
    assert_eq!(ThemePreference::from_stored(None), ThemePreference::Unset);
    assert_eq!(ThemePreference::from_stored(Some("")), ThemePreference::Unset);
    assert_eq!(ThemePreference::from_stored(Some("yes")), ThemePreference::ExplicitLight);
}

#[test]
fn resolve_prefers_explicit_choice_over_os() {
    assert_eq!(resolve(ThemePreference::ExplicitDark, Some(false)), Theme::Dark);
    assert_eq!(resolve(ThemePreference::ExplicitLight, Some(true)), Theme::Light);
    assert_eq!(resolve(ThemePreference::Unset, Some(true)), Theme::Dark);
    assert_eq!(resolve(ThemePreference::Unset, Some(false)), Theme::Light);
    assert_eq!(resolve(ThemePreference::Unset, None), Theme::Light);
}

// =============================================================
// init
// =============================================================

#[test]
fn init_applies_dark_marker_for_every_flag_and_os_combination() {
    for flag in [Some("true"), Some("false"), None] {
        for os_dark in [true, false] {
            let store = store_with(flag);
            let signal = MemorySignal::new(os_dark);
            let root = ClassSet::default();
            let _sub = manager(&store, &signal, &root).init();
            let expected = flag == Some("true") || (flag.is_none() && os_dark);
            assert_eq!(root.has_class("dark"), expected, "flag={flag:?} os_dark={os_dark}");
        }
    }
}

#[test]
fn init_removes_stale_marker_when_resolving_light() {
    let root = ClassSet::default();
    root.set_class("dark", true);
    let _sub = manager(&store_with(Some("false")), &MemorySignal::new(true), &root).init();
    assert!(!root.has_class("dark"));
}

#[test]
fn os_changes_are_ignored_once_a_choice_is_stored() {
    for flag in ["true", "false"] {
        let signal = MemorySignal::new(false);
        let root = ClassSet::default();
        let _sub = manager(&store_with(Some(flag)), &signal, &root).init();
        let before = root.has_class("dark");
        signal.set(true);
        signal.set(false);
        signal.set(true);
        assert_eq!(root.has_class("dark"), before, "flag={flag}");
    }
}

#[test]
fn os_changes_are_followed_without_a_stored_choice() {
    let signal = MemorySignal::new(false);
    let root = ClassSet::default();
    let _sub = manager(&MemoryStore::default(), &signal, &root).init();
    assert!(!root.has_class("dark"));
    signal.set(true);
    assert!(root.has_class("dark"));
    signal.set(false);
    assert!(!root.has_class("dark"));
}

#[test]
fn clearing_the_flag_externally_resumes_following_the_os() {
    let store = store_with(Some("false"));
    let signal = MemorySignal::new(false);
    let root = ClassSet::default();
    let _sub = manager(&store, &signal, &root).init();
    signal.set(true);
    assert!(!root.has_class("dark"));
    store.clear("darkMode");
    signal.set(false);
    signal.set(true);
    assert!(root.has_class("dark"));
}

#[test]
fn dropping_the_subscription_stops_tracking() {
    let signal = MemorySignal::new(false);
    let root = ClassSet::default();
    let sub = manager(&MemoryStore::default(), &signal, &root).init();
    drop(sub);
    signal.set(true);
    assert!(!root.has_class("dark"));
}

#[test]
fn missing_storage_keeps_the_default_light_theme() {
    let signal = MemorySignal::new(true);
    let root = ClassSet::default();
    let theme = manager(&MemoryStore::unavailable(), &signal, &root);
    let _sub = theme.init();
    assert!(!root.has_class("dark"));
    signal.set(false);
    signal.set(true);
    assert!(!root.has_class("dark"));
    assert_eq!(theme.preference(), ThemePreference::Unset);
}

#[test]
fn missing_media_query_support_resolves_light() {
    let root = ClassSet::default();
    let _sub = manager(&MemoryStore::default(), &MemorySignal::unsupported(), &root).init();
    assert!(!root.has_class("dark"));
}

#[test]
fn custom_key_and_class_come_from_config() {
    let config = PanelConfig {
        storage_key: "panelTheme".to_owned(),
        dark_class: "theme-dark".to_owned(),
        ..PanelConfig::default()
    };
    let store = MemoryStore::with_entry("panelTheme", "true");
    let root = ClassSet::default();
    let _sub = ThemeManager::new(&config, store, MemorySignal::new(false), root.clone()).init();
    assert_eq!(root.classes(), vec!["theme-dark".to_owned()]);
}

// =============================================================
// Explicit choice
// =============================================================

#[test]
fn set_dark_persists_and_applies() {
    let store = MemoryStore::default();
    let signal = MemorySignal::new(false);
    let root = ClassSet::default();
    let theme = manager(&store, &signal, &root);
    let _sub = theme.init();

    assert_eq!(theme.set_dark(true), Ok(Theme::Dark));
    assert_eq!(store.value("darkMode").as_deref(), Some("true"));
    assert!(root.has_class("dark"));

    signal.set(true);
    signal.set(false);
    assert!(root.has_class("dark"));

    assert_eq!(theme.set_dark(false), Ok(Theme::Light));
    assert_eq!(store.value("darkMode").as_deref(), Some("false"));
    assert!(!root.has_class("dark"));
}

#[test]
fn toggle_flips_the_applied_theme() {
    let store = MemoryStore::default();
    let root = ClassSet::default();
    let theme = manager(&store, &MemorySignal::new(true), &root);
    let _sub = theme.init();
    assert_eq!(theme.applied(), Theme::Dark);
    assert_eq!(theme.toggle(), Ok(Theme::Light));
    assert_eq!(theme.preference(), ThemePreference::ExplicitLight);
    assert_eq!(theme.toggle(), Ok(Theme::Dark));
    assert_eq!(theme.applied(), Theme::Dark);
}

#[test]
fn set_dark_without_storage_leaves_the_page_alone() {
    let root = ClassSet::default();
    let theme = manager(&MemoryStore::unavailable(), &MemorySignal::new(false), &root);
    let _sub = theme.init();
    assert!(theme.set_dark(true).is_err());
    assert!(!root.has_class("dark"));
}
