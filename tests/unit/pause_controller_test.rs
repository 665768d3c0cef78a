//! Unit tests for the pause controller lifecycle across restarts.

use std::sync::Arc;

use debloat::catalog::PAUSE_DURATION_MS;
use debloat::database::connection::Database;
use debloat::services::pause_controller::PauseController;
use debloat::services::rule_engine::{InMemoryRuleEngine, RuleEngine};
use debloat::services::settings_store::{SettingsStore, SettingsStoreTrait};
use debloat::types::settings::SettingsPatch;

fn store_on(db: Arc<Database>) -> SettingsStore {
    SettingsStore::new(db)
}

#[test]
fn default_duration_is_one_hour() {
    assert_eq!(PAUSE_DURATION_MS, 3_600_000);
}

#[test]
fn pause_survives_process_restart() {
    let db = Arc::new(Database::open_in_memory().unwrap());

    // First process: pause.
    {
        let store = store_on(db.clone());
        let mut rules = InMemoryRuleEngine::with_enabled(vec!["sponsored".to_string()]);
        let mut pause = PauseController::new();
        pause
            .pause(PAUSE_DURATION_MS, &store, &mut rules, 1_000)
            .unwrap();
    }

    // Second process: engine state reset, controller state gone.
    let store = store_on(db);
    let mut rules = InMemoryRuleEngine::with_enabled(vec!["sponsored".to_string()]);
    let mut pause = PauseController::new();
    let paused = pause.restore(&store, &mut rules, 2_000).unwrap();
    assert!(paused);
    assert!(rules.enabled_rule_groups().unwrap().is_empty());
    assert_eq!(pause.deadline(), Some(1_000 + PAUSE_DURATION_MS));
}

#[test]
fn restore_after_deadline_clears_persisted_pause() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let store = store_on(db);
    store
        .patch(SettingsPatch {
            pause_until: Some(Some(10_000)),
            ..Default::default()
        })
        .unwrap();

    let mut rules = InMemoryRuleEngine::with_enabled(vec!["shopping".to_string()]);
    let mut pause = PauseController::new();
    assert!(!pause.restore(&store, &mut rules, 20_000).unwrap());
    assert_eq!(store.load().unwrap().pause_until, None);
    // Expired pause leaves the engine alone for the follow-up reconcile.
    assert_eq!(rules.enabled_rule_groups().unwrap(), vec!["shopping"]);
}

#[test]
fn poll_fires_exactly_once() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let store = store_on(db);
    let mut rules = InMemoryRuleEngine::new();
    let mut pause = PauseController::new();
    pause.pause(5_000, &store, &mut rules, 0).unwrap();

    assert!(!pause.poll(&store, 4_999).unwrap());
    assert!(pause.poll(&store, 5_000).unwrap());
    assert!(!pause.poll(&store, 5_001).unwrap());
}

#[test]
fn repausing_replaces_the_deadline() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let store = store_on(db);
    let mut rules = InMemoryRuleEngine::new();
    let mut pause = PauseController::new();

    pause.pause(5_000, &store, &mut rules, 0).unwrap();
    pause.pause(60_000, &store, &mut rules, 1_000).unwrap();
    assert_eq!(pause.deadline(), Some(61_000));
    assert_eq!(store.load().unwrap().pause_until, Some(61_000));

    // The earlier deadline must not fire.
    assert!(!pause.poll(&store, 5_000).unwrap());
    assert!(pause.poll(&store, 61_000).unwrap());
}

#[test]
fn is_paused_boundary_is_exclusive() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let store = store_on(db);
    store
        .patch(SettingsPatch {
            pause_until: Some(Some(1_000)),
            ..Default::default()
        })
        .unwrap();
    let settings = store.load().unwrap();
    assert!(PauseController::is_paused(&settings, 999));
    assert!(!PauseController::is_paused(&settings, 1_000));
}
