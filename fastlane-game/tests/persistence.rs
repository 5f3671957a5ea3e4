use fastlane_game::constants::{SCHEMA_VERSION, STORAGE_KEY};
use fastlane_game::{GameStateManager, ManualClock, MemoryStore, Scene, StorageData, Theme};

#[test]
fn reload_reproduces_state() {
    let store = MemoryStore::new();
    let clock = ManualClock::starting_at(1_000);
    let mut mgr = GameStateManager::new(store.clone(), clock.clone(), Theme::Dark);
    mgr.set_current_scene(Scene::Track);
    for id in ["delta", "alpha", "charlie"] {
        clock.advance(2_000);
        mgr.visit_project(id);
    }
    mgr.toggle_theme();

    let reloaded = GameStateManager::new(store, clock.clone(), Theme::Dark);
    assert_eq!(reloaded.state(), mgr.state());
    assert_eq!(reloaded.lap_records(), mgr.lap_records());
    assert_eq!(reloaded.settings(), mgr.settings());
    assert_eq!(reloaded.theme(), Theme::Light);

    clock.advance(1_000);
    assert_eq!(reloaded.current_lap_time(), 7_000);
}

#[test]
fn stored_document_is_versioned_camel_case() {
    let store = MemoryStore::new();
    let mut mgr = GameStateManager::new(store.clone(), ManualClock::starting_at(42), Theme::Dark);
    mgr.set_current_scene(Scene::Track);
    mgr.visit_project("alpha");

    let raw = store.raw(STORAGE_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], SCHEMA_VERSION);
    assert_eq!(value["gameState"]["currentScene"], "track");
    assert_eq!(value["gameState"]["visitedProjects"][0], "alpha");
    assert_eq!(value["gameState"]["lapStartTime"], 42);
    assert_eq!(value["gameState"]["isTimerRunning"], true);
    assert_eq!(value["settings"]["a11y"]["announcements"], true);
    assert!(value["lapRecords"].as_array().unwrap().is_empty());
}

#[test]
fn legacy_document_loads_and_is_rewritten() {
    let legacy = r#"{
        "gameState": {"currentScene": "contact", "visitedProjects": ["alpha"], "bestLapTime": 90000, "theme": "light"},
        "lapRecords": [],
        "settings": {"theme": "light", "audio": false, "a11y": {"reduceMotion": true, "highContrast": false, "announcements": true}}
    }"#;
    let store = MemoryStore::with_entry(STORAGE_KEY, legacy);
    let mut mgr = GameStateManager::new(store.clone(), ManualClock::default(), Theme::Dark);
    assert_eq!(mgr.current_scene(), Scene::Contact);
    assert_eq!(mgr.best_lap_time(), Some(90_000));
    assert!(!mgr.settings().audio);

    mgr.set_current_scene(Scene::Garage);
    let (data, repairs) = StorageData::parse(&store.raw(STORAGE_KEY).unwrap()).unwrap();
    assert!(repairs.is_empty());
    assert_eq!(data.version, SCHEMA_VERSION);
}

#[test]
fn corrupt_document_falls_back_to_defaults() {
    let store = MemoryStore::with_entry(STORAGE_KEY, "{\"gameState\": ");
    let mgr = GameStateManager::new(store, ManualClock::default(), Theme::Light);
    assert_eq!(mgr.current_scene(), Scene::Garage);
    assert_eq!(mgr.theme(), Theme::Light);
    assert!(mgr.badges().is_empty());
}

#[test]
fn running_timer_without_start_is_repaired_on_load() {
    let raw = r#"{"version": 1, "gameState": {"isTimerRunning": true, "lapStartTime": null}}"#;
    let store = MemoryStore::with_entry(STORAGE_KEY, raw);
    let mut mgr = GameStateManager::new(store, ManualClock::default(), Theme::Dark);
    assert!(!mgr.state().is_timer_running);
    assert_eq!(mgr.stop_lap_timer(), None);
    assert_eq!(mgr.current_lap_time(), 0);
}

#[test]
fn one_bad_lap_record_does_not_discard_progress() {
    let raw = r#"{"version": 1,
        "gameState": {
            "currentScene": "contact",
            "visitedProjects": ["alpha"],
            "bestLapTime": 42000,
            "badges": [
                {"id": "visited-alpha", "name": "Pit Stop Complete", "description": "d", "icon": "🏁", "earnedAt": "2024-01-01T00:00:00Z", "category": "exploration"}
            ]
        },
        "lapRecords": [{"time": 42000}]
    }"#;
    let store = MemoryStore::with_entry(STORAGE_KEY, raw);
    let mgr = GameStateManager::new(store, ManualClock::default(), Theme::Dark);
    assert_eq!(mgr.current_scene(), Scene::Contact);
    assert_eq!(mgr.best_lap_time(), Some(42_000));
    assert_eq!(mgr.badges().len(), 1);
    assert!(mgr.is_project_visited("alpha"));
    assert!(mgr.lap_records().is_empty());
}
