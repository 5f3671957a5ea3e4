//! Saved progress: reloads and documents written by older builds.
use anyhow::{Context, Result, ensure};
use fastlane_game::constants::{SCHEMA_VERSION, STORAGE_KEY};
use fastlane_game::{MemoryStore, Scene};

use super::LogicScenario;
use crate::logic::LapRig;

pub fn persistence_roundtrip_scenario() -> LogicScenario {
    LogicScenario::new("Progress Survives Reload", persistence_roundtrip_check)
}

fn persistence_roundtrip_check(rig: &mut LapRig) -> Result<()> {
    let lap = rig.run_lap();
    rig.manager.toggle_theme();
    rig.manager.set_current_scene(Scene::Contact);

    let reloaded = rig.reload();
    let m = &rig.manager;
    ensure!(
        reloaded.current_scene() == Scene::Contact,
        "reload landed in {}",
        reloaded.current_scene()
    );
    ensure!(reloaded.best_lap_time() == Some(lap), "best lap lost on reload");
    ensure!(reloaded.badges() == m.badges(), "badges changed on reload");
    ensure!(reloaded.lap_records() == m.lap_records(), "lap records changed on reload");
    ensure!(reloaded.visited_projects() == m.visited_projects(), "visits changed on reload");
    ensure!(reloaded.theme() == m.theme(), "theme choice lost on reload");
    Ok(())
}

pub fn legacy_migration_scenario() -> LogicScenario {
    LogicScenario::new("Legacy Save Migration", legacy_migration_check)
}

/// An unversioned document: a visited set that serialised as `{}`, null
/// badges and records, and a running timer with no start time.
fn legacy_document(best_lap: u64) -> String {
    format!(
        r#"{{"gameState":{{"currentScene":"track","visitedProjects":{{}},"badges":null,"bestLapTime":{best_lap},"isTimerRunning":true}},"lapRecords":null}}"#
    )
}

fn legacy_migration_check(rig: &mut LapRig) -> Result<()> {
    let best_lap = 30_000 + rig.random_below(90_000);
    let store = MemoryStore::with_entry(STORAGE_KEY, &legacy_document(best_lap));
    let mut legacy = LapRig::with_store(best_lap, store);

    let m = &legacy.manager;
    ensure!(m.current_scene() == Scene::Track, "scene lost in migration");
    ensure!(m.best_lap_time() == Some(best_lap), "best lap lost in migration");
    ensure!(m.visited_count() == 0, "object-shaped visits should migrate to none");
    ensure!(m.badges().is_empty(), "null badges should migrate to none");
    ensure!(m.lap_records().is_empty(), "null lap records should migrate to none");
    ensure!(!m.state().is_timer_running, "timer without a start time should be stopped");

    legacy.manager.set_current_scene(Scene::Garage);
    let stored = legacy
        .stored_document()
        .context("migrated progress was not written back")?;
    let value: serde_json::Value = serde_json::from_str(&stored)?;
    ensure!(
        value["version"] == SCHEMA_VERSION,
        "stored version is {}, expected {SCHEMA_VERSION}",
        value["version"]
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_checks_pass_for_several_seeds() {
        for seed in [0, 9, 2024] {
            persistence_roundtrip_check(&mut LapRig::new(seed)).unwrap();
            legacy_migration_check(&mut LapRig::new(seed)).unwrap();
        }
    }

    #[test]
    fn legacy_document_has_no_version() {
        let value: serde_json::Value = serde_json::from_str(&legacy_document(61_000)).unwrap();
        assert!(value.get("version").is_none());
        assert_eq!(value["gameState"]["bestLapTime"], 61_000);
    }
}
