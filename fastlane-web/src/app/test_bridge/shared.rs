use crate::app::state::AppState;
use crate::app::view::{enter_scene, project_selected};
use crate::game::{DynGameStateManager, ProjectCatalog, Scene};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BridgeSnapshot {
    pub scene: String,
    pub visited: Vec<String>,
    pub badges: Vec<String>,
    pub timer_running: bool,
    pub best_lap: Option<u64>,
    pub lap_records: usize,
}

pub(super) fn snapshot(manager: &DynGameStateManager) -> BridgeSnapshot {
    BridgeSnapshot {
        scene: manager.current_scene().name().to_string(),
        visited: manager.visited_projects().into_iter().collect(),
        badges: manager.badges().iter().map(|b| b.id.clone()).collect(),
        timer_running: manager.state().is_timer_running,
        best_lap: manager.best_lap_time(),
        lap_records: manager.lap_records().len(),
    }
}

/// Visit a project the way a marker click does. Returns whether it was new.
pub(super) fn visit(state: &AppState, id: &str) -> bool {
    let Some(project) = ProjectCatalog::default_catalog().get(id) else {
        log::warn!("test bridge: no project {id:?}");
        return false;
    };
    let fresh = state.manager.with_mut(|m| m.visit_project(id));
    if fresh {
        project_selected(state, &project.title);
    }
    fresh
}

pub(super) fn reset_lap(state: &AppState) {
    state.manager.with_mut(|m| m.reset_timer());
    state.lap_dialog.set(None);
    state.refresh();
}

pub(super) fn clear(state: &AppState) {
    state.manager.with_mut(|m| m.clear_data());
    state.lap_dialog.set(None);
    state.toast.set(None);
    enter_scene(state, Scene::Garage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ManagerHandle, use_app_state_with};
    use crate::game::{GameStateManager, ManualClock, MemoryStore, Theme};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew::prelude::*;

    fn manager(clock: ManualClock) -> ManagerHandle {
        ManagerHandle::new(GameStateManager::new(
            Box::new(MemoryStore::new()),
            Box::new(clock),
            Theme::Dark,
        ))
    }

    #[test]
    fn snapshot_reports_progress() {
        let handle = manager(ManualClock::starting_at(0));
        handle.with_mut(|m| {
            m.set_current_scene(Scene::Track);
            m.visit_project("race-control-api");
        });
        let snap = handle.with(snapshot);
        assert_eq!(snap.scene, "track");
        assert_eq!(snap.visited, ["race-control-api"]);
        assert_eq!(snap.badges, ["visited-race-control-api"]);
        assert!(snap.timer_running);
        assert_eq!(snap.best_lap, None);
        assert_eq!(snap.lap_records, 0);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["timerRunning"], true);
        assert_eq!(json["lapRecords"], 0);
    }

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        manager: ManagerHandle,
    }

    #[function_component(BridgeHarness)]
    fn bridge_harness(props: &HarnessProps) -> Html {
        let manager = props.manager.clone();
        let state = use_app_state_with(None, move || manager);
        let ran = use_mut_ref(|| false);
        if !*ran.borrow() {
            *ran.borrow_mut() = true;
            enter_scene(&state, Scene::Track);
            for id in ProjectCatalog::default_catalog().ids() {
                assert!(visit(&state, id));
            }
            assert!(!visit(&state, "race-control-api"));
            assert!(!visit(&state, "no-such-project"));
            reset_lap(&state);
            clear(&state);
        }
        Html::default()
    }

    #[test]
    fn bridge_actions_drive_the_manager() {
        let clock = ManualClock::starting_at(1_000);
        let handle = manager(clock);
        let props = HarnessProps {
            manager: handle.clone(),
        };
        let _ = block_on(LocalServerRenderer::<BridgeHarness>::with_props(props).render());
        let snap = handle.with(snapshot);
        assert_eq!(snap.scene, "garage");
        assert!(snap.visited.is_empty());
        assert!(snap.badges.is_empty());
        assert_eq!(snap.lap_records, 0);
    }
}
