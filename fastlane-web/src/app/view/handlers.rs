use crate::app::shell::{ShellEvent, pit_stop_feedback, resolve_scene};
use crate::app::state::AppState;
use crate::game::Scene;
use yew::prelude::*;

/// Move the shell to `scene`: persist it, remount the scene component, and
/// announce the change.
pub fn enter_scene(state: &AppState, scene: Scene) {
    state.manager.with_mut(|m| m.set_current_scene(scene));
    state.scene.set(scene);
    state.mount_epoch.dispatch(());
    state.announce(crate::a11y::scene_announcement(scene));
    state.refresh();
}

/// Toast and lap dialog after a scene reported a new pit stop.
pub fn project_selected(state: &AppState, title: &str) {
    let (count, last_lap) = state
        .manager
        .with(|m| (m.visited_count(), m.last_lap_time()));
    let feedback = pit_stop_feedback(title, count, last_lap);
    state.toast.set(Some(feedback.toast));
    if let Some(time) = feedback.lap_time {
        state.lap_dialog.set(Some(time));
    }
    state.refresh();
}

#[derive(Clone)]
pub struct AppHandlers {
    pub shell_event: Callback<ShellEvent>,
    pub another_lap: Callback<()>,
    pub contact_me: Callback<()>,
    pub close_lap_dialog: Callback<()>,
    pub dismiss_toast: Callback<()>,
    pub dismiss_error: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            shell_event: build_shell_event(state),
            another_lap: build_another_lap(state),
            contact_me: build_contact_me(state),
            close_lap_dialog: build_close_lap_dialog(state),
            dismiss_toast: build_dismiss_toast(state),
            dismiss_error: build_dismiss_error(state),
        }
    }
}

fn build_shell_event(state: &AppState) -> Callback<ShellEvent> {
    let state = state.clone();
    Callback::from(move |event: ShellEvent| match event {
        ShellEvent::SceneChange { scene } => enter_scene(&state, resolve_scene(&scene)),
        ShellEvent::ProjectSelected { id, title } => {
            log::info!("pit stop at {id}");
            project_selected(&state, &title);
        }
        ShellEvent::Announce { message } => state.announce(message),
    })
}

fn build_another_lap(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        state.lap_dialog.set(None);
        state.manager.with_mut(|m| m.reset_timer());
        enter_scene(&state, Scene::Track);
    })
}

fn build_contact_me(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        state.lap_dialog.set(None);
        enter_scene(&state, Scene::Contact);
    })
}

fn build_close_lap_dialog(state: &AppState) -> Callback<()> {
    let dialog = state.lap_dialog.clone();
    Callback::from(move |()| dialog.set(None))
}

fn build_dismiss_toast(state: &AppState) -> Callback<()> {
    let toast = state.toast.clone();
    Callback::from(move |()| toast.set(None))
}

fn build_dismiss_error(state: &AppState) -> Callback<()> {
    let banner = state.error_banner.clone();
    Callback::from(move |()| banner.set(None))
}
