//! One-time wiring between the shell and the browser: initial scene,
//! state observers, and window-level listeners.
use crate::app::state::AppState;
use crate::game::StateEvent;
#[cfg(target_arch = "wasm32")]
use crate::scenes::Viewport;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use crate::dom::EventListener;
use yew::prelude::*;

/// Persist the scene the shell mounted first and announce it.
pub fn settle_initial_scene(state: &AppState) {
    let scene = *state.scene;
    state.manager.with_mut(|m| m.set_current_scene(scene));
    state.announce(crate::a11y::scene_announcement(scene));
    state.refresh();
}

/// Log line for a state event, when it is worth one.
#[must_use]
pub fn describe_event(event: &StateEvent) -> Option<String> {
    match event {
        StateEvent::LapStarted => Some(String::from("lap timer started")),
        StateEvent::LapCompleted { time, new_best } => Some(format!(
            "lap completed in {}{}",
            crate::game::format_lap_time(*time),
            if *new_best { " (new best)" } else { "" }
        )),
        StateEvent::LapReset => Some(String::from("lap reset")),
        StateEvent::DataCleared => Some(String::from("progress cleared")),
        StateEvent::SceneChanged(_) | StateEvent::ThemeChanged(_) | StateEvent::BadgeAwarded(_) => {
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn observe(event: &StateEvent) {
    if let StateEvent::ThemeChanged(theme) = event {
        crate::a11y::set_theme_attr(*theme);
    }
    if let Some(line) = describe_event(event) {
        log::info!("{line}");
    }
}

#[cfg(target_arch = "wasm32")]
fn current_viewport() -> Viewport {
    crate::dom::viewport_size()
        .map_or_else(Viewport::default, |(width, height)| Viewport { width, height })
}

#[cfg(target_arch = "wasm32")]
fn install_listeners(state: &AppState) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    let Some(win) = crate::dom::window() else {
        return listeners;
    };

    if let Some(mql) = win
        .match_media(crate::a11y::DARK_SCHEME_QUERY)
        .ok()
        .flatten()
    {
        let state = state.clone();
        listeners.extend(EventListener::attach(&mql, "change", move |event| {
            let Some(change) = event.dyn_ref::<web_sys::MediaQueryListEvent>() else {
                return;
            };
            let theme = crate::a11y::theme_for_dark_match(change.matches());
            if state.manager.with_mut(|m| m.follow_system_theme(theme)) {
                state.refresh();
            }
        }));
    }

    let viewport = state.viewport.clone();
    viewport.set(current_viewport());
    listeners.extend(EventListener::attach(&win, "resize", move |_| {
        viewport.set(current_viewport());
    }));

    if let Some(doc) = crate::dom::document() {
        let paused = state.paused.clone();
        paused.set(doc.hidden());
        listeners.extend(EventListener::attach(&doc, "visibilitychange", move |_| {
            paused.set(crate::dom::document_hidden());
        }));
    }

    let banner = state.error_banner.clone();
    listeners.extend(EventListener::attach(&win, "error", move |event| {
        let detail = event
            .dyn_ref::<web_sys::ErrorEvent>()
            .map(web_sys::ErrorEvent::message)
            .unwrap_or_default();
        log::error!("runtime error: {detail}");
        banner.set(Some(AttrValue::from(crate::app::shell::RUNTIME_ERROR_MESSAGE)));
    }));

    let banner = state.error_banner.clone();
    listeners.extend(EventListener::attach(&win, "unhandledrejection", move |event| {
        let detail = event
            .dyn_ref::<web_sys::PromiseRejectionEvent>()
            .map(|rejection| crate::dom::js_error_message(&rejection.reason()))
            .unwrap_or_default();
        log::error!("unhandled rejection: {detail}");
        banner.set(Some(AttrValue::from(crate::app::shell::REJECTION_MESSAGE)));
    }));

    listeners
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();
    use_effect_with((), move |()| {
        settle_initial_scene(&state);
        let (theme, a11y) = state.manager.with(|m| (m.theme(), m.settings().a11y));
        crate::a11y::set_theme_attr(theme);
        crate::a11y::apply_a11y_classes(a11y);
        let subscription = state.manager.with_mut(|m| m.subscribe(observe));
        let listeners = install_listeners(&state);
        let manager = state.manager.clone();
        move || {
            drop(listeners);
            manager.with_mut(|m| m.unsubscribe(subscription));
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();
    use_effect_with((), move |()| {
        settle_initial_scene(&state);
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ManagerHandle, use_app_state_with};
    use crate::game::{GameStateManager, ManualClock, MemoryStore, Scene, Theme};
    use crate::router::Route;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn lap_events_are_described() {
        assert_eq!(
            describe_event(&StateEvent::LapCompleted {
                time: 65_000,
                new_best: true
            })
            .as_deref(),
            Some("lap completed in 1:05.00 (new best)")
        );
        assert_eq!(describe_event(&StateEvent::SceneChanged(Scene::Track)), None);
        assert!(describe_event(&StateEvent::DataCleared).is_some());
    }

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        manager: ManagerHandle,
    }

    #[function_component(SettleHarness)]
    fn settle_harness(props: &HarnessProps) -> Html {
        let manager = props.manager.clone();
        let state = use_app_state_with(Some(Route::Track), move || manager);
        let settled = use_mut_ref(|| false);
        if !*settled.borrow() {
            *settled.borrow_mut() = true;
            settle_initial_scene(&state);
        }
        html! { <span>{ state.scene.name() }</span> }
    }

    #[test]
    fn deep_link_to_track_starts_the_timer() {
        let manager = ManagerHandle::new(GameStateManager::new(
            Box::new(MemoryStore::new()),
            Box::new(ManualClock::starting_at(1_000)),
            Theme::Dark,
        ));
        let props = HarnessProps {
            manager: manager.clone(),
        };
        let html = block_on(LocalServerRenderer::<SettleHarness>::with_props(props).render());
        assert!(html.contains("track"));
        assert_eq!(manager.with(|m| m.current_scene()), Scene::Track);
        assert!(manager.with(|m| m.state().is_timer_running));
    }
}
