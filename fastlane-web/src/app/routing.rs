#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
use crate::game::Scene;
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

/// Route to push after the scene changed, if the address bar disagrees.
#[must_use]
pub fn next_route_for_scene(scene: Scene, current_route: Option<&Route>) -> Option<Route> {
    let new_route = Route::from_scene(scene);
    if Some(&new_route) == current_route {
        None
    } else {
        Some(new_route)
    }
}

/// Scene to enter after the route changed (back/forward, typed URL).
///
/// Only a route that differs from the last one seen counts, so the initial
/// render and our own pushes never bounce the scene around.
#[must_use]
pub fn next_scene_for_route(
    current_scene: Scene,
    previous_route: Option<&Route>,
    route: Option<&Route>,
) -> Option<Scene> {
    let route = route?;
    if Some(route) == previous_route {
        return None;
    }
    let new_scene = route.to_scene();
    (new_scene != current_scene).then_some(new_scene)
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_scene(
    scene: &UseStateHandle<Scene>,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    use_effect_with(**scene, move |scene| {
        if let (Some(nav), Some(new_route)) = (
            navigator.as_ref(),
            next_route_for_scene(*scene, active_route.as_ref()),
        ) {
            nav.push(&new_route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_scene_with_route(state: &AppState, route: Option<Route>) {
    let state = state.clone();
    let previous = use_mut_ref(|| route.clone());
    use_effect_with(route, move |route| {
        let prior = previous.replace(route.clone());
        if let Some(scene) = next_scene_for_route(*state.scene, prior.as_ref(), route.as_ref()) {
            log::info!("route changed to {route:?}, entering {}", scene.name());
            crate::app::view::enter_scene(&state, scene);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_route_for_scene_skips_when_unchanged() {
        assert!(next_route_for_scene(Scene::Track, Some(&Route::Track)).is_none());
        assert_eq!(next_route_for_scene(Scene::Track, None), Some(Route::Track));
        assert_eq!(
            next_route_for_scene(Scene::Garage, Some(&Route::NotFound)),
            Some(Route::Garage)
        );
    }

    #[test]
    fn next_scene_for_route_ignores_repeats() {
        assert!(next_scene_for_route(Scene::Garage, Some(&Route::Garage), Some(&Route::Garage)).is_none());
        assert!(next_scene_for_route(Scene::Track, Some(&Route::Garage), Some(&Route::Garage)).is_none());
        assert!(next_scene_for_route(Scene::Garage, None, None).is_none());
    }

    #[test]
    fn next_scene_for_route_follows_history() {
        assert_eq!(
            next_scene_for_route(Scene::Track, Some(&Route::Track), Some(&Route::Contact)),
            Some(Scene::Contact)
        );
        // Our own push lands on the route of the scene already shown.
        assert!(next_scene_for_route(Scene::Track, Some(&Route::Garage), Some(&Route::Track)).is_none());
        assert_eq!(
            next_scene_for_route(Scene::Contact, Some(&Route::Contact), Some(&Route::NotFound)),
            Some(Scene::Garage)
        );
    }
}
