#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod bootstrap;
pub mod routing;
pub mod shell;
pub mod state;
pub mod test_bridge;
pub mod view;

pub use shell::ShellEvent;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let app_state = state::use_app_state(route.clone());
    bootstrap::use_bootstrap(&app_state);
    test_bridge::use_test_bridge(&app_state);

    routing::use_sync_route_with_scene(&app_state.scene, navigator, route.clone());
    routing::use_sync_scene_with_route(&app_state, route);

    view::render_app(&app_state)
}
