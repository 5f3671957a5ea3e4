use super::shared::{clear, reset_lap, snapshot, visit};
use crate::app::shell::resolve_scene;
use crate::app::state::AppState;
use crate::app::view::enter_scene;
use crate::dom;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

const BRIDGE_GLOBAL: &str = "__fastlaneTest";

struct BridgeBindings {
    scene: Closure<dyn FnMut(JsValue)>,
    visit: Closure<dyn FnMut(JsValue) -> JsValue>,
    reset: Closure<dyn FnMut()>,
    clear: Closure<dyn FnMut()>,
    state: Closure<dyn FnMut() -> JsValue>,
}

fn test_mode_enabled() -> bool {
    dom::query_has("test=1")
}

fn build_bridge(state: &AppState) -> BridgeBindings {
    let scene_state = state.clone();
    let scene = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(name) = value.as_string() {
            enter_scene(&scene_state, resolve_scene(&name));
        }
    }) as Box<dyn FnMut(JsValue)>);

    let visit_state = state.clone();
    let visit_fn = Closure::wrap(Box::new(move |value: JsValue| {
        let fresh = value
            .as_string()
            .is_some_and(|id| visit(&visit_state, &id));
        JsValue::from_bool(fresh)
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    let reset_state = state.clone();
    let reset = Closure::wrap(Box::new(move || reset_lap(&reset_state)) as Box<dyn FnMut()>);

    let clear_state = state.clone();
    let clear_fn = Closure::wrap(Box::new(move || clear(&clear_state)) as Box<dyn FnMut()>);

    let manager = state.manager.clone();
    let state_fn = Closure::wrap(Box::new(move || {
        serde_wasm_bindgen::to_value(&manager.with(snapshot)).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    BridgeBindings {
        scene,
        visit: visit_fn,
        reset,
        clear: clear_fn,
        state: state_fn,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 5] = [
        ("scene", bindings.scene.as_ref()),
        ("visit", bindings.visit.as_ref()),
        ("reset", bindings.reset.as_ref()),
        ("clear", bindings.clear.as_ref()),
        ("state", bindings.state.as_ref()),
    ];
    for (name, func) in entries {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(name), func);
    }
    if js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_GLOBAL), &bridge).is_err() {
        log::warn!("failed to install window.{BRIDGE_GLOBAL}");
    } else {
        log::info!("test bridge installed as window.{BRIDGE_GLOBAL}");
    }
}

#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let state = app_state.clone();

    use_effect_with((), move |()| {
        if bridge_handle.borrow().is_none() && test_mode_enabled() {
            let bindings = build_bridge(&state);
            attach_bridge(&bindings);
            *bridge_handle.borrow_mut() = Some(bindings);
        }
        || {}
    });
}
