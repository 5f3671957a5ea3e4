#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod logging;
pub mod paths;
pub mod router;
pub mod scenes;
pub mod storage;

pub use fastlane_game as game;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    // Paint the stored or system theme before the first render
    a11y::set_theme_attr(storage::initial_theme());
    yew::Renderer::<app::App>::new().render();
}
