use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

use fastlane_web::app::App;
use fastlane_web::dom;
use fastlane_web::game::constants::STORAGE_KEY;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    // Start every test in the garage, whatever the previous test navigated to
    let history = dom::window().expect("window").history().expect("history");
    history
        .replace_state_with_url(&JsValue::NULL, "", Some("/"))
        .expect("reset url");
    if let Ok(storage) = dom::local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
    Renderer::<App>::with_root(ensure_app_root()).render();
}

async fn next_frame() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

fn click(id: &str) {
    let doc = dom::document().expect("document");
    let el: HtmlElement = doc
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} exists"))
        .dyn_into()
        .expect("html element");
    el.click();
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app();
    next_frame().await;
    let doc = dom::document().expect("document");
    let skip = doc
        .query_selector("a[href='#main-content']")
        .expect("query skip link")
        .expect("skip link exists");
    let main = doc
        .get_element_by_id("main-content")
        .expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert_eq!(main.get_attribute("role").unwrap_or_default(), "main");
    assert!(skip.text_content().unwrap_or_default().contains("Skip"));
}

#[wasm_bindgen_test]
async fn start_race_mounts_the_track() {
    render_app();
    next_frame().await;
    click("start-race-btn");
    next_frame().await;

    let doc = dom::document().expect("document");
    let main = doc.get_element_by_id("main-content").expect("main");
    assert_eq!(main.get_attribute("data-scene").as_deref(), Some("track"));
    assert!(doc.get_element_by_id("lap-timer").is_some());

    let stored = dom::local_storage()
        .expect("storage")
        .get_item(STORAGE_KEY)
        .expect("read")
        .expect("progress saved");
    assert!(stored.contains("\"currentScene\":\"track\""));
}

#[wasm_bindgen_test]
async fn back_button_returns_to_garage() {
    render_app();
    next_frame().await;
    click("contact-btn");
    next_frame().await;
    click("back-to-garage");
    next_frame().await;

    let doc = dom::document().expect("document");
    let main = doc.get_element_by_id("main-content").expect("main");
    assert_eq!(main.get_attribute("data-scene").as_deref(), Some("garage"));
    assert!(doc.get_element_by_id("start-race-btn").is_some());
}

#[wasm_bindgen_test]
async fn scene_changes_are_announced_in_one_live_region() {
    render_app();
    next_frame().await;
    click("contact-btn");
    next_frame().await;

    let doc = dom::document().expect("document");
    let region = doc.get_element_by_id("live-announcer").expect("announcer");
    assert_eq!(region.get_attribute("aria-live").as_deref(), Some("polite"));
    let first = region.query_selector("p").expect("query").expect("message node");
    assert_eq!(first.text_content().as_deref(), Some("Navigated to Contact form"));

    click("back-to-garage");
    next_frame().await;
    let second = region.query_selector("p").expect("query").expect("message node");
    assert!(!second.is_same_node(Some(&first)));
    assert!(second.text_content().unwrap_or_default().contains("Garage"));
    assert_eq!(region.query_selector_all("p").expect("query").length(), 1);
}
