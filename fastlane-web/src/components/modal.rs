use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

/// Elements a keyboard user can reach inside a dialog.
pub const FOCUSABLE: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Element to focus again once the dialog closes.
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Keep Tab and Shift+Tab cycling inside `container`.
#[cfg(target_arch = "wasm32")]
fn trap_focus(container: &web_sys::Element, event: &KeyboardEvent) {
    use wasm_bindgen::JsCast;

    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return;
    };
    let len = nodes.length();
    if len == 0 {
        return;
    }
    let (Some(first), Some(last)) = (nodes.get(0), nodes.get(len - 1)) else {
        return;
    };
    let active = crate::dom::document().and_then(|doc| doc.active_element());
    let is_active = |node: &web_sys::Node| {
        active
            .as_ref()
            .is_some_and(|el| AsRef::<web_sys::Node>::as_ref(el) == node)
    };
    let target = if event.shift_key() && is_active(&first) {
        last
    } else if !event.shift_key() && is_active(&last) {
        first
    } else {
        return;
    };
    if let Ok(el) = target.dyn_into::<web_sys::HtmlElement>() {
        event.prevent_default();
        let _ = el.focus();
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_tab(container_ref: &NodeRef, event: &KeyboardEvent) {
    if let Some(container) = container_ref.cast::<web_sys::Element>() {
        trap_focus(&container, event);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn handle_tab(_container_ref: &NodeRef, _event: &KeyboardEvent) {}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_ref = use_node_ref();
    let prev_open = use_mut_ref(|| props.open);

    {
        let container_ref = container_ref.clone();
        use_effect_with(
            (props.open, props.return_focus_id.clone()),
            move |(is_open, return_focus_id)| {
                let was_open = prev_open.replace(*is_open);
                if *is_open {
                    if let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                        let _ = el.set_attribute("tabindex", "-1");
                        let _ = el.focus();
                    }
                } else if was_open && let Some(id) = return_focus_id.as_ref() {
                    crate::dom::focus_by_id(id);
                }
                || {}
            },
        );
    }

    if !props.open {
        return Html::default();
    }

    let container_id = format!("modal-{}", *modal_id);
    let title_id = format!("modal-title-{}", *modal_id);
    let desc_id = props
        .description
        .as_ref()
        .map(|_| format!("modal-desc-{}", *modal_id));

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let cb = props.on_close.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Escape" => {
                e.prevent_default();
                e.stop_propagation();
                cb.emit(());
            }
            "Tab" => handle_tab(&container_ref, &e),
            _ => {}
        })
    };

    html! {
        <div class="modal-overlay" role="presentation" onclick={on_close.clone()}>
            <div
                id={container_id}
                class={classes!("modal-content", props.class.clone())}
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                aria-describedby={desc_id.clone().unwrap_or_default()}
                onclick={keep_open}
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <button type="button" class="modal-close" aria-label="Close dialog" onclick={on_close}>
                    {"✕"}
                </button>
                <h2 id={title_id} class="modal-title">{ props.title.clone() }</h2>
                { desc_id.map(|id| html! {
                    <p id={id} class="modal-description">
                        { props.description.clone().unwrap_or_default() }
                    </p>
                }).unwrap_or_default() }
                <div class="modal-body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
