use crate::app::shell::{TOAST_MS, Toast};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toast: Option<Toast>,
    pub on_dismiss: Callback<()>,
}

/// Pit-stop notification that removes itself after a few seconds.
#[function_component(ToastView)]
pub fn toast_view(props: &Props) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.toast.clone(), move |toast| {
            let timer = toast
                .as_ref()
                .map(|_| Timeout::new(TOAST_MS, move || on_dismiss.emit(())));
            move || drop(timer)
        });
    }

    let Some(toast) = props.toast.as_ref() else {
        return Html::default();
    };
    html! {
        <div class="toast" role="status" aria-live="polite">
            <div class="toast-title">
                <span aria-hidden="true">{"🏁"}</span>
                <span>{ toast.title.clone() }</span>
            </div>
            <div class="toast-message">{ toast.message.clone() }</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn toast_shows_title_and_project() {
        let props = Props {
            toast: Some(Toast {
                title: String::from("Pit Stop Complete!"),
                message: String::from("Race Control API"),
            }),
            on_dismiss: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ToastView>::with_props(props).render());
        assert!(html.contains("Pit Stop Complete!"));
        assert!(html.contains("Race Control API"));
    }

    #[test]
    fn no_toast_renders_empty() {
        let props = Props {
            toast: None,
            on_dismiss: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ToastView>::with_props(props).render());
        assert!(!html.contains("toast"));
    }
}
