use crate::app::shell::ERROR_BANNER_MS;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub message: Option<AttrValue>,
    pub on_dismiss: Callback<()>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &Props) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.message.clone(), move |message| {
            let timer = message
                .as_ref()
                .map(|_| Timeout::new(ERROR_BANNER_MS, move || on_dismiss.emit(())));
            move || drop(timer)
        });
    }

    let Some(message) = props.message.clone() else {
        return Html::default();
    };
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="error-banner" role="alert">
            <span aria-hidden="true">{"⚠️"}</span>
            <span>{ message }</span>
            <button type="button" class="error-banner-close" aria-label="Dismiss error" onclick={dismiss}>
                {"✕"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::shell::RUNTIME_ERROR_MESSAGE;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn banner_is_an_alert() {
        let props = Props {
            message: Some(AttrValue::from(RUNTIME_ERROR_MESSAGE)),
            on_dismiss: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ErrorBanner>::with_props(props).render());
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Please refresh the page."));
    }
}
