//! Contact page: resume sidebar, mail form, and the launch confirmation.
mod form;
mod sidebar;

pub use form::{
    ContactDraft, ContactForm, DEFAULT_SUBJECT, FormField, is_email_valid, subject_text,
    validate_field,
};
pub use sidebar::ContactSidebar;

use crate::components::modal::Modal;
use crate::game::{ResumeData, Scene};
use crate::scenes::{SceneProps, ShellEvent};
use yew::prelude::*;

/// Fetch and parse the hosted resume.
///
/// # Errors
///
/// Any network, HTTP status, or parse failure; callers fall back to
/// [`ResumeData::fallback`].
#[cfg(target_arch = "wasm32")]
pub async fn fetch_resume(url: &str) -> Result<ResumeData, crate::game::ResumeLoadError> {
    use crate::game::ResumeLoadError;

    let response = crate::dom::fetch_response(url)
        .await
        .map_err(|err| ResumeLoadError::Network(crate::dom::js_error_message(&err)))?;
    if !response.ok() {
        return Err(ResumeLoadError::Status(response.status()));
    }
    let text = crate::dom::response_text(&response)
        .await
        .map_err(|err| ResumeLoadError::Network(crate::dom::js_error_message(&err)))?;
    ResumeData::from_json(&text)
}

#[cfg(target_arch = "wasm32")]
#[hook]
fn use_resume() -> Option<ResumeData> {
    let resume = use_state(|| None::<ResumeData>);
    {
        let resume = resume.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                let url = crate::paths::resume_url();
                let data = fetch_resume(&url).await.unwrap_or_else(|err| {
                    log::warn!("resume unavailable from {url}: {err}; using built-in profile");
                    ResumeData::fallback()
                });
                resume.set(Some(data));
            });
            || {}
        });
    }
    (*resume).clone()
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
fn use_resume() -> Option<ResumeData> {
    None
}

#[function_component(ContactScene)]
pub fn contact_scene(props: &SceneProps) -> Html {
    let resume = use_resume();
    let sent = use_state(|| false);

    let (badges, best_lap) = props
        .manager
        .with(|m| (m.badges().to_vec(), m.best_lap_time()));
    let recipient = resume
        .as_ref()
        .map_or_else(|| ResumeData::fallback().info().email, |r| r.info().email);

    let back = {
        let on_event = props.on_event.clone();
        Callback::from(move |_| on_event.emit(ShellEvent::go(Scene::Garage)))
    };
    let on_sent = {
        let sent = sent.clone();
        let on_event = props.on_event.clone();
        Callback::from(move |()| {
            on_event.emit(ShellEvent::announce("Message launched"));
            sent.set(true);
        })
    };
    let close_success = {
        let sent = sent.clone();
        Callback::from(move |()| sent.set(false))
    };
    let continue_racing = {
        let on_event = props.on_event.clone();
        Callback::from(move |_| on_event.emit(ShellEvent::go(Scene::Track)))
    };

    html! {
        <div class="contact-scene">
            <button id="back-to-garage" class="hud-back" aria-label="Return to garage" onclick={back}>
                { "← Garage" }
            </button>
            <div class="contact-layout">
                <section class="panel contact-main">
                    <header>
                        <h1>{ "🏁 CONTACT" }</h1>
                        <p>{ "Ready to " }<span class="brand">{ "accelerate" }</span>{ " your next project?" }</p>
                    </header>
                    <ContactForm recipient={AttrValue::from(recipient)} {on_sent} />
                </section>
                <ContactSidebar {resume} {badges} {best_lap} />
            </div>
            <Modal open={*sent} title={AttrValue::from("Message Launched!")} on_close={close_success}>
                <div class="lap-flag" aria-hidden="true">{"🏁"}</div>
                <p>{ "Thanks for reaching out! I'll get back to you within 24 hours." }</p>
                <button id="close-success" type="button" class="racing-button" onclick={continue_racing}>
                    { "Continue Racing" }
                </button>
            </Modal>
        </div>
    }
}
