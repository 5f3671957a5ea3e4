mod handlers;

pub use handlers::{AppHandlers, enter_scene, project_selected};

use crate::app::state::AppState;
use crate::components::{
    announcer::Announcer, error_banner::ErrorBanner, lap_complete::LapComplete, toast::ToastView,
};
use crate::game::Scene;
use crate::scenes::{contact::ContactScene, garage::GarageScene, track::TrackScene};
use yew::prelude::*;

fn render_scene(state: &AppState, handlers: &AppHandlers) -> Html {
    let key = state.scene_key();
    let manager = state.manager.clone();
    let revision = state.revision.0;
    let on_event = handlers.shell_event.clone();
    let viewport = *state.viewport;
    let paused = *state.paused;
    match *state.scene {
        Scene::Garage => html! {
            <GarageScene key={key} {manager} {revision} {on_event} {viewport} {paused} />
        },
        Scene::Track => html! {
            <TrackScene key={key} {manager} {revision} {on_event} {viewport} {paused} />
        },
        Scene::Contact => html! {
            <ContactScene key={key} {manager} {revision} {on_event} {viewport} {paused} />
        },
    }
}

pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);
    let main_id = crate::a11y::MAIN_CONTENT_ID;

    html! {
        <>
            <a class="skip-link" href={format!("#{main_id}")}>{ "Skip to main content" }</a>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <ErrorBanner message={(*state.error_banner).clone()} on_dismiss={handlers.dismiss_error.clone()} />
            <main id={main_id} role="main" data-scene={state.scene.name()}>
                { render_scene(state, &handlers) }
            </main>
            <Announcer announcement={(*state.announcement).clone()} />
            <ToastView toast={(*state.toast).clone()} on_dismiss={handlers.dismiss_toast.clone()} />
            <LapComplete
                lap_time={*state.lap_dialog}
                on_another_lap={handlers.another_lap.clone()}
                on_contact={handlers.contact_me.clone()}
                on_close={handlers.close_lap_dialog.clone()}
            />
        </>
    }
}
