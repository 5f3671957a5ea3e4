//! The circuit: HUD, pit-stop markers, and the project details dialog.
mod hud;
mod markers;
mod project_modal;

pub use hud::{IDLE_TIMER, TrackHud, timer_text};
pub use markers::TrackMap;
pub use project_modal::ProjectModal;

use crate::game::{ProjectCatalog, Scene};
use crate::scenes::{SceneProps, ShellEvent};
use yew::prelude::*;

pub const RESET_CONFIRM: &str =
    "Reset current lap? This will clear your progress and restart the timer.";

/// Project currently shown in the details dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Selection {
    id: String,
    first_visit: bool,
}

#[must_use]
pub const fn instructions(compact: bool) -> &'static str {
    if compact {
        "• Tap pit stops to explore projects"
    } else {
        "• Click pit stops to explore projects"
    }
}

#[function_component(TrackScene)]
pub fn track_scene(props: &SceneProps) -> Html {
    let catalog = ProjectCatalog::default_catalog();
    let selection = use_state(|| None::<Selection>);
    let rerender = use_force_update();

    let (visited, running) = props
        .manager
        .with(|m| (m.visited_projects(), m.state().is_timer_running));
    let visited_count = visited.len();

    let on_select = {
        let manager = props.manager.clone();
        let on_event = props.on_event.clone();
        let selection = selection.clone();
        let rerender = rerender.clone();
        Callback::from(move |id: String| {
            let Some(project) = catalog.get(&id) else {
                log::warn!("no project with id {id:?}");
                return;
            };
            let first_visit = manager.with_mut(|m| m.visit_project(&id));
            if first_visit {
                rerender.force_update();
                on_event.emit(ShellEvent::ProjectSelected {
                    id: id.clone(),
                    title: project.title.clone(),
                });
            }
            selection.set(Some(Selection { id, first_visit }));
        })
    };
    let on_back = {
        let on_event = props.on_event.clone();
        Callback::from(move |()| on_event.emit(ShellEvent::go(Scene::Garage)))
    };
    let on_reset = {
        let manager = props.manager.clone();
        let selection = selection.clone();
        let on_event = props.on_event.clone();
        Callback::from(move |()| {
            if crate::dom::confirm(RESET_CONFIRM) {
                manager.with_mut(|m| {
                    m.reset_timer();
                    m.start_lap_timer();
                });
                selection.set(None);
                on_event.emit(ShellEvent::announce("Lap reset"));
                rerender.force_update();
            }
        })
    };
    let on_close = {
        let selection = selection.clone();
        Callback::from(move |()| selection.set(None))
    };

    let modal = (*selection).as_ref().and_then(|sel| {
        catalog.get(&sel.id).map(|project| {
            html! {
                <ProjectModal
                    key={sel.id.clone()}
                    project={project.clone()}
                    first_visit={sel.first_visit}
                    on_close={on_close.clone()}
                />
            }
        })
    });

    html! {
        <div class={classes!("track-scene", props.viewport.is_compact().then_some("track-scene--compact"))}>
            <TrackHud
                manager={props.manager.clone()}
                visited={visited_count}
                {running}
                paused={props.paused}
                {on_back}
                {on_reset}
            />
            <div id="track-container" class="track-container">
                <TrackMap projects={catalog.projects.clone()} {visited} {on_select} />
            </div>
            <aside class="track-instructions">
                <div class="instructions-title">{ "🏁 Instructions" }</div>
                <div>{ instructions(props.viewport.is_compact()) }</div>
                <div>{ "• Complete all 4 pit stops to finish!" }</div>
            </aside>
            { modal.unwrap_or_default() }
        </div>
    }
}
