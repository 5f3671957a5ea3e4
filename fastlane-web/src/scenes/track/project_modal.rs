use crate::components::modal::Modal;
use crate::game::Project;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub project: Project,
    /// This opening was the first visit to the project.
    pub first_visit: bool,
    pub on_close: Callback<()>,
}

/// Project details behind a pit stop. Mount keyed by project id so the
/// "Inspect Tyres" reveal starts collapsed for every project.
#[function_component(ProjectModal)]
pub fn project_modal(props: &Props) -> Html {
    let inspected = use_state(|| false);
    let project = &props.project;

    let inspect = {
        let inspected = inspected.clone();
        Callback::from(move |_| inspected.set(true))
    };
    let tag = if props.first_visit {
        html! { <span class="badge badge--new">{ "🆕 New" }</span> }
    } else {
        html! { <span class="badge">{ "✅ Visited" }</span> }
    };

    html! {
        <Modal
            open={true}
            title={AttrValue::from(project.title.clone())}
            description={Some(AttrValue::from(project.short_description.clone()))}
            on_close={props.on_close.clone()}
            class={classes!("project-modal")}
        >
            <div class="project-meta">
                <span class="project-category" aria-hidden="true">{ project.category.emoji() }</span>
                { tag }
            </div>

            <section>
                <h3>{ "🔧 Tech Stack" }</h3>
                <ul class="tech-stack">
                    { for project.tech_stack.iter().map(|tech| html! { <li class="chip">{ tech.clone() }</li> }) }
                </ul>
            </section>

            <section>
                <h3>{ "📋 Project Details" }</h3>
                <p>{ project.description.clone() }</p>
            </section>

            <section>
                if *inspected {
                    <div id="problems-list">
                        <h3>{ "🏆 Key Achievements" }</h3>
                        <ul class="problems">
                            { for project.problems.iter().map(|problem| html! { <li>{ problem.clone() }</li> }) }
                        </ul>
                    </div>
                } else {
                    <button id="inspect-tyres-btn" type="button" class="racing-button" onclick={inspect}>
                        { "🔍 Inspect Tyres (Problems Solved)" }
                    </button>
                }
            </section>

            <div class="modal-actions">
                if let Some(url) = project.demo_url.clone() {
                    <a href={url} target="_blank" rel="noopener noreferrer" class="racing-button">{ "🚀 View Demo" }</a>
                }
                if let Some(url) = project.code_url.clone() {
                    <a href={url} target="_blank" rel="noopener noreferrer" class="racing-button-outline">{ "📁 View Code" }</a>
                }
            </div>
        </Modal>
    }
}
