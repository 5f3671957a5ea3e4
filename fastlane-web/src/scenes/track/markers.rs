use crate::game::Project;
use std::collections::BTreeSet;
use yew::prelude::*;

pub const VISITED_COLOR: &str = "#FFD700";
pub const OPEN_COLOR: &str = "#DC143C";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub projects: Vec<Project>,
    pub visited: BTreeSet<String>,
    pub on_select: Callback<String>,
}

fn render_marker(index: usize, project: &Project, visited: bool, on_select: &Callback<String>) -> Html {
    let color = if visited { VISITED_COLOR } else { OPEN_COLOR };
    let (x, y) = (project.position.x, project.position.y);
    let onclick = {
        let cb = on_select.clone();
        let id = project.id.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
    };
    let onkeydown = {
        let cb = on_select.clone();
        let id = project.id.clone();
        Callback::from(move |e: KeyboardEvent| {
            if matches!(e.key().as_str(), "Enter" | " ") {
                e.prevent_default();
                cb.emit(id.clone());
            }
        })
    };

    html! {
        <g
            id={format!("pit-stop-{index}")}
            class={classes!("pit-stop", visited.then_some("pit-stop--visited"))}
            tabindex="0"
            role="button"
            aria-label={format!("Pit stop: {}", project.title)}
            aria-pressed={visited.to_string()}
            {onclick}
            {onkeydown}
        >
            <circle cx={x.to_string()} cy={y.to_string()} r="16" fill={color} stroke="#FFFFFF" stroke-width="3" />
            <circle cx={x.to_string()} cy={y.to_string()} r="10" fill="#FFFFFF" />
            <text x={x.to_string()} y={(y + 4.0).to_string()} text-anchor="middle" fill={color} font-size="12" font-weight="bold">
                { if visited { "✓" } else { "P" } }
            </text>
            <text x={x.to_string()} y={(y - 25.0).to_string()} text-anchor="middle" fill="#FFFFFF" font-size="10" font-weight="bold">
                { project.marker_label() }
            </text>
        </g>
    }
}

/// The circuit with one focusable marker per project.
#[function_component(TrackMap)]
pub fn track_map(props: &Props) -> Html {
    html! {
        <svg
            class="track-map"
            width="100%"
            height="100%"
            viewBox="0 0 800 600"
            xmlns="http://www.w3.org/2000/svg"
            role="group"
            aria-label="Race track with project pit stops"
        >
            <rect width="800" height="600" fill="#1a1a1a" />
            <ellipse cx="400" cy="300" rx="350" ry="220" fill="none" stroke={OPEN_COLOR} stroke-width="4" opacity="0.8" />
            <text x="400" y="50" text-anchor="middle" fill={VISITED_COLOR} font-size="24" font-weight="bold">
                { "F1 Racing Portfolio" }
            </text>
            { for props.projects.iter().enumerate().map(|(index, project)| {
                render_marker(index, project, props.visited.contains(&project.id), &props.on_select)
            }) }
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ProjectCatalog;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn visited_markers_turn_gold_with_a_tick() {
        let catalog = ProjectCatalog::default_catalog();
        let props = Props {
            projects: catalog.projects.clone(),
            visited: BTreeSet::from([String::from("race-control-api")]),
            on_select: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<TrackMap>::with_props(props).render());
        assert_eq!(html.matches("role=\"button\"").count(), catalog.projects.len());
        assert_eq!(html.matches("✓").count(), 1);
        assert!(html.contains("pit-stop--visited"));
        assert!(html.contains("Pit stop: Race Control API"));
        assert!(html.contains("Paddock Pass"));
    }
}
