use crate::game::constants::TOTAL_PIT_STOPS;
use crate::game::{Badge, LapRecord, Scene, Theme, format_lap_time};
use crate::components::modal::Modal;
use crate::scenes::{SceneProps, ShellEvent};
use yew::prelude::*;

pub const RESET_CONFIRM: &str =
    "Are you sure you want to reset all your progress? This action cannot be undone.";
const LEADERBOARD_BUTTON_ID: &str = "leaderboard-btn";

/// Keyboard shortcuts available in the garage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GarageShortcut {
    StartRace,
    Leaderboard,
    Contact,
    CloseLeaderboard,
}

/// Map a `keydown` (by physical key code) to a shortcut. While the
/// leaderboard is open only Escape does anything.
#[must_use]
pub fn shortcut_for(code: &str, ctrl_or_meta: bool, leaderboard_open: bool) -> Option<GarageShortcut> {
    match (code, ctrl_or_meta, leaderboard_open) {
        ("Escape", _, true) => Some(GarageShortcut::CloseLeaderboard),
        (_, _, true) => None,
        ("Space", false, false) => Some(GarageShortcut::StartRace),
        ("KeyL", true, false) => Some(GarageShortcut::Leaderboard),
        ("KeyC", true, false) => Some(GarageShortcut::Contact),
        _ => None,
    }
}

#[must_use]
pub const fn medal(rank: usize) -> &'static str {
    match rank {
        0 => "🥇",
        1 => "🥈",
        2 => "🥉",
        _ => "",
    }
}

/// Icon on the theme toggle: the theme a click switches to.
#[must_use]
pub const fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    }
}

/// The most recent `n` badges, oldest first.
#[must_use]
pub fn recent_badges(badges: &[Badge], n: usize) -> &[Badge] {
    &badges[badges.len().saturating_sub(n)..]
}

fn render_badge(badge: &Badge) -> Html {
    html! {
        <div class="badge" title={badge.description.clone()}>
            <span class="badge-icon" aria-hidden="true">{ badge.icon.clone() }</span>
            { badge.name.clone() }
        </div>
    }
}

fn render_record(rank: usize, record: &LapRecord) -> Html {
    let class = if rank == 0 {
        "leaderboard-row leaderboard-row--first"
    } else {
        "leaderboard-row"
    };
    html! {
        <li class={class}>
            <span class="leaderboard-rank">{ format!("{}{}", rank + 1, medal(rank)) }</span>
            <div class="leaderboard-time">
                <div class="lap-time">{ format_lap_time(record.time) }</div>
                <div class="lap-date">{ record.date.format("%-m/%-d/%Y").to_string() }</div>
            </div>
            <div class="leaderboard-detail">
                <div>{ format!("{}/{TOTAL_PIT_STOPS} projects", record.projects_visited) }</div>
                <div>{ format!("{} badges", record.badges_earned) }</div>
            </div>
        </li>
    }
}

fn render_leaderboard(records: &[LapRecord]) -> Html {
    if records.is_empty() {
        return html! {
            <div class="leaderboard-empty">
                <div aria-hidden="true">{"🏁"}</div>
                <p>{ "No lap records yet!" }</p>
                <p class="hint">{ "Complete the track to set your first record." }</p>
            </div>
        };
    }
    html! {
        <ol class="leaderboard">
            { for records.iter().enumerate().map(|(rank, record)| render_record(rank, record)) }
        </ol>
    }
}

#[function_component(GarageScene)]
pub fn garage_scene(props: &SceneProps) -> Html {
    let leaderboard_open = use_state(|| false);
    let rerender = use_force_update();

    {
        let on_event = props.on_event.clone();
        let leaderboard = leaderboard_open.clone();
        use_effect_with(*leaderboard_open, move |open| {
            let open = *open;
            let listener = crate::dom::document().and_then(|doc| {
                crate::dom::EventListener::attach(&doc, "keydown", move |event| {
                    use wasm_bindgen::JsCast;
                    let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                        return;
                    };
                    let modifier = key.ctrl_key() || key.meta_key();
                    let Some(shortcut) = shortcut_for(&key.code(), modifier, open) else {
                        return;
                    };
                    key.prevent_default();
                    match shortcut {
                        GarageShortcut::StartRace => on_event.emit(ShellEvent::go(Scene::Track)),
                        GarageShortcut::Contact => on_event.emit(ShellEvent::go(Scene::Contact)),
                        GarageShortcut::Leaderboard => leaderboard.set(true),
                        GarageShortcut::CloseLeaderboard => leaderboard.set(false),
                    }
                })
            });
            move || drop(listener)
        });
    }

    let (badges, best_lap, theme, records) = props.manager.with(|m| {
        (
            m.badges().to_vec(),
            m.best_lap_time(),
            m.theme(),
            m.lap_records().to_vec(),
        )
    });

    let go = |scene: Scene| {
        let on_event = props.on_event.clone();
        Callback::from(move |_| on_event.emit(ShellEvent::go(scene)))
    };
    let toggle_theme = {
        let manager = props.manager.clone();
        let rerender = rerender.clone();
        Callback::from(move |_| {
            manager.with_mut(|m| m.toggle_theme());
            rerender.force_update();
        })
    };
    let open_leaderboard = {
        let open = leaderboard_open.clone();
        Callback::from(move |_| open.set(true))
    };
    let close_leaderboard = {
        let open = leaderboard_open.clone();
        Callback::from(move |()| open.set(false))
    };
    let reset_data = {
        let manager = props.manager.clone();
        let on_event = props.on_event.clone();
        Callback::from(move |_| {
            if crate::dom::confirm(RESET_CONFIRM) {
                manager.with_mut(|m| m.clear_data());
                on_event.emit(ShellEvent::announce("All progress has been reset"));
                rerender.force_update();
            }
        })
    };

    let recent = recent_badges(&badges, 3);

    html! {
        <div class="garage-scene">
            <button id="theme-toggle" class="theme-toggle" aria-label="Toggle theme" onclick={toggle_theme}>
                <span aria-hidden="true">{ theme_icon(theme) }</span>
            </button>

            <div class="garage-main">
                <header class="garage-header">
                    <h1>{ "GARAGE" }</h1>
                    <p>{ "Welcome to the " }<span class="brand">{ "Fast Lane" }</span>{ " Portfolio" }</p>
                </header>

                <section class="stats-grid" aria-label="Your stats">
                    <div class="stat-card">
                        <div aria-hidden="true">{"🏁"}</div>
                        <div class="stat-value" id="badge-count">{ badges.len() }</div>
                        <div class="stat-label">{ "Badges Earned" }</div>
                    </div>
                    <div class="stat-card">
                        <div aria-hidden="true">{"⏱️"}</div>
                        <div class="stat-value" id="best-lap">
                            { best_lap.map_or_else(|| String::from("--:--"), format_lap_time) }
                        </div>
                        <div class="stat-label">{ "Best Lap Time" }</div>
                    </div>
                    <div class="stat-card">
                        <div aria-hidden="true">{"🚀"}</div>
                        <div class="stat-value">{ TOTAL_PIT_STOPS }</div>
                        <div class="stat-label">{ "Pit Stops Available" }</div>
                    </div>
                </section>

                <nav class="garage-actions" aria-label="Garage actions">
                    <button id="start-race-btn" class="racing-button" aria-describedby="start-race-desc" onclick={go(Scene::Track)}>
                        { "START RACE" }
                    </button>
                    <button id={LEADERBOARD_BUTTON_ID} class="racing-button-outline" aria-describedby="leaderboard-desc" onclick={open_leaderboard}>
                        { "Leaderboard" }
                    </button>
                    <button id="contact-btn" class="racing-button-gold" aria-describedby="contact-desc" onclick={go(Scene::Contact)}>
                        { "Contact" }
                    </button>
                </nav>

                <div class="sr-only">
                    <div id="start-race-desc">{ "Begin exploring projects on the racing track" }</div>
                    <div id="leaderboard-desc">{ "View lap times and achievements" }</div>
                    <div id="contact-desc">{ "Get in touch for opportunities" }</div>
                </div>

                if !recent.is_empty() {
                    <section class="recent-badges">
                        <h3>{ "Recent Achievements" }</h3>
                        <div class="badge-row">
                            { for recent.iter().map(render_badge) }
                        </div>
                    </section>
                }
            </div>

            <div class="keyboard-hints">
                <div>{ "Press " }<kbd>{ "Space" }</kbd>{ " to start race" }</div>
                <div>{ "Press " }<kbd>{ "Tab" }</kbd>{ " to navigate" }</div>
            </div>

            <Modal
                open={*leaderboard_open}
                title={AttrValue::from("🏆 Leaderboard")}
                on_close={close_leaderboard}
                return_focus_id={Some(AttrValue::from(LEADERBOARD_BUTTON_ID))}
            >
                { render_leaderboard(&records) }
                <div class="modal-actions">
                    <button id="reset-data-btn" type="button" class="danger-button" onclick={reset_data}>
                        { "Reset All Data" }
                    </button>
                </div>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BadgeCategory, timestamp_from_ms};

    fn badge(id: &str) -> Badge {
        Badge {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            icon: String::from("🏁"),
            earned_at: timestamp_from_ms(0),
            category: BadgeCategory::Exploration,
        }
    }

    #[test]
    fn shortcuts_follow_modifiers() {
        assert_eq!(shortcut_for("Space", false, false), Some(GarageShortcut::StartRace));
        assert_eq!(shortcut_for("KeyL", true, false), Some(GarageShortcut::Leaderboard));
        assert_eq!(shortcut_for("KeyC", true, false), Some(GarageShortcut::Contact));
        assert_eq!(shortcut_for("KeyL", false, false), None);
        assert_eq!(shortcut_for("KeyC", false, false), None);
        assert_eq!(shortcut_for("Escape", false, false), None);
    }

    #[test]
    fn open_leaderboard_only_listens_for_escape() {
        assert_eq!(
            shortcut_for("Escape", false, true),
            Some(GarageShortcut::CloseLeaderboard)
        );
        assert_eq!(shortcut_for("Space", false, true), None);
        assert_eq!(shortcut_for("KeyC", true, true), None);
    }

    #[test]
    fn medals_for_the_podium_only() {
        assert_eq!(medal(0), "🥇");
        assert_eq!(medal(1), "🥈");
        assert_eq!(medal(2), "🥉");
        assert_eq!(medal(3), "");
    }

    #[test]
    fn theme_icon_offers_the_other_theme() {
        assert_eq!(theme_icon(Theme::Light), "🌙");
        assert_eq!(theme_icon(Theme::Dark), "☀️");
    }

    #[test]
    fn recent_badges_keeps_the_last_three() {
        let badges: Vec<_> = ["a", "b", "c", "d"].into_iter().map(badge).collect();
        let ids: Vec<_> = recent_badges(&badges, 3).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "d"]);
        assert_eq!(recent_badges(&badges[..1], 3).len(), 1);
        assert!(recent_badges(&[], 3).is_empty());
    }
}
