use crate::app::state::ManagerHandle;
use crate::game::constants::TOTAL_PIT_STOPS;
use crate::game::format_lap_time;
use gloo_timers::callback::Interval;
use yew::prelude::*;

/// Timer refresh period while a lap runs.
pub const TICK_MS: u32 = 50;
pub const IDLE_TIMER: &str = "00:00.00";

/// Text on the lap timer: the running lap, else the lap just finished.
#[must_use]
pub fn timer_text(running: bool, current: u64, last: Option<u64>) -> String {
    if running {
        format_lap_time(current)
    } else {
        last.map_or_else(|| String::from(IDLE_TIMER), format_lap_time)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub manager: ManagerHandle,
    pub visited: usize,
    pub running: bool,
    pub paused: bool,
    pub on_back: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(TrackHud)]
pub fn track_hud(props: &Props) -> Html {
    let tick = use_force_update();
    use_effect_with((props.running, props.paused), move |(running, paused)| {
        let interval = (*running && !*paused).then(|| Interval::new(TICK_MS, move || tick.force_update()));
        move || drop(interval)
    });

    let text = props.manager.with(|m| {
        timer_text(props.running, m.current_lap_time(), m.last_lap_time())
    });
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <header class="track-hud">
            <button id="back-to-garage" class="hud-back" aria-label="Return to garage" onclick={back}>
                { "← Garage" }
            </button>
            <div class="hud-readouts">
                <div class="hud-readout">
                    <div id="lap-timer" class="hud-value" role="timer" aria-live="off">{ text }</div>
                    <div class="hud-label">{ "Lap Time" }</div>
                </div>
                <div class="hud-readout">
                    <div id="pit-stop-count" class="hud-value hud-value--gold">
                        { format!("{}/{TOTAL_PIT_STOPS}", props.visited) }
                    </div>
                    <div class="hud-label">{ "Pit Stops" }</div>
                </div>
                <button id="reset-lap" class="hud-reset" disabled={!props.running} onclick={reset}>
                    { "Reset Lap" }
                </button>
            </div>
        </header>
    }
}
