use crate::components::modal::Modal;
use crate::game::format_lap_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Completed lap time; the dialog is closed when `None`.
    pub lap_time: Option<u64>,
    pub on_another_lap: Callback<()>,
    pub on_contact: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(LapComplete)]
pub fn lap_complete(props: &Props) -> Html {
    let another = {
        let cb = props.on_another_lap.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let contact = {
        let cb = props.on_contact.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let time = props.lap_time.map(format_lap_time).unwrap_or_default();

    html! {
        <Modal
            open={props.lap_time.is_some()}
            title={AttrValue::from("LAP COMPLETE!")}
            on_close={props.on_close.clone()}
            class={classes!("lap-complete")}
        >
            <div class="lap-flag" aria-hidden="true">{"🏁"}</div>
            <div class="lap-time">{ time }</div>
            <p>{ "You've visited all pit stops! Ready for another lap or want to get in touch?" }</p>
            <div class="modal-actions">
                <button id="another-lap-btn" type="button" class="racing-button" onclick={another}>
                    { "Another Lap" }
                </button>
                <button id="contact-me-btn" type="button" class="racing-button-outline" onclick={contact}>
                    { "Contact Me" }
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(lap_time: Option<u64>) -> Props {
        Props {
            lap_time,
            on_another_lap: Callback::noop(),
            on_contact: Callback::noop(),
            on_close: Callback::noop(),
        }
    }

    #[test]
    fn dialog_shows_formatted_lap_time() {
        let html = block_on(LocalServerRenderer::<LapComplete>::with_props(props(Some(58_000))).render());
        assert!(html.contains("LAP COMPLETE!"));
        assert!(html.contains("0:58.00"));
        assert!(html.contains("Another Lap"));
        assert!(html.contains("Contact Me"));
    }

    #[test]
    fn dialog_closed_without_lap() {
        let html = block_on(LocalServerRenderer::<LapComplete>::with_props(props(None)).render());
        assert!(!html.contains("LAP COMPLETE!"));
    }
}
