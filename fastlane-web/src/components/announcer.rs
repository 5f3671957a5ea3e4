use crate::app::state::Announcement;
use yew::prelude::*;

pub const ANNOUNCER_ID: &str = "live-announcer";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub announcement: Announcement,
}

/// The shell's only polite live region. Each announcement is a new keyed node
/// so screen readers speak it even when the text repeats.
#[function_component(Announcer)]
pub fn announcer(props: &Props) -> Html {
    let Announcement { seq, text } = props.announcement.clone();
    html! {
        <div id={ANNOUNCER_ID} class="sr-only" role="status" aria-live="polite" aria-atomic="true">
            if !text.is_empty() {
                <p key={seq.to_string()}>{ text }</p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(announcement: Announcement) -> String {
        block_on(LocalServerRenderer::<Announcer>::with_props(Props { announcement }).render())
    }

    #[test]
    fn renders_one_region_with_the_message() {
        let html = render(Announcement {
            seq: 3,
            text: AttrValue::from("Navigated to Contact form"),
        });
        assert!(html.contains("Navigated to Contact form"));
        assert_eq!(html.matches("aria-live").count(), 1);
        assert!(html.contains("id=\"live-announcer\""));
    }

    #[test]
    fn empty_announcement_renders_an_empty_region() {
        let html = render(Announcement::default());
        assert!(!html.contains("<p"));
    }
}
