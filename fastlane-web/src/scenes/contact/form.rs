use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[must_use]
pub fn is_email_valid(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Pause between opening the mail client and confirming the launch.
pub const LAUNCH_DELAY_MS: u32 = 1_000;
pub const DEFAULT_SUBJECT: &str = "Portfolio Contact";

pub const REQUIRED_MSG: &str = "This field is required";
pub const EMAIL_MSG: &str = "Please enter a valid email address";
pub const NAME_MSG: &str = "Name must be at least 2 characters";
pub const MESSAGE_MSG: &str = "Message must be at least 10 characters";

/// Select values with their option labels.
pub const SUBJECT_OPTIONS: [(&str, &str); 6] = [
    ("job-opportunity", "🏆 Job Opportunity"),
    ("project-collaboration", "🤝 Project Collaboration"),
    ("freelance-work", "💼 Freelance Work"),
    ("consulting", "💡 Consulting"),
    ("speaking", "🎤 Speaking Engagement"),
    ("other", "💬 Other"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
    Honeypot,
}

impl FormField {
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Honeypot => "honeypot",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::Message)
    }
}

/// Error shown under `field` for `raw`, if any. Values are trimmed first.
#[must_use]
pub fn validate_field(field: FormField, raw: &str) -> Option<&'static str> {
    let value = raw.trim();
    if field.is_required() && value.is_empty() {
        return Some(REQUIRED_MSG);
    }
    match field {
        FormField::Email if !is_email_valid(value) => Some(EMAIL_MSG),
        FormField::Name if value.chars().count() < 2 => Some(NAME_MSG),
        FormField::Message if value.chars().count() < 10 => Some(MESSAGE_MSG),
        _ => None,
    }
}

/// Subject line for a select value.
#[must_use]
pub fn subject_text(key: &str) -> &'static str {
    match key {
        "job-opportunity" => "🏆 Job Opportunity",
        "project-collaboration" => "🤝 Project Collaboration",
        "freelance-work" => "💼 Freelance Work",
        "consulting" => "💡 Consulting Inquiry",
        "speaking" => "🎤 Speaking Engagement",
        "other" => "💬 General Inquiry",
        _ => DEFAULT_SUBJECT,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub honeypot: String,
}

pub enum DraftAction {
    Edit(FormField, String),
    Reset,
}

impl Reducible for ContactDraft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: DraftAction) -> Rc<Self> {
        match action {
            DraftAction::Reset => Rc::new(Self::default()),
            DraftAction::Edit(field, value) => {
                let mut next = (*self).clone();
                match field {
                    FormField::Name => next.name = value,
                    FormField::Email => next.email = value,
                    FormField::Subject => next.subject = value,
                    FormField::Message => next.message = value,
                    FormField::Honeypot => next.honeypot = value,
                }
                Rc::new(next)
            }
        }
    }
}

impl ContactDraft {
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
            FormField::Honeypot => &self.honeypot,
        }
    }

    /// Errors for every required field.
    #[must_use]
    pub fn errors(&self) -> BTreeMap<FormField, &'static str> {
        FormField::REQUIRED
            .into_iter()
            .filter_map(|field| validate_field(field, self.value(field)).map(|msg| (field, msg)))
            .collect()
    }

    /// Bots fill the hidden field; people never see it.
    #[must_use]
    pub fn is_spam(&self) -> bool {
        !self.honeypot.is_empty()
    }

    #[must_use]
    pub fn subject_line(&self) -> &'static str {
        subject_text(&self.subject)
    }

    #[must_use]
    pub fn mail_body(&self) -> String {
        format!(
            "Hi there!\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n\n---\nSent from F1 Racing Portfolio",
            self.name, self.email, self.message
        )
    }

    #[must_use]
    pub fn mailto_link(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(self.subject_line()),
            encode_component(&self.mail_body())
        )
    }
}

#[cfg(target_arch = "wasm32")]
fn encode_component(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_component(value: &str) -> String {
    value.to_string()
}

/// Open the visitor's mail client, then report back after the launch delay.
#[cfg(target_arch = "wasm32")]
fn launch(link: String, on_done: Callback<()>) {
    crate::dom::open_url(&link);
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(LAUNCH_DELAY_MS).await;
        on_done.emit(());
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn launch(link: String, on_done: Callback<()>) {
    log::info!("mail client link prepared ({} bytes)", link.len());
    on_done.emit(());
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub recipient: AttrValue,
    pub on_sent: Callback<()>,
}

fn read_value(field: FormField, event: &Event) -> String {
    match field {
        FormField::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
        FormField::Subject => event.target_unchecked_into::<HtmlSelectElement>().value(),
        _ => event.target_unchecked_into::<HtmlInputElement>().value(),
    }
}

#[function_component(ContactForm)]
pub fn contact_form(props: &Props) -> Html {
    let draft = use_reducer(ContactDraft::default);
    let errors = use_state(BTreeMap::<FormField, &'static str>::new);
    let sending = use_state(|| false);

    let on_input = |field: FormField| {
        let draft = draft.dispatcher();
        let errors = errors.clone();
        Callback::from(move |e: InputEvent| {
            draft.dispatch(DraftAction::Edit(field, read_value(field, &e)));
            if errors.contains_key(&field) {
                let mut next = (*errors).clone();
                next.remove(&field);
                errors.set(next);
            }
        })
    };
    let on_change = |field: FormField| {
        let draft = draft.dispatcher();
        Callback::from(move |e: Event| draft.dispatch(DraftAction::Edit(field, read_value(field, &e))))
    };
    let on_blur = |field: FormField| {
        let errors = errors.clone();
        Callback::from(move |e: FocusEvent| {
            let value = read_value(field, &e);
            let mut next = (*errors).clone();
            match validate_field(field, &value) {
                Some(msg) => next.insert(field, msg),
                None => next.remove(&field),
            };
            errors.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let sending = sending.clone();
        let recipient = props.recipient.clone();
        let on_sent = props.on_sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *sending {
                return;
            }
            if draft.is_spam() {
                log::debug!("dropping honeypot submission");
                return;
            }
            let found = draft.errors();
            if !found.is_empty() {
                if let Some(first) = found.keys().next() {
                    crate::dom::focus_by_id(first.id());
                }
                errors.set(found);
                return;
            }
            sending.set(true);
            let link = draft.mailto_link(&recipient);
            let draft = draft.dispatcher();
            let errors = errors.clone();
            let sending = sending.clone();
            let on_sent = on_sent.clone();
            launch(
                link,
                Callback::from(move |()| {
                    draft.dispatch(DraftAction::Reset);
                    errors.set(BTreeMap::new());
                    sending.set(false);
                    on_sent.emit(());
                }),
            );
        })
    };

    let error_for = |field: FormField| errors.get(&field).copied();
    let field_class = |field: FormField| classes!("form-input", error_for(field).map(|_| "form-input--error"));
    let error_line = |field: FormField| {
        html! {
            <div id={format!("{}-error", field.id())} class="form-error" hidden={error_for(field).is_none()}>
                { error_for(field).unwrap_or_default() }
            </div>
        }
    };

    html! {
        <form id="contact-form" class="contact-form" novalidate=true onsubmit={on_submit}>
            <div class="form-row">
                <label for="name">{ "Driver Name *" }</label>
                <input
                    type="text"
                    id="name"
                    name="name"
                    required=true
                    placeholder="Your full name"
                    aria-describedby="name-error"
                    aria-invalid={error_for(FormField::Name).is_some().to_string()}
                    class={field_class(FormField::Name)}
                    value={draft.name.clone()}
                    oninput={on_input(FormField::Name)}
                    onblur={on_blur(FormField::Name)}
                />
                { error_line(FormField::Name) }
            </div>

            <div class="form-row">
                <label for="email">{ "Pit Radio (Email) *" }</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    required=true
                    placeholder="your.email@example.com"
                    aria-describedby="email-error"
                    aria-invalid={error_for(FormField::Email).is_some().to_string()}
                    class={field_class(FormField::Email)}
                    value={draft.email.clone()}
                    oninput={on_input(FormField::Email)}
                    onblur={on_blur(FormField::Email)}
                />
                { error_line(FormField::Email) }
            </div>

            <div class="form-row">
                <label for="subject">{ "Race Strategy (Subject)" }</label>
                <select id="subject" name="subject" class="form-input" onchange={on_change(FormField::Subject)}>
                    <option value="" selected={draft.subject.is_empty()}>{ "Select a topic..." }</option>
                    { for SUBJECT_OPTIONS.iter().map(|(value, label)| html! {
                        <option value={*value} selected={draft.subject == *value}>{ *label }</option>
                    }) }
                </select>
            </div>

            <div class="form-row">
                <label for="message">{ "Race Briefing (Message) *" }</label>
                <textarea
                    id="message"
                    name="message"
                    required=true
                    rows="6"
                    placeholder="Tell me about your project, opportunity, or how we can work together..."
                    aria-describedby="message-error"
                    aria-invalid={error_for(FormField::Message).is_some().to_string()}
                    class={field_class(FormField::Message)}
                    value={draft.message.clone()}
                    oninput={on_input(FormField::Message)}
                    onblur={on_blur(FormField::Message)}
                />
                { error_line(FormField::Message) }
            </div>

            <div class="honeypot" aria-hidden="true">
                <input
                    type="text"
                    name="honeypot"
                    tabindex="-1"
                    autocomplete="off"
                    value={draft.honeypot.clone()}
                    oninput={on_input(FormField::Honeypot)}
                />
            </div>

            <button type="submit" id="submit-btn" class="racing-button" disabled={*sending}>
                { if *sending { "🚀 Launching..." } else { "🚀 Launch Message" } }
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn draft() -> ContactDraft {
        ContactDraft {
            name: String::from("Ada"),
            email: String::from("ada@example.com"),
            subject: String::from("consulting"),
            message: String::from("Let's build a pit wall."),
            honeypot: String::new(),
        }
    }

    #[test]
    fn required_fields_reject_blank_input() {
        for field in FormField::REQUIRED {
            assert_eq!(validate_field(field, "   "), Some(REQUIRED_MSG));
        }
        assert_eq!(validate_field(FormField::Subject, ""), None);
    }

    #[test]
    fn field_rules_match_contact_requirements() {
        assert_eq!(validate_field(FormField::Email, "ada@example"), Some(EMAIL_MSG));
        assert_eq!(validate_field(FormField::Email, "a da@example.com"), Some(EMAIL_MSG));
        assert_eq!(validate_field(FormField::Email, " ada@example.com "), None);
        assert_eq!(validate_field(FormField::Name, "A"), Some(NAME_MSG));
        assert_eq!(validate_field(FormField::Name, "Al"), None);
        assert_eq!(validate_field(FormField::Message, "too short"), Some(MESSAGE_MSG));
        assert_eq!(validate_field(FormField::Message, "long enough"), None);
    }

    #[test]
    fn subject_keys_map_to_subject_lines() {
        assert_eq!(subject_text("job-opportunity"), "🏆 Job Opportunity");
        assert_eq!(subject_text("consulting"), "💡 Consulting Inquiry");
        assert_eq!(subject_text("other"), "💬 General Inquiry");
        assert_eq!(subject_text(""), DEFAULT_SUBJECT);
        assert_eq!(subject_text("unknown"), DEFAULT_SUBJECT);
    }

    #[test]
    fn mail_body_follows_template() {
        let body = draft().mail_body();
        assert!(body.starts_with("Hi there!\n\nName: Ada\nEmail: ada@example.com\n\nMessage:\n"));
        assert!(body.ends_with("\n\n---\nSent from F1 Racing Portfolio"));
        let link = draft().mailto_link("dev@example.com");
        assert!(link.starts_with("mailto:dev@example.com?subject="));
        assert!(link.contains("&body="));
    }

    #[test]
    fn draft_errors_and_honeypot() {
        assert!(draft().errors().is_empty());
        let empty = ContactDraft::default();
        assert_eq!(empty.errors().len(), 3);
        let bot = ContactDraft {
            honeypot: String::from("buy now"),
            ..draft()
        };
        assert!(bot.is_spam());
        assert!(!draft().is_spam());
    }

    #[test]
    fn reducer_edits_and_resets() {
        let state = Rc::new(ContactDraft::default());
        let state = state.reduce(DraftAction::Edit(FormField::Email, String::from("x@y.z")));
        assert_eq!(state.email, "x@y.z");
        let state = state.reduce(DraftAction::Reset);
        assert_eq!(*state, ContactDraft::default());
    }

    #[test]
    fn form_renders_all_fields() {
        let props = Props {
            recipient: AttrValue::from("dev@example.com"),
            on_sent: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ContactForm>::with_props(props).render());
        for id in ["id=\"name\"", "id=\"email\"", "id=\"subject\"", "id=\"message\"", "name=\"honeypot\""] {
            assert!(html.contains(id), "missing {id}");
        }
        assert!(html.contains("Launch Message"));
        assert!(html.contains("💡 Consulting"));
    }
}
