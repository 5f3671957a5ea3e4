use crate::game::{Badge, ResumeData, format_lap_time};
use yew::prelude::*;

pub const SCHEDULE_CALL_URL: &str = "https://calendly.com/yourusername";
const SKILL_COUNT: usize = 6;
const EXPERIENCE_COUNT: usize = 2;
const BADGE_COUNT: usize = 4;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` while the resume is still loading.
    pub resume: Option<ResumeData>,
    pub badges: Vec<Badge>,
    pub best_lap: Option<u64>,
}

fn render_summary(badges: &[Badge], best_lap: Option<u64>) -> Html {
    let recent = &badges[badges.len().saturating_sub(BADGE_COUNT)..];
    html! {
        <section class="panel race-summary">
            <h2>{ "🏆 Race Summary" }</h2>
            <div class="summary-grid">
                <div>
                    <div class="stat-value">{ badges.len() }</div>
                    <div class="stat-label">{ "Badges Earned" }</div>
                </div>
                <div>
                    <div class="stat-value">{ best_lap.map_or_else(|| String::from("--:--"), format_lap_time) }</div>
                    <div class="stat-label">{ "Best Lap" }</div>
                </div>
            </div>
            if !recent.is_empty() {
                <h3>{ "Recent Achievements" }</h3>
                <div class="badge-grid">
                    { for recent.iter().map(|badge| html! {
                        <div class="badge" title={badge.description.clone()}>
                            <span aria-hidden="true">{ badge.icon.clone() }</span>
                            { badge.name.clone() }
                        </div>
                    }) }
                </div>
            }
        </section>
    }
}

fn render_profile(resume: &ResumeData) -> Html {
    html! {
        <section class="panel driver-profile">
            <h2>{ "🎯 Driver Profile" }</h2>
            <h3>{ "Tech Stack" }</h3>
            <ul class="tech-stack">
                { for resume.top_skills(SKILL_COUNT).iter().map(|skill| html! { <li class="chip">{ skill.clone() }</li> }) }
            </ul>
            <h3>{ "Experience" }</h3>
            { for resume.recent_experience(EXPERIENCE_COUNT).iter().map(|exp| html! {
                <div class="experience">
                    <div class="experience-title">{ exp.title.clone() }</div>
                    <div class="experience-meta">{ format!("{} | {}", exp.duration, exp.company) }</div>
                </div>
            }) }
            if let Some(edu) = resume.education.first() {
                <h3>{ "Education" }</h3>
                <div class="education">
                    <div class="education-degree">{ edu.degree.clone() }</div>
                    <div class="education-meta">{ format!("{} | {}", edu.institution, edu.graduation) }</div>
                </div>
            }
        </section>
    }
}

fn render_comms(resume: &ResumeData) -> Html {
    let info = resume.info();
    let link_row = |icon: &'static str, label: &'static str, url: Option<String>| {
        url.map(|url| {
            html! {
                <li>
                    <span aria-hidden="true">{ icon }</span>
                    <span class="comms-label">{ label }</span>
                    <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ url }</a>
                </li>
            }
        })
        .unwrap_or_default()
    };
    html! {
        <section class="panel direct-comms">
            <h2>{ "📡 Direct Communication" }</h2>
            <ul>
                <li>
                    <span aria-hidden="true">{"👤"}</span>
                    <span class="comms-label">{ "Name" }</span>
                    <span>{ info.name.clone() }</span>
                </li>
                if let Some(location) = info.location.clone() {
                    <li>
                        <span aria-hidden="true">{"📍"}</span>
                        <span class="comms-label">{ "Location" }</span>
                        <span>{ location }</span>
                    </li>
                }
                <li>
                    <span aria-hidden="true">{"📧"}</span>
                    <span class="comms-label">{ "Email" }</span>
                    <a href={format!("mailto:{}", info.email)}>{ info.email.clone() }</a>
                </li>
                if let Some(phone) = info.phone.clone() {
                    <li>
                        <span aria-hidden="true">{"📞"}</span>
                        <span class="comms-label">{ "Phone" }</span>
                        <a href={format!("tel:{phone}")}>{ phone }</a>
                    </li>
                }
                { link_row("💼", "LinkedIn", info.linkedin.clone()) }
                { link_row("🐙", "GitHub", info.github.clone()) }
            </ul>
        </section>
    }
}

fn render_quick_actions() -> Html {
    let pdf = crate::paths::resume_pdf_url();
    html! {
        <section class="panel quick-actions">
            <h2>{ "⚡ Quick Actions" }</h2>
            <a id="download-resume" class="racing-button-gold" href={pdf} download="Dev_Patel_Resume.pdf">
                { "📄 Download Resume" }
            </a>
            <a id="schedule-call" class="racing-button-outline" href={SCHEDULE_CALL_URL} target="_blank" rel="noopener noreferrer">
                { "📅 Schedule Call" }
            </a>
        </section>
    }
}

#[function_component(ContactSidebar)]
pub fn contact_sidebar(props: &Props) -> Html {
    let details = props.resume.as_ref().map_or_else(
        || html! { <p class="panel loading" aria-busy="true">{ "Loading driver profile..." }</p> },
        |resume| html! { <>{ render_profile(resume) }{ render_comms(resume) }</> },
    );
    html! {
        <aside class="contact-sidebar">
            { render_summary(&props.badges, props.best_lap) }
            { details }
            { render_quick_actions() }
        </aside>
    }
}
