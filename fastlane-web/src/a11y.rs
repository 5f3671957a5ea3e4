// Accessibility and document-level presentation helpers
use crate::game::{A11yOptions, Scene, Theme};

pub const MAIN_CONTENT_ID: &str = "main-content";

/// CSS for visible focus rings, the skip link, and screen reader utilities.
///
/// Injected by the shell so keyboard users always see where focus is, even
/// before the site stylesheet loads.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #FFD700;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} .skip-link{position:absolute;left:-9999px;top:0} .skip-link:focus{left:1rem;top:1rem;z-index:100}"
}

/// Live-region text for a scene transition.
#[must_use]
pub fn scene_announcement(scene: Scene) -> String {
    format!("Navigated to {}", scene.announcement_label())
}

/// Reflect the theme onto `<html data-theme>`.
pub fn set_theme_attr(theme: Theme) {
    if let Some(html) = crate::dom::document().and_then(|doc| doc.document_element()) {
        let _ = html.set_attribute("data-theme", theme.as_str());
    }
}

/// Toggle the high-contrast and reduced-motion classes on `<html>`.
pub fn apply_a11y_classes(options: A11yOptions) {
    let Some(html) = crate::dom::document().and_then(|doc| doc.document_element()) else {
        return;
    };
    let classes = html.class_list();
    for (class, enabled) in a11y_classes(options) {
        let _ = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }
}

#[must_use]
pub const fn a11y_classes(options: A11yOptions) -> [(&'static str, bool); 2] {
    [
        ("hc", options.high_contrast),
        ("reduce-motion", options.reduce_motion),
    ]
}

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Theme preferred by the operating system; dark when it cannot be queried.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn system_theme() -> Theme {
    crate::dom::window()
        .and_then(|win| win.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map_or(Theme::Dark, |mql| theme_for_dark_match(mql.matches()))
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub const fn system_theme() -> Theme {
    Theme::Dark
}

#[must_use]
pub const fn theme_for_dark_match(matches: bool) -> Theme {
    if matches { Theme::Dark } else { Theme::Light }
}
