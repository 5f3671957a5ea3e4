//! In-memory game state and the records it produces.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Screen currently mounted by the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    #[default]
    Garage,
    Track,
    Contact,
}

impl Scene {
    pub const ALL: [Self; 3] = [Self::Garage, Self::Track, Self::Contact];

    /// Resolve a scene name; anything unrecognised lands in the garage.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "track" => Self::Track,
            "contact" => Self::Contact,
            _ => Self::Garage,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Garage => "garage",
            Self::Track => "track",
            Self::Contact => "contact",
        }
    }

    /// Human-readable label used for screen reader announcements.
    #[must_use]
    pub const fn announcement_label(self) -> &'static str {
        match self {
            Self::Garage => "Garage - Home screen",
            Self::Track => "Racing track - Projects view",
            Self::Contact => "Contact form",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Exploration,
    Speed,
    Completion,
    Special,
}

/// An achievement. Unique by `id`; awarded at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned_at: DateTime<Utc>,
    pub category: BadgeCategory,
}

/// Snapshot of a completed lap, as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    /// Lap duration in milliseconds.
    pub time: u64,
    pub date: DateTime<Utc>,
    pub projects_visited: usize,
    pub badges_earned: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11yOptions {
    #[serde(default)]
    pub reduce_motion: bool,
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default = "default_true")]
    pub announcements: bool,
}

impl Default for A11yOptions {
    fn default() -> Self {
        Self {
            reduce_motion: false,
            high_contrast: false,
            announcements: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub audio: bool,
    #[serde(default)]
    pub a11y: A11yOptions,
}

impl Settings {
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            audio: true,
            a11y: A11yOptions::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_theme(Theme::default())
    }
}

/// Live session state owned by the [`crate::GameStateManager`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub current_scene: Scene,
    pub visited_projects: BTreeSet<String>,
    pub badges: Vec<Badge>,
    /// Epoch milliseconds.
    pub lap_start_time: Option<u64>,
    /// Epoch milliseconds.
    pub lap_end_time: Option<u64>,
    pub best_lap_time: Option<u64>,
    pub theme: Theme,
    pub is_timer_running: bool,
}

impl GameState {
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scene_names_fall_back_to_garage() {
        assert_eq!(Scene::from_name("track"), Scene::Track);
        assert_eq!(Scene::from_name(" Contact "), Scene::Contact);
        assert_eq!(Scene::from_name("garage"), Scene::Garage);
        assert_eq!(Scene::from_name("unknown"), Scene::Garage);
        assert_eq!(Scene::from_name(""), Scene::Garage);
    }

    #[test]
    fn scene_names_match_serde_representation() {
        for scene in Scene::ALL {
            let json = serde_json::to_string(&scene).unwrap();
            assert_eq!(json, format!("\"{}\"", scene.name()));
        }
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn settings_defaults_keep_announcements_on() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.audio);
        assert!(settings.a11y.announcements);
        assert!(!settings.a11y.reduce_motion);
    }
}
