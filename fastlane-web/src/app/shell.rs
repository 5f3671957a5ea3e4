//! Scene transition rules for the application shell.
use crate::game::constants::TOTAL_PIT_STOPS;
use crate::game::Scene;

/// Messages scenes send up to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    SceneChange { scene: String },
    ProjectSelected { id: String, title: String },
    /// Status text for the shell's live region.
    Announce { message: String },
}

impl ShellEvent {
    #[must_use]
    pub fn go(scene: Scene) -> Self {
        Self::SceneChange {
            scene: scene.name().to_string(),
        }
    }

    #[must_use]
    pub fn announce(message: &str) -> Self {
        Self::Announce {
            message: message.to_string(),
        }
    }
}

/// A transient "pit stop" notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
}

pub const TOAST_TITLE: &str = "Pit Stop Complete!";
pub const TOAST_MS: u32 = 3_000;
pub const ERROR_BANNER_MS: u32 = 10_000;
pub const RUNTIME_ERROR_MESSAGE: &str = "An unexpected error occurred. Please refresh the page.";
pub const REJECTION_MESSAGE: &str = "A network or loading error occurred.";

/// Scene to mount for a requested name. Unknown names go to the garage.
#[must_use]
pub fn resolve_scene(name: &str) -> Scene {
    let scene = Scene::from_name(name);
    if scene.name() != name.trim().to_ascii_lowercase() {
        log::warn!("unknown scene {name:?}, showing the garage");
    }
    scene
}

/// What the shell shows after a new pit stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitStopFeedback {
    pub toast: Toast,
    /// Lap time for the completion dialog, when this visit finished the lap.
    pub lap_time: Option<u64>,
}

#[must_use]
pub fn pit_stop_feedback(
    project_title: &str,
    visited_count: usize,
    last_lap_time: Option<u64>,
) -> PitStopFeedback {
    PitStopFeedback {
        toast: Toast {
            title: String::from(TOAST_TITLE),
            message: project_title.to_string(),
        },
        lap_time: if visited_count >= TOTAL_PIT_STOPS {
            last_lap_time
        } else {
            None
        },
    }
}
