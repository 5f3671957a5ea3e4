//! Badge kinds awarded by the state manager.
use chrono::{DateTime, Utc};

use crate::constants::{BADGE_LAP_COMPLETE, BADGE_NEW_RECORD, BADGE_VISITED_PREFIX};
use crate::laps::format_lap_time;
use crate::state::{Badge, BadgeCategory};

#[must_use]
pub fn visited_badge_id(project_id: &str) -> String {
    format!("{BADGE_VISITED_PREFIX}{project_id}")
}

#[must_use]
pub fn pit_stop_badge(project_id: &str, earned_at: DateTime<Utc>) -> Badge {
    Badge {
        id: visited_badge_id(project_id),
        name: String::from("Pit Stop Complete"),
        description: format!("Visited {project_id}"),
        icon: String::from("🏁"),
        earned_at,
        category: BadgeCategory::Exploration,
    }
}

#[must_use]
pub fn new_record_badge(lap_time: u64, earned_at: DateTime<Utc>) -> Badge {
    Badge {
        id: String::from(BADGE_NEW_RECORD),
        name: String::from("New Record!"),
        description: format!("Completed lap in {}", format_lap_time(lap_time)),
        icon: String::from("🏆"),
        earned_at,
        category: BadgeCategory::Speed,
    }
}

#[must_use]
pub fn lap_complete_badge(earned_at: DateTime<Utc>) -> Badge {
    Badge {
        id: String::from(BADGE_LAP_COMPLETE),
        name: String::from("Lap Complete!"),
        description: String::from("Visited all pit stops"),
        icon: String::from("🏁"),
        earned_at,
        category: BadgeCategory::Completion,
    }
}
