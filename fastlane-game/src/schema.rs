//! Persisted document layout, migration, and structural validation.
//!
//! The whole site persists a single JSON document under
//! [`STORAGE_KEY`](crate::constants::STORAGE_KEY). Documents written before
//! versioning existed carry no `version` field and are migrated on load.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};

use crate::constants::{SCHEMA_VERSION, TOTAL_PIT_STOPS};
use crate::laps::normalize_leaderboard;
use crate::state::{Badge, GameState, LapRecord, Scene, Settings, Theme};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("stored document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored document is not a JSON object")]
    NotAnObject,
    #[error("stored document version {0} is newer than this build supports")]
    UnsupportedVersion(u64),
}

/// Partial game state as stored. Every field is optional so that documents
/// written by older builds (or truncated writes) still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGameState {
    #[serde(default)]
    pub current_scene: Option<String>,
    #[serde(default)]
    pub visited_projects: Option<Vec<String>>,
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub lap_start_time: Option<u64>,
    #[serde(default)]
    pub lap_end_time: Option<u64>,
    #[serde(default)]
    pub best_lap_time: Option<u64>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub is_timer_running: Option<bool>,
}

impl PersistedGameState {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            current_scene: Some(state.current_scene.name().to_string()),
            visited_projects: Some(state.visited_projects.iter().cloned().collect()),
            badges: Some(state.badges.clone()),
            lap_start_time: state.lap_start_time,
            lap_end_time: state.lap_end_time,
            best_lap_time: state.best_lap_time,
            theme: Some(state.theme),
            is_timer_running: Some(state.is_timer_running),
        }
    }

    /// Overlay stored fields onto `base`; absent fields keep the base value.
    #[must_use]
    pub fn apply_to(&self, mut base: GameState) -> GameState {
        if let Some(scene) = self.current_scene.as_deref() {
            base.current_scene = Scene::from_name(scene);
        }
        if let Some(visited) = &self.visited_projects {
            base.visited_projects = visited.iter().cloned().collect::<BTreeSet<_>>();
        }
        if let Some(badges) = &self.badges {
            base.badges.clone_from(badges);
        }
        base.lap_start_time = self.lap_start_time.or(base.lap_start_time);
        base.lap_end_time = self.lap_end_time.or(base.lap_end_time);
        base.best_lap_time = self.best_lap_time.or(base.best_lap_time);
        if let Some(theme) = self.theme {
            base.theme = theme;
        }
        if let Some(running) = self.is_timer_running {
            base.is_timer_running = running;
        }
        base
    }
}

/// The complete stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub game_state: PersistedGameState,
    #[serde(default)]
    pub lap_records: Vec<LapRecord>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// A correction applied while validating a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// `isTimerRunning` was set but no start time was stored.
    TimerWithoutStart,
    /// More distinct visits than pit stops; the extra ids were dropped.
    VisitedTruncated { dropped: usize },
    /// Badges sharing an id; later duplicates were dropped.
    DuplicateBadges { dropped: usize },
    /// Lap records were unsorted or over capacity.
    LeaderboardNormalized,
    /// A field had the wrong shape and was left at its default.
    FieldDropped { field: String },
    /// Some entries of a list had the wrong shape and were skipped.
    EntriesDropped { field: String, dropped: usize },
}

impl StorageData {
    /// Empty document for a visitor with no stored progress.
    #[must_use]
    pub fn empty(system_theme: Theme) -> Self {
        Self {
            version: SCHEMA_VERSION,
            game_state: PersistedGameState::default(),
            lap_records: Vec::new(),
            settings: Some(Settings::with_theme(system_theme)),
        }
    }

    /// Parse, migrate, and validate raw stored text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a JSON object or when the
    /// document comes from a newer schema. Malformed fields and list entries
    /// are dropped and reported as repairs instead.
    pub fn parse(raw: &str) -> Result<(Self, Vec<Repair>), SchemaError> {
        let value: Value = serde_json::from_str(raw)?;
        let (mut data, mut repairs) = migrate(value)?;
        repairs.extend(data.validate());
        Ok((data, repairs))
    }

    /// Settings, defaulting to the system theme when none were stored.
    #[must_use]
    pub fn settings_or(&self, system_theme: Theme) -> Settings {
        self.settings
            .unwrap_or_else(|| Settings::with_theme(system_theme))
    }

    /// Build the in-memory state this document describes.
    #[must_use]
    pub fn to_game_state(&self, system_theme: Theme) -> GameState {
        self.game_state.apply_to(GameState::with_theme(system_theme))
    }

    /// Structural validation pass. Returns the repairs that were applied.
    pub fn validate(&mut self) -> Vec<Repair> {
        let mut repairs = Vec::new();
        let gs = &mut self.game_state;

        if gs.is_timer_running == Some(true) && gs.lap_start_time.is_none() {
            gs.is_timer_running = Some(false);
            repairs.push(Repair::TimerWithoutStart);
        }

        if let Some(visited) = gs.visited_projects.as_mut() {
            let mut seen = HashSet::new();
            visited.retain(|id| seen.insert(id.clone()));
            if visited.len() > TOTAL_PIT_STOPS {
                let dropped = visited.len() - TOTAL_PIT_STOPS;
                visited.truncate(TOTAL_PIT_STOPS);
                repairs.push(Repair::VisitedTruncated { dropped });
            }
        }

        if let Some(badges) = gs.badges.as_mut() {
            let before = badges.len();
            let mut seen = HashSet::new();
            badges.retain(|b| seen.insert(b.id.clone()));
            let dropped = before - badges.len();
            if dropped > 0 {
                repairs.push(Repair::DuplicateBadges { dropped });
            }
        }

        let before = self.lap_records.clone();
        normalize_leaderboard(&mut self.lap_records);
        if before != self.lap_records {
            repairs.push(Repair::LeaderboardNormalized);
        }

        repairs
    }
}

/// Bring any supported document up to [`SCHEMA_VERSION`].
///
/// Fields are read one at a time so that a single malformed entry costs only
/// that entry; the returned repairs list what was dropped.
///
/// # Errors
///
/// Fails on non-object documents and future versions.
pub fn migrate(value: Value) -> Result<(StorageData, Vec<Repair>), SchemaError> {
    let Value::Object(mut obj) = value else {
        return Err(SchemaError::NotAnObject);
    };
    let version = obj.get("version").and_then(Value::as_u64).unwrap_or(0);
    if version > u64::from(SCHEMA_VERSION) {
        return Err(SchemaError::UnsupportedVersion(version));
    }

    if version == 0 {
        migrate_v0(&mut obj);
    }

    let mut repairs = Vec::new();
    let game_state = match obj.remove("gameState") {
        None | Some(Value::Null) => PersistedGameState::default(),
        Some(Value::Object(mut gs)) => read_game_state(&mut gs, &mut repairs),
        Some(_) => {
            repairs.push(Repair::FieldDropped {
                field: String::from("gameState"),
            });
            PersistedGameState::default()
        }
    };
    let lap_records = take_list(&mut obj, "lapRecords", "lapRecords", &mut repairs)
        .unwrap_or_default();
    let settings = take_field(&mut obj, "settings", "settings", &mut repairs);

    let data = StorageData {
        version: SCHEMA_VERSION,
        game_state,
        lap_records,
        settings,
    };
    Ok((data, repairs))
}

fn read_game_state(gs: &mut Map<String, Value>, repairs: &mut Vec<Repair>) -> PersistedGameState {
    PersistedGameState {
        current_scene: take_field(gs, "currentScene", "gameState.currentScene", repairs),
        visited_projects: take_list(gs, "visitedProjects", "gameState.visitedProjects", repairs),
        badges: take_list(gs, "badges", "gameState.badges", repairs),
        lap_start_time: take_field(gs, "lapStartTime", "gameState.lapStartTime", repairs),
        lap_end_time: take_field(gs, "lapEndTime", "gameState.lapEndTime", repairs),
        best_lap_time: take_field(gs, "bestLapTime", "gameState.bestLapTime", repairs),
        theme: take_field(gs, "theme", "gameState.theme", repairs),
        is_timer_running: take_field(gs, "isTimerRunning", "gameState.isTimerRunning", repairs),
    }
}

/// Absent and `null` read as `None`; a value of the wrong shape is dropped.
fn take_field<T: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    key: &str,
    field: &str,
    repairs: &mut Vec<Repair>,
) -> Option<T> {
    match obj.remove(key)? {
        Value::Null => None,
        value => serde_json::from_value(value)
            .map_err(|e| {
                log::warn!("dropping stored {field}: {e}");
                repairs.push(Repair::FieldDropped {
                    field: field.to_string(),
                });
            })
            .ok(),
    }
}

/// Like [`take_field`] for lists, but keeps every entry that does parse.
fn take_list<T: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    key: &str,
    field: &str,
    repairs: &mut Vec<Repair>,
) -> Option<Vec<T>> {
    match obj.remove(key)? {
        Value::Null => None,
        Value::Array(items) => {
            let total = items.len();
            let kept: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            if kept.len() < total {
                repairs.push(Repair::EntriesDropped {
                    field: field.to_string(),
                    dropped: total - kept.len(),
                });
            }
            Some(kept)
        }
        _ => {
            repairs.push(Repair::FieldDropped {
                field: field.to_string(),
            });
            None
        }
    }
}

/// Legacy documents may hold `null` where a list is expected, or a visited
/// set that serialised as `{}`.
fn migrate_v0(obj: &mut Map<String, Value>) {
    if let Some(Value::Object(gs)) = obj.get_mut("gameState") {
        if let Some(visited) = gs.get_mut("visitedProjects")
            && !visited.is_array()
        {
            *visited = Value::Array(Vec::new());
        }
        if let Some(badges) = gs.get_mut("badges")
            && !badges.is_array()
        {
            *badges = Value::Array(Vec::new());
        }
    }
    if obj.get("gameState").is_some_and(Value::is_null) {
        obj.remove("gameState");
    }
    if obj.get("lapRecords").is_some_and(|v| !v.is_array()) {
        obj.insert(String::from("lapRecords"), Value::Array(Vec::new()));
    }
    if obj.get("settings").is_some_and(Value::is_null) {
        obj.remove("settings");
    }
}
