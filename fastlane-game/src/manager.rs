//! The game state manager: scene, pit stops, lap timing, badges, theme.
//!
//! One manager is constructed at startup and shared by reference. Every
//! mutating call writes the whole document back to its [`BlobStore`]; storage
//! failures are logged and never surfaced to the caller.
use std::collections::BTreeSet;
use std::fmt;

use crate::BlobStore;
use crate::badges::{lap_complete_badge, new_record_badge, pit_stop_badge};
use crate::clock::Clock;
use crate::constants::{SCHEMA_VERSION, STORAGE_KEY, TOTAL_PIT_STOPS};
use crate::laps::insert_lap_record;
use crate::schema::{PersistedGameState, StorageData};
use crate::state::{A11yOptions, Badge, GameState, LapRecord, Scene, Settings, Theme};

/// Something observers may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    SceneChanged(Scene),
    ThemeChanged(Theme),
    BadgeAwarded(Badge),
    LapStarted,
    LapCompleted { time: u64, new_best: bool },
    LapReset,
    DataCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&StateEvent)>;

pub struct GameStateManager<S, C>
where
    S: BlobStore,
    C: Clock,
{
    store: S,
    clock: C,
    system_theme: Theme,
    state: GameState,
    lap_records: Vec<LapRecord>,
    settings: Settings,
    theme_chosen: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S, C> fmt::Debug for GameStateManager<S, C>
where
    S: BlobStore,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameStateManager")
            .field("state", &self.state)
            .field("lap_records", &self.lap_records.len())
            .field("settings", &self.settings)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S, C> GameStateManager<S, C>
where
    S: BlobStore,
    C: Clock,
{
    /// Load, migrate, and validate whatever the store holds. Missing or
    /// unreadable documents fall back to defaults themed by `system_theme`.
    pub fn new(store: S, clock: C, system_theme: Theme) -> Self {
        let data = load_document(&store, system_theme);
        let theme_chosen = data.game_state.theme.is_some();
        let state = data.to_game_state(system_theme);
        let settings = data.settings_or(system_theme);
        Self {
            store,
            clock,
            system_theme,
            state,
            lap_records: data.lap_records,
            settings,
            theme_chosen,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn current_scene(&self) -> Scene {
        self.state.current_scene
    }

    /// Entering the track with no running timer starts a lap.
    pub fn set_current_scene(&mut self, scene: Scene) {
        self.state.current_scene = scene;
        log::info!("scene -> {scene}");
        self.persist();
        self.emit(&StateEvent::SceneChanged(scene));

        if scene == Scene::Track && !self.state.is_timer_running {
            self.start_lap_timer();
        }
    }

    /// Record a pit stop. Returns `true` only the first time an id is seen,
    /// and never once every pit stop of the lap has been visited.
    pub fn visit_project(&mut self, project_id: &str) -> bool {
        if self.state.visited_projects.contains(project_id) {
            return false;
        }
        if self.state.visited_projects.len() >= TOTAL_PIT_STOPS {
            log::debug!("ignoring visit to {project_id}: all pit stops visited");
            return false;
        }
        self.state.visited_projects.insert(project_id.to_string());
        let badge = pit_stop_badge(project_id, self.clock.now_utc());
        self.award_badge(badge);
        self.check_lap_completion();
        self.persist();
        true
    }

    fn check_lap_completion(&mut self) {
        if self.state.visited_projects.len() < TOTAL_PIT_STOPS {
            return;
        }
        if self.stop_lap_timer().is_some() {
            let badge = lap_complete_badge(self.clock.now_utc());
            self.award_badge(badge);
        }
    }

    #[must_use]
    pub fn visited_projects(&self) -> BTreeSet<String> {
        self.state.visited_projects.clone()
    }

    #[must_use]
    pub fn is_project_visited(&self, project_id: &str) -> bool {
        self.state.visited_projects.contains(project_id)
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.state.visited_projects.len()
    }

    pub fn start_lap_timer(&mut self) {
        self.state.lap_start_time = Some(self.clock.now_ms());
        self.state.lap_end_time = None;
        self.state.is_timer_running = true;
        self.persist();
        self.emit(&StateEvent::LapStarted);
    }

    /// Stop the running lap and return its duration, or `None` when no lap
    /// is running.
    pub fn stop_lap_timer(&mut self) -> Option<u64> {
        if !self.state.is_timer_running {
            return None;
        }
        let start = self.state.lap_start_time?;
        let end = self.clock.now_ms();
        self.state.lap_end_time = Some(end);
        self.state.is_timer_running = false;
        let lap_time = end.saturating_sub(start);

        let new_best = self.state.best_lap_time.is_none_or(|best| lap_time < best);
        if new_best {
            self.state.best_lap_time = Some(lap_time);
            let badge = new_record_badge(lap_time, self.clock.now_utc());
            self.award_badge(badge);
        }

        insert_lap_record(
            &mut self.lap_records,
            LapRecord {
                time: lap_time,
                date: self.clock.now_utc(),
                projects_visited: self.state.visited_projects.len(),
                badges_earned: self.state.badges.len(),
            },
        );
        self.persist();
        self.emit(&StateEvent::LapCompleted {
            time: lap_time,
            new_best,
        });
        Some(lap_time)
    }

    /// Elapsed time of the running lap, or 0.
    #[must_use]
    pub fn current_lap_time(&self) -> u64 {
        match (self.state.is_timer_running, self.state.lap_start_time) {
            (true, Some(start)) => self.clock.now_ms().saturating_sub(start),
            _ => 0,
        }
    }

    /// Duration of the most recently completed lap, if one is on the clock.
    #[must_use]
    pub fn last_lap_time(&self) -> Option<u64> {
        if self.state.is_timer_running {
            return None;
        }
        let start = self.state.lap_start_time?;
        let end = self.state.lap_end_time?;
        Some(end.saturating_sub(start))
    }

    #[must_use]
    pub fn best_lap_time(&self) -> Option<u64> {
        self.state.best_lap_time
    }

    /// Leaderboard, fastest first.
    #[must_use]
    pub fn lap_records(&self) -> &[LapRecord] {
        &self.lap_records
    }

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.state.badges
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Clear the timer and the visited set. Badges and best lap survive.
    pub fn reset_timer(&mut self) {
        self.state.lap_start_time = None;
        self.state.lap_end_time = None;
        self.state.is_timer_running = false;
        self.state.visited_projects.clear();
        self.persist();
        self.emit(&StateEvent::LapReset);
    }

    /// Append a badge unless one with the same id already exists.
    pub fn award_badge(&mut self, badge: Badge) {
        if self.state.has_badge(&badge.id) {
            return;
        }
        log::debug!("badge awarded: {}", badge.id);
        self.state.badges.push(badge.clone());
        self.persist();
        self.emit(&StateEvent::BadgeAwarded(badge));
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme_chosen = true;
        self.apply_theme(theme);
        self.persist();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.state.theme.toggled());
    }

    /// Follow a live system theme change while the visitor has never picked
    /// or stored a theme. Returns whether the theme was applied.
    pub fn follow_system_theme(&mut self, theme: Theme) -> bool {
        self.system_theme = theme;
        if self.theme_chosen {
            return false;
        }
        self.apply_theme(theme);
        true
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.settings.theme = theme;
        self.emit(&StateEvent::ThemeChanged(theme));
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_audio(&mut self, enabled: bool) {
        self.settings.audio = enabled;
        self.persist();
    }

    pub fn set_a11y(&mut self, options: A11yOptions) {
        self.settings.a11y = options;
        self.persist();
    }

    /// Drop the stored document and return to first-visit defaults.
    pub fn clear_data(&mut self) {
        if let Err(err) = self.store.remove(STORAGE_KEY) {
            log::warn!("failed to clear stored progress: {err}");
        }
        let previous_theme = self.state.theme;
        self.state = GameState::with_theme(self.system_theme);
        self.lap_records.clear();
        self.settings = Settings::with_theme(self.system_theme);
        self.theme_chosen = false;
        self.emit(&StateEvent::DataCleared);
        if previous_theme != self.system_theme {
            self.emit(&StateEvent::ThemeChanged(self.system_theme));
        }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&StateEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sub, _)| *sub != id);
    }

    fn emit(&self, event: &StateEvent) {
        for (_, observer) in &self.observers {
            observer(event);
        }
    }

    /// Document as it would be written right now.
    #[must_use]
    pub fn snapshot(&self) -> StorageData {
        StorageData {
            version: SCHEMA_VERSION,
            game_state: PersistedGameState::from_state(&self.state),
            lap_records: self.lap_records.clone(),
            settings: Some(self.settings),
        }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.snapshot()) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("failed to encode game state: {err}");
                return;
            }
        };
        if let Err(err) = self.store.write(STORAGE_KEY, &raw) {
            log::warn!("failed to save game state: {err}");
        }
    }
}

fn load_document<S: BlobStore>(store: &S, system_theme: Theme) -> StorageData {
    let raw = match store.read(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StorageData::empty(system_theme),
        Err(err) => {
            log::warn!("failed to read stored progress: {err}");
            return StorageData::empty(system_theme);
        }
    };
    match StorageData::parse(&raw) {
        Ok((data, repairs)) => {
            for repair in repairs {
                log::warn!("repaired stored progress: {repair:?}");
            }
            data
        }
        Err(err) => {
            log::warn!("ignoring stored progress: {err}");
            StorageData::empty(system_theme)
        }
    }
}
