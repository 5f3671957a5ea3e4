//! A manager over in-memory storage and a hand-driven clock, plus a seeded
//! driver that decides how long each stretch between pit stops takes.
use fastlane_game::constants::STORAGE_KEY;
use fastlane_game::{GameStateManager, ManualClock, MemoryStore, ProjectCatalog, Scene, Theme};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

pub type RigManager = GameStateManager<MemoryStore, ManualClock>;

/// Simulated drive between two pit stops, in milliseconds.
pub const SEGMENT_MS: RangeInclusive<u64> = 4_000..=45_000;

/// 2023-11-14T22:13:20Z
const EPOCH_MS: u64 = 1_700_000_000_000;

pub struct LapRig {
    pub store: MemoryStore,
    pub clock: ManualClock,
    pub manager: RigManager,
    rng: ChaCha8Rng,
}

impl LapRig {
    pub fn new(seed: u64) -> Self {
        Self::with_store(seed, MemoryStore::new())
    }

    /// Rig over pre-filled storage, e.g. a document an older build wrote.
    pub fn with_store(seed: u64, store: MemoryStore) -> Self {
        let clock = ManualClock::starting_at(EPOCH_MS);
        let manager = GameStateManager::new(store.clone(), clock.clone(), Theme::Dark);
        Self {
            store,
            clock,
            manager,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A fresh manager over the same storage, as after a page reload.
    pub fn reload(&self) -> RigManager {
        GameStateManager::new(self.store.clone(), self.clock.clone(), Theme::Dark)
    }

    pub fn stored_document(&self) -> Option<String> {
        self.store.raw(STORAGE_KEY)
    }

    pub fn pit_stops(&self) -> Vec<String> {
        ProjectCatalog::default_catalog()
            .ids()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Move the clock forward by one random stretch and return its length.
    pub fn drive(&mut self) -> u64 {
        let ms = self.rng.gen_range(SEGMENT_MS);
        self.clock.advance(ms);
        ms
    }

    pub fn random_below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound.max(1))
    }

    /// Start a lap the way "Another Lap" does and visit every pit stop in a
    /// seeded order. Returns the total time driven.
    pub fn run_lap(&mut self) -> u64 {
        self.manager.reset_timer();
        self.manager.set_current_scene(Scene::Track);
        let mut stops = self.pit_stops();
        stops.shuffle(&mut self.rng);
        let mut driven = 0;
        for id in stops {
            driven += self.drive();
            self.manager.visit_project(&id);
        }
        driven
    }

    /// One-line summary for failure messages.
    pub fn describe(&self) -> String {
        let m = &self.manager;
        format!(
            "scene {} visited {}/{} badges {} laps {} running {}",
            m.current_scene(),
            m.visited_count(),
            self.pit_stops().len(),
            m.badges().len(),
            m.lap_records().len(),
            m.state().is_timer_running
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_drives_the_same_lap() {
        let mut a = LapRig::new(7);
        let mut b = LapRig::new(7);
        assert_eq!(a.run_lap(), b.run_lap());
        assert_eq!(a.manager.best_lap_time(), b.manager.best_lap_time());
    }

    #[test]
    fn lap_time_is_the_sum_of_segments() {
        let mut rig = LapRig::new(99);
        let driven = rig.run_lap();
        let stops = rig.pit_stops().len() as u64;
        assert!(driven >= SEGMENT_MS.start() * stops);
        assert!(driven <= SEGMENT_MS.end() * stops);
        assert_eq!(rig.manager.last_lap_time(), Some(driven));
        assert!(rig.stored_document().is_some());
    }
}
