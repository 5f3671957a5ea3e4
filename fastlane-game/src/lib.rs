//! Fast Lane core
//!
//! Platform-agnostic state for the racing-themed portfolio: scenes, pit-stop
//! visits, lap timing, badges, and the persisted progress document. This crate
//! has no DOM access; the web front-end supplies a [`BlobStore`] and a
//! [`Clock`].

pub mod badges;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod laps;
pub mod manager;
pub mod resume;
pub mod schema;
pub mod state;
pub mod store;

use std::rc::Rc;

// Re-export commonly used types
pub use catalog::{Position, Project, ProjectCatalog, ProjectCategory};
pub use clock::{Clock, ManualClock, SystemClock, timestamp_from_ms};
pub use laps::format_lap_time;
pub use manager::{GameStateManager, StateEvent, SubscriptionId};
pub use resume::{Education, Experience, PersonalInfo, ResumeData, ResumeLoadError, Skills};
pub use schema::{PersistedGameState, Repair, SchemaError, StorageData};
pub use state::{
    A11yOptions, Badge, BadgeCategory, GameState, LapRecord, Scene, Settings, Theme,
};
pub use store::{MemoryStore, StoreError};

/// Trait for abstracting key/value text storage.
/// Platform-specific implementations should provide this
pub trait BlobStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be accessed.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written (quota, private mode).
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be accessed.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Rc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Manager over boxed storage and clock, as used by front-ends that pick
/// their backends at runtime.
pub type DynGameStateManager = GameStateManager<Box<dyn BlobStore>, Box<dyn Clock>>;
