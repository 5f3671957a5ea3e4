//! Browser-backed storage and clock for the game state manager.
use crate::game::constants::STORAGE_KEY;
use crate::game::{BlobStore, Clock, DynGameStateManager, GameStateManager, StoreError, Theme};

/// `window.localStorage`, looked up on every call so a storage that becomes
/// unavailable mid-session degrades to logged failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl BlobStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = open()?;
        storage.get_item(key).map_err(|err| StoreError::Read {
            key: key.to_string(),
            reason: crate::dom::js_error_message(&err),
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = open()?;
        storage.set_item(key, value).map_err(|err| StoreError::Write {
            key: key.to_string(),
            reason: crate::dom::js_error_message(&err),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let storage = open()?;
        storage.remove_item(key).map_err(|err| StoreError::Write {
            key: key.to_string(),
            reason: crate::dom::js_error_message(&err),
        })
    }
}

fn open() -> Result<web_sys::Storage, StoreError> {
    crate::dom::local_storage()
        .map_err(|err| StoreError::Unavailable(crate::dom::js_error_message(&err)))
}

/// `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        let now = js_sys::Date::now();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ms = now.max(0.0) as u64;
        ms
    }
}

/// Manager over the platform's storage and clock.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn open_manager(system_theme: Theme) -> DynGameStateManager {
    GameStateManager::new(Box::new(LocalStore), Box::new(BrowserClock), system_theme)
}

/// Manager over the platform's storage and clock.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn open_manager(system_theme: Theme) -> DynGameStateManager {
    GameStateManager::new(
        Box::new(crate::game::MemoryStore::new()),
        Box::new(crate::game::SystemClock),
        system_theme,
    )
}

/// Theme to paint before the app mounts: the stored choice, else the system's.
#[must_use]
pub fn initial_theme() -> Theme {
    let system = crate::a11y::system_theme();
    let stored = LocalStore.read(STORAGE_KEY).ok().flatten();
    stored
        .as_deref()
        .and_then(|raw| crate::game::StorageData::parse(raw).ok())
        .map_or(system, |(data, _)| data.to_game_state(system).theme)
}
