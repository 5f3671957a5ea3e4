use crate::app::shell::Toast;
use crate::game::{DynGameStateManager, Scene};
use crate::router::Route;
use crate::scenes::Viewport;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use yew::prelude::*;

/// Shared handle to the one game state manager of the page.
///
/// Equality is identity, so components holding the same handle only
/// re-render when the shell bumps its revision.
#[derive(Clone)]
pub struct ManagerHandle(Rc<RefCell<DynGameStateManager>>);

impl ManagerHandle {
    #[must_use]
    pub fn new(manager: DynGameStateManager) -> Self {
        Self(Rc::new(RefCell::new(manager)))
    }

    /// Manager over the browser's storage, themed by the system preference.
    #[must_use]
    pub fn open() -> Self {
        Self::new(crate::storage::open_manager(crate::a11y::system_theme()))
    }

    pub fn with<R>(&self, f: impl FnOnce(&DynGameStateManager) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut DynGameStateManager) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl PartialEq for ManagerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ManagerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ManagerHandle").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub manager: ManagerHandle,
    pub scene: UseStateHandle<Scene>,
    pub mount_epoch: UseReducerHandle<Counter>,
    pub revision: UseReducerHandle<Counter>,
    pub announcement: UseReducerHandle<Announcement>,
    pub toast: UseStateHandle<Option<Toast>>,
    pub lap_dialog: UseStateHandle<Option<u64>>,
    pub error_banner: UseStateHandle<Option<AttrValue>>,
    pub viewport: UseStateHandle<Viewport>,
    pub paused: UseStateHandle<bool>,
}

impl AppState {
    /// Ask every mounted scene to re-read the manager.
    pub fn refresh(&self) {
        self.revision.dispatch(());
    }

    /// Queue a polite screen reader message.
    pub fn announce(&self, text: impl Into<AttrValue>) {
        self.announcement.dispatch(text.into());
    }

    /// Key for the mounted scene; changes on every transition so re-entering a
    /// scene mounts it fresh.
    #[must_use]
    pub fn scene_key(&self) -> String {
        format!("{}-{}", self.scene.name(), self.mount_epoch.0)
    }
}

/// Monotonic counter whose updates never read a stale value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter(pub u64);

impl Reducible for Counter {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Latest live-region message. `seq` moves on every announcement, so
/// repeating the same text still renders a fresh node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Announcement {
    pub seq: u64,
    pub text: AttrValue,
}

impl Reducible for Announcement {
    type Action = AttrValue;

    fn reduce(self: Rc<Self>, text: AttrValue) -> Rc<Self> {
        Rc::new(Self {
            seq: self.seq.wrapping_add(1),
            text,
        })
    }
}

/// Scene to mount first: an explicit deep link wins over the stored scene.
#[must_use]
pub fn initial_scene(stored: Scene, route: Option<&Route>) -> Scene {
    match route {
        Some(route @ (Route::Track | Route::Contact)) => route.to_scene(),
        _ => stored,
    }
}

#[hook]
pub fn use_app_state(route: Option<Route>) -> AppState {
    use_app_state_with(route, ManagerHandle::open)
}

#[hook]
pub fn use_app_state_with<F>(route: Option<Route>, init: F) -> AppState
where
    F: FnOnce() -> ManagerHandle,
{
    let manager = (*use_state(init)).clone();
    let stored = manager.with(|m| m.current_scene());
    AppState {
        scene: use_state(|| initial_scene(stored, route.as_ref())),
        mount_epoch: use_reducer(Counter::default),
        revision: use_reducer(Counter::default),
        announcement: use_reducer(Announcement::default),
        toast: use_state(|| None::<Toast>),
        lap_dialog: use_state(|| None::<u64>),
        error_banner: use_state(|| None::<AttrValue>),
        viewport: use_state(Viewport::default),
        paused: use_state(|| false),
        manager,
    }
}
