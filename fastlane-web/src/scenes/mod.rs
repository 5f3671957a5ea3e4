//! The three screens the shell can mount. Exactly one is mounted at a time;
//! each reads the shared manager and reports back through `on_event`.
pub mod contact;
pub mod garage;
pub mod track;

pub use crate::app::shell::ShellEvent;
use crate::app::state::ManagerHandle;
use yew::prelude::*;

/// Browser viewport in CSS pixels, as last reported by `resize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const COMPACT_WIDTH: u32 = 768;

    /// Narrow (phone-sized) layout; unknown sizes count as wide.
    #[must_use]
    pub const fn is_compact(self) -> bool {
        self.width > 0 && self.width < Self::COMPACT_WIDTH
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SceneProps {
    pub manager: ManagerHandle,
    /// Bumped by the shell whenever the manager changed underneath the scene.
    pub revision: u64,
    pub on_event: Callback<ShellEvent>,
    #[prop_or_default]
    pub viewport: Viewport,
    /// The page is hidden; scenes stop their timers.
    #[prop_or_default]
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_layout_below_tablet_width() {
        assert!(Viewport { width: 375, height: 800 }.is_compact());
        assert!(!Viewport { width: 1280, height: 800 }.is_compact());
        assert!(!Viewport::default().is_compact());
    }
}
