//! WebDriver sessions and the in-page test bridge.
pub mod bridge;
pub mod session;

pub use bridge::{BRIDGE_GLOBAL, TestBridge};
pub use session::{BrowserConfig, BrowserKind, new_session};
