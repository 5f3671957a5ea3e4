pub mod announcer;
pub mod error_banner;
pub mod lap_complete;
pub mod modal;
pub mod toast;
