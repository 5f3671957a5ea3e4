//! Fixed values shared by the core, the web front-end, and the tester.
//!
//! The lap length is a constant rather than the catalog size so that a
//! catalog edit can never silently change what counts as a completed lap.

/// Local storage key holding the whole persisted document.
pub const STORAGE_KEY: &str = "f1-portfolio-data";

/// Schema version written by this crate. Documents without a version are
/// treated as version 0.
pub const SCHEMA_VERSION: u32 = 1;

/// Distinct pit stops needed to complete a lap.
pub const TOTAL_PIT_STOPS: usize = 4;

/// Leaderboard capacity; only the fastest records are retained.
pub const MAX_LAP_RECORDS: usize = 10;

// Badge identifiers --------------------------------------------------------
pub const BADGE_VISITED_PREFIX: &str = "visited-";
pub const BADGE_NEW_RECORD: &str = "new-record";
pub const BADGE_LAP_COMPLETE: &str = "lap-complete";
