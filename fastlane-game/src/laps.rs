//! Lap timing helpers and leaderboard maintenance.
use crate::constants::MAX_LAP_RECORDS;
use crate::state::LapRecord;

/// Render a duration as `M:SS.cc` (minutes, seconds, centiseconds; floored).
#[must_use]
pub fn format_lap_time(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    let centis = (milliseconds % 1000) / 10;
    format!("{minutes}:{remaining_seconds:02}.{centis:02}")
}

/// Insert a record and keep only the fastest [`MAX_LAP_RECORDS`], ascending.
pub fn insert_lap_record(records: &mut Vec<LapRecord>, record: LapRecord) {
    records.push(record);
    normalize_leaderboard(records);
}

/// Sort ascending by time and truncate to capacity. Ties keep insertion order.
pub fn normalize_leaderboard(records: &mut Vec<LapRecord>) {
    records.sort_by_key(|r| r.time);
    records.truncate(MAX_LAP_RECORDS);
}
