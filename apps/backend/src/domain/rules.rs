use std::ops::RangeInclusive;

/// Admin-chosen total prize, in points.
pub const CUSTOM_PRIZE_RANGE: RangeInclusive<i32> = 100..=10_000;
/// Winners per round, configured or admin-chosen.
pub const WINNER_COUNT_RANGE: RangeInclusive<i32> = 1..=20;
/// Admin-chosen entry window, in minutes (one day max).
pub const CUSTOM_DURATION_RANGE: RangeInclusive<i64> = 1..=1440;
/// Configured entry or announce window, in minutes.
pub const WINDOW_MINUTES_RANGE: RangeInclusive<i64> = 1..=1440;
/// Scheduler tick period, in seconds.
pub const TICK_SECONDS_RANGE: RangeInclusive<u64> = 1..=300;

/// First round ever created gets this number.
pub const FIRST_ROUND_NUMBER: i32 = 1;

pub fn next_round_number(last: Option<i32>) -> i32 {
    last.map_or(FIRST_ROUND_NUMBER, |n| n + 1)
}
