//! Round timing and prize parameters.

use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::rules::{CUSTOM_DURATION_RANGE, CUSTOM_PRIZE_RANGE, WINNER_COUNT_RANGE};
use crate::config::draw::DrawSettings;
use crate::errors::domain::DomainError;

/// Inputs to round creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    pub total_prize: i32,
    pub winner_count: i32,
    pub entry_minutes: i64,
    pub announce_minutes: i64,
}

impl RoundParams {
    /// Factory defaults: prize drawn uniformly from the configured range.
    pub fn randomized<R: Rng + ?Sized>(settings: &DrawSettings, rng: &mut R) -> Self {
        Self {
            total_prize: rng.random_range(settings.prize_min..=settings.prize_max),
            winner_count: settings.winner_count,
            entry_minutes: settings.entry_minutes,
            announce_minutes: settings.announce_minutes,
        }
    }

    /// Admin-supplied parameters; `duration_minutes` is the entry window.
    pub fn custom(
        total_prize: i32,
        winner_count: i32,
        duration_minutes: i64,
        announce_minutes: i64,
    ) -> Result<Self, DomainError> {
        if !CUSTOM_PRIZE_RANGE.contains(&total_prize) {
            return Err(DomainError::validation(format!(
                "total_prize must be within {}..={}, got {total_prize}",
                CUSTOM_PRIZE_RANGE.start(),
                CUSTOM_PRIZE_RANGE.end()
            )));
        }
        if !WINNER_COUNT_RANGE.contains(&winner_count) {
            return Err(DomainError::validation(format!(
                "winner_count must be within {}..={}, got {winner_count}",
                WINNER_COUNT_RANGE.start(),
                WINNER_COUNT_RANGE.end()
            )));
        }
        if !CUSTOM_DURATION_RANGE.contains(&duration_minutes) {
            return Err(DomainError::validation(format!(
                "duration_minutes must be within {}..={}, got {duration_minutes}",
                CUSTOM_DURATION_RANGE.start(),
                CUSTOM_DURATION_RANGE.end()
            )));
        }
        Ok(Self {
            total_prize,
            winner_count,
            entry_minutes: duration_minutes,
            announce_minutes,
        })
    }
}

/// Fully derived schedule and prize split for a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundPlan {
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub announce_time: OffsetDateTime,
    pub final_end_time: OffsetDateTime,
    pub total_prize: i32,
    pub winner_count: i32,
    pub prize_per_winner: i32,
}

impl RoundPlan {
    pub fn new(params: RoundParams, now: OffsetDateTime) -> Self {
        let start_time = truncate_to_second(now);
        let end_time = start_time + Duration::minutes(params.entry_minutes);
        Self {
            start_time,
            end_time,
            announce_time: end_time,
            final_end_time: end_time + Duration::minutes(params.announce_minutes),
            total_prize: params.total_prize,
            winner_count: params.winner_count,
            prize_per_winner: prize_per_winner(params.total_prize, params.winner_count),
        }
    }
}

/// Floor division; the remainder stays undistributed.
pub fn prize_per_winner(total_prize: i32, winner_count: i32) -> i32 {
    if winner_count <= 0 {
        return 0;
    }
    total_prize / winner_count
}

pub fn truncate_to_second(t: OffsetDateTime) -> OffsetDateTime {
    t - Duration::nanoseconds(i64::from(t.nanosecond()))
}
