//! Draw cycle settings, read from the environment at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::rules::{TICK_SECONDS_RANGE, WINDOW_MINUTES_RANGE, WINNER_COUNT_RANGE};
use crate::error::AppError;

/// Timing and prize defaults for the recurring draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSettings {
    /// Length of the entry window in minutes
    pub entry_minutes: i64,
    /// Length of the announce window in minutes
    pub announce_minutes: i64,
    /// Scheduler tick interval in seconds
    pub tick_seconds: u64,
    pub prize_min: i32,
    pub prize_max: i32,
    pub winner_count: i32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            entry_minutes: 50,
            announce_minutes: 10,
            tick_seconds: 60,
            prize_min: 500,
            prize_max: 2000,
            winner_count: 5,
        }
    }
}

impl DrawSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settings = Self {
            entry_minutes: parse_or("DRAW_ENTRY_MINUTES", defaults.entry_minutes, &lookup)?,
            announce_minutes: parse_or(
                "DRAW_ANNOUNCE_MINUTES",
                defaults.announce_minutes,
                &lookup,
            )?,
            tick_seconds: parse_or("DRAW_TICK_SECONDS", defaults.tick_seconds, &lookup)?,
            prize_min: parse_or("DRAW_PRIZE_MIN", defaults.prize_min, &lookup)?,
            prize_max: parse_or("DRAW_PRIZE_MAX", defaults.prize_max, &lookup)?,
            winner_count: parse_or("DRAW_WINNER_COUNT", defaults.winner_count, &lookup)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (key, minutes) in [
            ("DRAW_ENTRY_MINUTES", self.entry_minutes),
            ("DRAW_ANNOUNCE_MINUTES", self.announce_minutes),
        ] {
            if !WINDOW_MINUTES_RANGE.contains(&minutes) {
                return Err(AppError::config(format!(
                    "{key} must be within {}..={}, got {minutes}",
                    WINDOW_MINUTES_RANGE.start(),
                    WINDOW_MINUTES_RANGE.end()
                )));
            }
        }
        if !TICK_SECONDS_RANGE.contains(&self.tick_seconds) {
            return Err(AppError::config(format!(
                "DRAW_TICK_SECONDS must be within {}..={}, got {}",
                TICK_SECONDS_RANGE.start(),
                TICK_SECONDS_RANGE.end(),
                self.tick_seconds
            )));
        }
        if self.prize_min < 1 || self.prize_min > self.prize_max {
            return Err(AppError::config(format!(
                "DRAW_PRIZE_MIN/DRAW_PRIZE_MAX must satisfy 1 <= min <= max, got {}..={}",
                self.prize_min, self.prize_max
            )));
        }
        if !WINNER_COUNT_RANGE.contains(&self.winner_count) {
            return Err(AppError::config(format!(
                "DRAW_WINNER_COUNT must be within {}..={}, got {}",
                WINNER_COUNT_RANGE.start(),
                WINNER_COUNT_RANGE.end(),
                self.winner_count
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_seconds)
    }
}

fn parse_or<T, F>(key: &str, default: T, lookup: &F) -> Result<T, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{key} is not a valid number: '{raw}'"))),
    }
}
