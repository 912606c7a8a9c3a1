//! Round status and time-derived phase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Persisted lifecycle state of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Active,
    Announcing,
    Completed,
    Cancelled,
}

impl RoundStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Announcing => "ANNOUNCING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// ACTIVE and ANNOUNCING rounds occupy the single open slot.
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Active | Self::Announcing)
    }

    /// Legal edges of the round state machine.
    pub fn can_transition_to(&self, next: RoundStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Announcing)
                | (Self::Announcing, Self::Completed)
                | (Self::Active, Self::Cancelled)
                | (Self::Announcing, Self::Cancelled)
        )
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "ANNOUNCING" => Ok(Self::Announcing),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown round status '{other}'")),
        }
    }
}

/// Client-facing phase derived from status and clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Entry,
    Announce,
    Completed,
}

/// The timing fields phase logic needs from a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundWindow {
    pub status: RoundStatus,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub final_end_time: OffsetDateTime,
}

/// `status == ACTIVE && start_time <= now < end_time`
pub fn can_enter(w: &RoundWindow, now: OffsetDateTime) -> bool {
    w.status == RoundStatus::Active && w.start_time <= now && now < w.end_time
}

pub fn phase_of(w: &RoundWindow, now: OffsetDateTime) -> Phase {
    match w.status {
        RoundStatus::Active if now < w.end_time => Phase::Entry,
        RoundStatus::Active | RoundStatus::Announcing if now < w.final_end_time => {
            Phase::Announce
        }
        _ => Phase::Completed,
    }
}

/// Seconds until the current phase ends; never negative.
pub fn remaining_seconds(w: &RoundWindow, now: OffsetDateTime) -> i64 {
    let target = match phase_of(w, now) {
        Phase::Entry => w.end_time,
        Phase::Announce => w.final_end_time,
        Phase::Completed => return 0,
    };
    (target - now).whole_seconds().max(0)
}
