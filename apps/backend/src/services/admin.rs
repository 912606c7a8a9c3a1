//! Administrative overrides and aggregate stats.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::round_factory;
use crate::config::draw::DrawSettings;
use crate::domain::schedule::RoundParams;
use crate::errors::domain::DomainError;
use crate::repos::entries;
use crate::repos::rounds::{self, Round};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawStats {
    pub total_rounds: u64,
    pub active_rounds: u64,
    pub total_entries: u64,
    pub total_prize_distributed: i64,
    /// Entries per round, two decimals
    pub average_participation: f64,
}

/// Cancel the open round, whatever its phase. `false` if nothing was open.
pub async fn stop_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let stopped = rounds::cancel_open(conn, now).await?;
    if stopped {
        warn!("open draw round cancelled by admin");
    }
    Ok(stopped)
}

/// Replace the open round with one using caller-supplied parameters.
///
/// `duration_minutes` is the entry window; the announce window keeps the
/// configured length. Bounds are checked before anything is cancelled.
pub async fn create_custom<C>(
    conn: &C,
    settings: &DrawSettings,
    total_prize: i32,
    winner_count: i32,
    duration_minutes: i64,
    now: OffsetDateTime,
) -> Result<Round, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let params = RoundParams::custom(
        total_prize,
        winner_count,
        duration_minutes,
        settings.announce_minutes,
    )?;

    stop_current(conn, now).await?;
    let round = round_factory::create_round(conn, params, now).await?;
    info!(
        round_id = round.id,
        round_number = round.round_number,
        duration_minutes,
        "custom draw round created by admin"
    );
    Ok(round)
}

pub async fn stats<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<DrawStats, DomainError> {
    let total_rounds = rounds::count_all(conn).await?;
    let active_rounds = rounds::count_open(conn).await?;
    let total_entries = entries::count_all(conn).await?;
    let total_prize_distributed = entries::total_prize_distributed(conn).await?;

    Ok(DrawStats {
        total_rounds,
        active_rounds,
        total_entries,
        total_prize_distributed,
        average_participation: average(total_entries, total_rounds),
    })
}

fn average(entries: u64, rounds: u64) -> f64 {
    if rounds == 0 {
        return 0.0;
    }
    let raw = entries as f64 / rounds as f64;
    (raw * 100.0).round() / 100.0
}
