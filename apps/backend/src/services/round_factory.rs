//! Creates rounds and resolves the current one.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::{ConnectionTrait, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::draw::DrawSettings;
use crate::domain::rules::next_round_number;
use crate::domain::schedule::{RoundParams, RoundPlan};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::rounds::{self, Round};

/// Re-read attempts after losing a creation race.
const MAX_CREATE_ATTEMPTS: u32 = 3;

/// Insert the next round (`last + 1`) with the given parameters.
///
/// The insert runs in a nested transaction so a unique violation can be
/// rolled back without poisoning the caller's transaction. Losing a race
/// surfaces as `Conflict(OpenRoundExists | RoundNumberTaken)`.
pub async fn create_round<C>(
    conn: &C,
    params: RoundParams,
    now: OffsetDateTime,
) -> Result<Round, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let round_number = next_round_number(rounds::last_round_number(conn).await?);
    let plan = RoundPlan::new(params, now);

    let savepoint = conn.begin().await?;
    match rounds::create_round(&savepoint, round_number, &plan, now).await {
        Ok(round) => {
            savepoint.commit().await?;
            info!(
                round_id = round.id,
                round_number = round.round_number,
                total_prize = round.total_prize,
                winner_count = round.winner_count,
                prize_per_winner = round.prize_per_winner,
                "draw round created"
            );
            Ok(round)
        }
        Err(e) => {
            if let Err(rollback) = savepoint.rollback().await {
                warn!(
                    round_number,
                    raw_error = %Redacted(&rollback.to_string()),
                    "round creation rollback failed"
                );
            }
            Err(e)
        }
    }
}

/// Return the open round, creating one with randomized defaults if none exists.
pub async fn get_current_or_create<C>(
    conn: &C,
    settings: &DrawSettings,
    now: OffsetDateTime,
) -> Result<Round, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    for attempt in 1..=MAX_CREATE_ATTEMPTS {
        if let Some(open) = rounds::find_open(conn).await? {
            return Ok(open);
        }

        let params = RoundParams::randomized(settings, &mut StdRng::from_os_rng());
        match create_round(conn, params, now).await {
            Ok(round) => return Ok(round),
            Err(e) if e.is_round_creation_race() => {
                debug!(attempt, error = %e, "lost round creation race, re-reading");
            }
            Err(e) => return Err(e),
        }
    }

    Err(DomainError::conflict(
        ConflictKind::OpenRoundExists,
        "Could not resolve the current round; retry",
    ))
}
