//! Guarded round transitions: ACTIVE -> ANNOUNCING -> COMPLETED.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::{ConnectionTrait, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{prizes, round_factory};
use crate::config::draw::DrawSettings;
use crate::domain::selection::select_winners;
use crate::domain::RoundStatus;
use crate::errors::domain::DomainError;
use crate::repos::entries;
use crate::repos::rounds::{self, Round};

/// What `advance` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No guard held, or another worker claimed the transition first
    Unchanged,
    /// Entry window closed; winners drawn and paid
    Announced {
        round_number: i32,
        winner_ids: Vec<i64>,
    },
    /// Announce window closed; `next` is the open round afterwards
    Completed { round_number: i32, next: Round },
}

/// Advance `round` if a time guard holds at `now`.
///
/// The status change is a conditional claim, so concurrent callers cannot
/// both run selection. Everything done here belongs to the caller's
/// transaction and commits or rolls back as one unit.
pub async fn advance<C>(
    conn: &C,
    settings: &DrawSettings,
    round: &Round,
    now: OffsetDateTime,
) -> Result<Transition, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    match round.status {
        RoundStatus::Active if now >= round.end_time => announce(conn, round, now).await,
        RoundStatus::Announcing if now >= round.final_end_time => {
            complete(conn, settings, round, now).await
        }
        _ => Ok(Transition::Unchanged),
    }
}

async fn announce<C>(conn: &C, round: &Round, now: OffsetDateTime) -> Result<Transition, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let claimed = rounds::claim_status(
        conn,
        round.id,
        RoundStatus::Active,
        RoundStatus::Announcing,
        now,
    )
    .await?;
    if !claimed {
        debug!(round_id = round.id, "announce already claimed");
        return Ok(Transition::Unchanged);
    }

    let pool = entries::list_for_round(conn, round.id).await?;
    let k = usize::try_from(round.winner_count).unwrap_or(0);
    let winners = select_winners(&pool, k, &mut StdRng::from_os_rng());

    prizes::distribute(conn, round, &winners, now).await?;

    let winner_ids: Vec<i64> = winners.iter().map(|e| e.id).collect();
    rounds::set_winner_ids(conn, round.id, &winner_ids, now).await?;

    info!(
        round_id = round.id,
        round_number = round.round_number,
        entries = pool.len(),
        winners = winner_ids.len(),
        "draw round announced"
    );
    Ok(Transition::Announced {
        round_number: round.round_number,
        winner_ids,
    })
}

async fn complete<C>(
    conn: &C,
    settings: &DrawSettings,
    round: &Round,
    now: OffsetDateTime,
) -> Result<Transition, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let claimed = rounds::claim_status(
        conn,
        round.id,
        RoundStatus::Announcing,
        RoundStatus::Completed,
        now,
    )
    .await?;
    if !claimed {
        debug!(round_id = round.id, "completion already claimed");
        return Ok(Transition::Unchanged);
    }

    info!(
        round_id = round.id,
        round_number = round.round_number,
        "draw round completed"
    );

    let next = round_factory::get_current_or_create(conn, settings, now).await?;
    Ok(Transition::Completed {
        round_number: round.round_number,
        next,
    })
}
