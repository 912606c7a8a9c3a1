//! Prize distribution to selected winners.

use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::repos::entries::{self, Entry};
use crate::repos::rounds::Round;
use crate::repos::users;

/// Outcome of one distribution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    /// Entries newly marked and credited
    pub credited: Vec<i64>,
    /// Entries that were already winners
    pub skipped: Vec<i64>,
}

impl Distribution {
    pub fn total_paid(&self, prize_per_winner: i32) -> i64 {
        self.credited.len() as i64 * i64::from(prize_per_winner)
    }
}

/// Mark each winner and credit `prize_per_winner` to its user.
///
/// Runs in a nested transaction: every mark and credit commits together, or
/// none do. Entries already marked are skipped, which makes a re-run a no-op.
/// A winner whose user is gone fails the whole pass with `NotFound(User)`.
pub async fn distribute<C>(
    conn: &C,
    round: &Round,
    winners: &[Entry],
    now: OffsetDateTime,
) -> Result<Distribution, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let savepoint = conn.begin().await?;
    match pay_all(&savepoint, round, winners, now).await {
        Ok(out) => {
            savepoint.commit().await?;
            info!(
                round_id = round.id,
                round_number = round.round_number,
                credited = out.credited.len(),
                skipped = out.skipped.len(),
                prize_per_winner = round.prize_per_winner,
                total_paid = out.total_paid(round.prize_per_winner),
                "prizes distributed"
            );
            Ok(out)
        }
        Err(e) => {
            if let Err(rollback) = savepoint.rollback().await {
                warn!(
                    round_id = round.id,
                    raw_error = %Redacted(&rollback.to_string()),
                    "prize rollback failed"
                );
            }
            Err(e)
        }
    }
}

async fn pay_all(
    txn: &DatabaseTransaction,
    round: &Round,
    winners: &[Entry],
    now: OffsetDateTime,
) -> Result<Distribution, DomainError> {
    let prize = round.prize_per_winner;
    let mut out = Distribution::default();

    for winner in winners {
        if !entries::mark_winner(txn, winner.id, prize).await? {
            out.skipped.push(winner.id);
            continue;
        }
        if !users::credit_points(txn, winner.user_id, i64::from(prize), now).await? {
            warn!(
                round_id = round.id,
                entry_id = winner.id,
                user_id = winner.user_id,
                "winner's user is missing; distribution aborted"
            );
            return Err(DomainError::not_found(
                NotFoundKind::User,
                format!("User {} not found for winning entry {}", winner.user_id, winner.id),
            ));
        }
        out.credited.push(winner.id);
    }

    Ok(out)
}
