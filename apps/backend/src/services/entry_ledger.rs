//! Admission control for the current round.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::round_factory;
use crate::config::draw::DrawSettings;
use crate::domain::can_enter;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::mask_ip;
use crate::repos::entries::{self, Entry, EntryMeta};
use crate::repos::rounds::{self, Round};
use crate::repos::users;

/// A user's standing in the open round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryStatus {
    pub has_entered: bool,
    pub entry: Option<Entry>,
    pub round: Option<Round>,
}

/// Enter `user_id` into the current round.
///
/// Run inside a transaction: any error leaves neither an entry row nor a
/// counter bump behind.
pub async fn enter<C>(
    conn: &C,
    settings: &DrawSettings,
    user_id: i64,
    meta: EntryMeta,
    now: OffsetDateTime,
) -> Result<Entry, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let round = round_factory::get_current_or_create(conn, settings, now).await?;

    if !can_enter(&round.window(), now) {
        debug!(round_id = round.id, user_id, status = %round.status, "entry outside window");
        return Err(DomainError::phase(format!(
            "Round {} is not accepting entries",
            round.round_number
        )));
    }

    if !users::user_exists(conn, user_id).await? {
        return Err(DomainError::not_found(
            NotFoundKind::User,
            format!("User {user_id} not found"),
        ));
    }

    let ip = meta.ip_address.as_deref().map(mask_ip);
    let entry = entries::create_entry(conn, user_id, round.id, meta, now).await?;

    if !rounds::increment_entries(conn, round.id, now).await? {
        return Err(DomainError::phase(format!(
            "Round {} closed while entering",
            round.round_number
        )));
    }

    info!(
        round_id = round.id,
        round_number = round.round_number,
        user_id,
        entry_id = entry.id,
        ip = ip.as_deref().unwrap_or("-"),
        "draw entry accepted"
    );
    Ok(entry)
}

/// Read-only view of whether `user_id` is in the open round.
pub async fn entry_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<EntryStatus, DomainError> {
    let Some(round) = rounds::find_open(conn).await? else {
        return Ok(EntryStatus {
            has_entered: false,
            entry: None,
            round: None,
        });
    };

    let entry = entries::find_by_user_and_round(conn, user_id, round.id).await?;
    Ok(EntryStatus {
        has_entered: entry.is_some(),
        entry,
        round: Some(round),
    })
}
