//! Entry repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::draw_entries_sea as entries_adapter;
use crate::entities::draw_entries;
use crate::errors::domain::DomainError;

/// Entry domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub round_id: i64,
    pub is_winner: bool,
    pub prize_points: Option<i32>,
    /// Request metadata; kept for audit, never serialized to clients
    #[serde(skip)]
    pub ip_address: Option<String>,
    #[serde(skip)]
    pub user_agent: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Insert metadata captured from the request.
#[derive(Debug, Clone, Default)]
pub struct EntryMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    round_id: i64,
    meta: EntryMeta,
    now: OffsetDateTime,
) -> Result<Entry, DomainError> {
    let dto = entries_adapter::EntryCreate {
        user_id,
        round_id,
        ip_address: meta.ip_address,
        user_agent: meta.user_agent,
        created_at: now,
    };
    let model = entries_adapter::create_entry(conn, dto).await?;
    Ok(Entry::from(model))
}

pub async fn find_by_user_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    round_id: i64,
) -> Result<Option<Entry>, DomainError> {
    let entry = entries_adapter::find_by_user_and_round(conn, user_id, round_id).await?;
    Ok(entry.map(Entry::from))
}

pub async fn list_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Entry>, DomainError> {
    let rows = entries_adapter::list_for_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Entry::from).collect())
}

pub async fn list_winners_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Entry>, DomainError> {
    let rows = entries_adapter::list_winners_for_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Entry::from).collect())
}

pub async fn count_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(entries_adapter::count_for_round(conn, round_id).await?)
}

/// `Ok(false)` if the entry was already a winner.
pub async fn mark_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
    prize_points: i32,
) -> Result<bool, DomainError> {
    Ok(entries_adapter::mark_winner(conn, entry_id, prize_points).await?)
}

pub async fn list_user_wins_paged<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Entry>, u64), DomainError> {
    let (rows, total) =
        entries_adapter::list_user_wins_paged(conn, user_id, offset, limit).await?;
    Ok((rows.into_iter().map(Entry::from).collect(), total))
}

pub async fn total_winnings_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<i64, DomainError> {
    Ok(entries_adapter::sum_prizes(conn, Some(user_id)).await?)
}

pub async fn total_prize_distributed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<i64, DomainError> {
    Ok(entries_adapter::sum_prizes(conn, None).await?)
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(entries_adapter::count_all(conn).await?)
}

impl From<draw_entries::Model> for Entry {
    fn from(model: draw_entries::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            round_id: model.round_id,
            is_winner: model.is_winner,
            prize_points: model.prize_points,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            created_at: model.created_at,
        }
    }
}
