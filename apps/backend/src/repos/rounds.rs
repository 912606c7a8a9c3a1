//! Round repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::draw_rounds_sea as rounds_adapter;
use crate::domain::schedule::RoundPlan;
use crate::domain::{RoundStatus, RoundWindow};
use crate::entities::draw_rounds::{self, DrawRoundStatus};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub id: i64,
    pub round_number: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub announce_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub final_end_time: OffsetDateTime,
    pub status: RoundStatus,
    pub total_prize: i32,
    pub winner_count: i32,
    pub prize_per_winner: i32,
    pub total_entries: i32,
    /// Entry ids in draw order; `None` until the round leaves ACTIVE
    pub winner_ids: Option<Vec<i64>>,
}

impl Round {
    pub fn window(&self) -> RoundWindow {
        RoundWindow {
            status: self.status,
            start_time: self.start_time,
            end_time: self.end_time,
            final_end_time: self.final_end_time,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    rounds_adapter::find_by_id(conn, round_id)
        .await?
        .map(Round::try_from)
        .transpose()
}

/// The ACTIVE or ANNOUNCING round, if any.
pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Round>, DomainError> {
    rounds_adapter::find_open(conn)
        .await?
        .map(Round::try_from)
        .transpose()
}

pub async fn find_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: RoundStatus,
) -> Result<Vec<Round>, DomainError> {
    rounds_adapter::find_by_status(conn, status.into())
        .await?
        .into_iter()
        .map(Round::try_from)
        .collect()
}

pub async fn last_round_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<i32>, DomainError> {
    Ok(rounds_adapter::last_round_number(conn).await?)
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_number: i32,
    plan: &RoundPlan,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        round_number,
        start_time: plan.start_time,
        end_time: plan.end_time,
        announce_time: plan.announce_time,
        final_end_time: plan.final_end_time,
        total_prize: plan.total_prize,
        winner_count: plan.winner_count,
        prize_per_winner: plan.prize_per_winner,
        created_at: now,
    };
    let model = rounds_adapter::create_round(conn, dto).await?;
    Round::try_from(model)
}

/// Guarded status change; `Ok(false)` when the round was no longer in `from`.
pub async fn claim_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    from: RoundStatus,
    to: RoundStatus,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    if !from.can_transition_to(to) {
        return Err(DomainError::validation(format!(
            "illegal round transition {from} -> {to}"
        )));
    }
    Ok(rounds_adapter::claim_status(conn, round_id, from.into(), to.into(), now).await?)
}

/// Cancel the open round, if any. Returns whether a round was cancelled.
pub async fn cancel_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(rounds_adapter::cancel_open(conn, now).await? > 0)
}

pub async fn set_winner_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    winner_ids: &[i64],
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let json = serde_json::to_string(winner_ids).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("could not encode winner ids: {e}"),
        )
    })?;
    Ok(rounds_adapter::set_winner_ids(conn, round_id, json, now).await?)
}

/// Atomic counter bump; `Ok(false)` if the round is no longer ACTIVE.
pub async fn increment_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(rounds_adapter::increment_entries(conn, round_id, now).await?)
}

pub async fn list_by_status_paged<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: RoundStatus,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Round>, u64), DomainError> {
    let (rows, total) =
        rounds_adapter::list_by_status_paged(conn, status.into(), offset, limit).await?;
    let rounds = rows
        .into_iter()
        .map(Round::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((rounds, total))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count_all(conn).await?)
}

pub async fn count_open<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count_open(conn).await?)
}

// Conversions between SeaORM models and domain models

impl TryFrom<draw_rounds::Model> for Round {
    type Error = DomainError;

    fn try_from(model: draw_rounds::Model) -> Result<Self, Self::Error> {
        let winner_ids = model
            .winner_ids
            .as_deref()
            .map(serde_json::from_str::<Vec<i64>>)
            .transpose()
            .map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("round {} has unreadable winner_ids: {e}", model.id),
                )
            })?;

        Ok(Self {
            id: model.id,
            round_number: model.round_number,
            start_time: model.start_time,
            end_time: model.end_time,
            announce_time: model.announce_time,
            final_end_time: model.final_end_time,
            status: model.status.into(),
            total_prize: model.total_prize,
            winner_count: model.winner_count,
            prize_per_winner: model.prize_per_winner,
            total_entries: model.total_entries,
            winner_ids,
        })
    }
}

impl From<DrawRoundStatus> for RoundStatus {
    fn from(s: DrawRoundStatus) -> Self {
        match s {
            DrawRoundStatus::Active => RoundStatus::Active,
            DrawRoundStatus::Announcing => RoundStatus::Announcing,
            DrawRoundStatus::Completed => RoundStatus::Completed,
            DrawRoundStatus::Cancelled => RoundStatus::Cancelled,
        }
    }
}

impl From<RoundStatus> for DrawRoundStatus {
    fn from(s: RoundStatus) -> Self {
        match s {
            RoundStatus::Active => DrawRoundStatus::Active,
            RoundStatus::Announcing => DrawRoundStatus::Announcing,
            RoundStatus::Completed => DrawRoundStatus::Completed,
            RoundStatus::Cancelled => DrawRoundStatus::Cancelled,
        }
    }
}
