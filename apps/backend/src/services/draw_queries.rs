//! Read-only projections of rounds and entries.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::{phase_of, remaining_seconds, Phase, RoundStatus};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::entries::{self, Entry};
use crate::repos::rounds::{self, Round};

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;
/// SQL OFFSET is bound as a signed 64-bit integer.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if page < 1 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(DomainError::validation(format!(
                "limit must be within 1..={MAX_PAGE_LIMIT}"
            )));
        }
        let offset = (page - 1).checked_mul(limit);
        if !offset.is_some_and(|o| o <= MAX_OFFSET) {
            return Err(DomainError::validation(format!(
                "page {page} is out of range for limit {limit}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    fn has_more(&self, returned: usize, total: u64) -> bool {
        self.offset() + (returned as u64) < total
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentRoundStatus {
    pub has_active_round: bool,
    pub round: Option<Round>,
    pub has_entered: bool,
    pub remaining_seconds: i64,
    pub total_entries: i32,
    pub phase: Option<Phase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundHistory {
    pub rounds: Vec<Round>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWinHistory {
    pub entries: Vec<Entry>,
    pub total: u64,
    pub total_winnings: i64,
    pub has_more: bool,
}

/// Status of the open round, from the point of view of `user_id` if given.
///
/// Never creates a round; an empty slot reports `has_active_round = false`.
pub async fn current_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<CurrentRoundStatus, DomainError> {
    let Some(round) = rounds::find_open(conn).await? else {
        return Ok(CurrentRoundStatus {
            has_active_round: false,
            round: None,
            has_entered: false,
            remaining_seconds: 0,
            total_entries: 0,
            phase: None,
        });
    };

    let has_entered = match user_id {
        Some(uid) => entries::find_by_user_and_round(conn, uid, round.id)
            .await?
            .is_some(),
        None => false,
    };

    let window = round.window();
    Ok(CurrentRoundStatus {
        has_active_round: true,
        has_entered,
        remaining_seconds: remaining_seconds(&window, now),
        total_entries: round.total_entries,
        phase: Some(phase_of(&window, now)),
        round: Some(round),
    })
}

/// Completed rounds, newest first.
pub async fn round_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: PageRequest,
) -> Result<RoundHistory, DomainError> {
    let (rounds, total) =
        rounds::list_by_status_paged(conn, RoundStatus::Completed, page.offset(), page.limit)
            .await?;
    Ok(RoundHistory {
        has_more: page.has_more(rounds.len(), total),
        rounds,
        total,
    })
}

pub async fn get_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds::find_by_id(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

/// Winning entries of a round; empty before the draw.
pub async fn round_winners<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Entry>, DomainError> {
    get_round(conn, round_id).await?;
    entries::list_winners_for_round(conn, round_id).await
}

pub async fn user_win_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    page: PageRequest,
) -> Result<UserWinHistory, DomainError> {
    let (wins, total) =
        entries::list_user_wins_paged(conn, user_id, page.offset(), page.limit).await?;
    let total_winnings = entries::total_winnings_for_user(conn, user_id).await?;
    Ok(UserWinHistory {
        has_more: page.has_more(wins.len(), total),
        entries: wins,
        total,
        total_winnings,
    })
}
