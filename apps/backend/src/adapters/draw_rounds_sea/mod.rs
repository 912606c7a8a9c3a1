//! SeaORM adapter for draw rounds - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::draw_rounds::{self, DrawRoundStatus};

pub mod dto;

pub use dto::RoundCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<draw_rounds::Model>, sea_orm::DbErr> {
    draw_rounds::Entity::find_by_id(round_id).one(conn).await
}

/// The round holding the open slot (ACTIVE or ANNOUNCING), if any.
pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<draw_rounds::Model>, sea_orm::DbErr> {
    draw_rounds::Entity::find()
        .filter(draw_rounds::Column::OpenSlot.eq(true))
        .one(conn)
        .await
}

pub async fn find_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: DrawRoundStatus,
) -> Result<Vec<draw_rounds::Model>, sea_orm::DbErr> {
    draw_rounds::Entity::find()
        .filter(draw_rounds::Column::Status.eq(status))
        .order_by_asc(draw_rounds::Column::RoundNumber)
        .all(conn)
        .await
}

pub async fn last_round_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let last = draw_rounds::Entity::find()
        .order_by_desc(draw_rounds::Column::RoundNumber)
        .one(conn)
        .await?;
    Ok(last.map(|r| r.round_number))
}

/// Insert an ACTIVE round; fails on the open-slot or round-number unique index.
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<draw_rounds::Model, sea_orm::DbErr> {
    let round = draw_rounds::ActiveModel {
        id: NotSet,
        round_number: Set(dto.round_number),
        start_time: Set(dto.start_time),
        end_time: Set(dto.end_time),
        announce_time: Set(dto.announce_time),
        final_end_time: Set(dto.final_end_time),
        status: Set(DrawRoundStatus::Active),
        total_prize: Set(dto.total_prize),
        winner_count: Set(dto.winner_count),
        prize_per_winner: Set(dto.prize_per_winner),
        total_entries: Set(0),
        winner_ids: Set(None),
        open_slot: Set(Some(true)),
        created_at: Set(dto.created_at),
        updated_at: Set(dto.created_at),
    };

    round.insert(conn).await
}

fn open_slot_for(status: DrawRoundStatus) -> Option<bool> {
    match status {
        DrawRoundStatus::Active | DrawRoundStatus::Announcing => Some(true),
        DrawRoundStatus::Completed | DrawRoundStatus::Cancelled => None,
    }
}

/// Conditional status change `from -> to`. Returns false when another
/// worker already moved the round (zero rows affected).
pub async fn claim_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    from: DrawRoundStatus,
    to: DrawRoundStatus,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = draw_rounds::Entity::update_many()
        .col_expr(draw_rounds::Column::Status, Expr::val(to).into())
        .col_expr(
            draw_rounds::Column::OpenSlot,
            Expr::val(open_slot_for(to)).into(),
        )
        .col_expr(draw_rounds::Column::UpdatedAt, Expr::val(now).into())
        .filter(draw_rounds::Column::Id.eq(round_id))
        .filter(draw_rounds::Column::Status.eq(from))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Cancel whatever round holds the open slot. Returns rows affected.
pub async fn cancel_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = draw_rounds::Entity::update_many()
        .col_expr(
            draw_rounds::Column::Status,
            Expr::val(DrawRoundStatus::Cancelled).into(),
        )
        .col_expr(draw_rounds::Column::OpenSlot, Expr::val(None::<bool>).into())
        .col_expr(draw_rounds::Column::UpdatedAt, Expr::val(now).into())
        .filter(draw_rounds::Column::OpenSlot.eq(true))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

pub async fn set_winner_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    winner_ids_json: String,
    now: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let result = draw_rounds::Entity::update_many()
        .col_expr(
            draw_rounds::Column::WinnerIds,
            Expr::val(Some(winner_ids_json)).into(),
        )
        .col_expr(draw_rounds::Column::UpdatedAt, Expr::val(now).into())
        .filter(draw_rounds::Column::Id.eq(round_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "draw_rounds id={round_id}"
        )));
    }
    Ok(())
}

/// `total_entries = total_entries + 1` while the round is still ACTIVE.
pub async fn increment_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = draw_rounds::Entity::update_many()
        .col_expr(
            draw_rounds::Column::TotalEntries,
            Expr::col(draw_rounds::Column::TotalEntries).add(1),
        )
        .col_expr(draw_rounds::Column::UpdatedAt, Expr::val(now).into())
        .filter(draw_rounds::Column::Id.eq(round_id))
        .filter(draw_rounds::Column::Status.eq(DrawRoundStatus::Active))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// One page of rounds in `status`, newest first, plus the total count.
pub async fn list_by_status_paged<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: DrawRoundStatus,
    offset: u64,
    limit: u64,
) -> Result<(Vec<draw_rounds::Model>, u64), sea_orm::DbErr> {
    let total = draw_rounds::Entity::find()
        .filter(draw_rounds::Column::Status.eq(status))
        .count(conn)
        .await?;

    let rows = draw_rounds::Entity::find()
        .filter(draw_rounds::Column::Status.eq(status))
        .order_by_desc(draw_rounds::Column::RoundNumber)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    draw_rounds::Entity::find().count(conn).await
}

pub async fn count_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    draw_rounds::Entity::find()
        .filter(draw_rounds::Column::OpenSlot.eq(true))
        .count(conn)
        .await
}
