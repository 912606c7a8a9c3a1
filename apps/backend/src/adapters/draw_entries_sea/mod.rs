//! SeaORM adapter for draw entries - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::draw_entries;

pub mod dto;

pub use dto::EntryCreate;

/// Insert an entry; the (user_id, round_id) unique index rejects duplicates.
pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EntryCreate,
) -> Result<draw_entries::Model, sea_orm::DbErr> {
    let entry = draw_entries::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        round_id: Set(dto.round_id),
        is_winner: Set(false),
        prize_points: Set(None),
        ip_address: Set(dto.ip_address),
        user_agent: Set(dto.user_agent),
        created_at: Set(dto.created_at),
    };

    entry.insert(conn).await
}

pub async fn find_by_user_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    round_id: i64,
) -> Result<Option<draw_entries::Model>, sea_orm::DbErr> {
    draw_entries::Entity::find()
        .filter(draw_entries::Column::UserId.eq(user_id))
        .filter(draw_entries::Column::RoundId.eq(round_id))
        .one(conn)
        .await
}

pub async fn list_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<draw_entries::Model>, sea_orm::DbErr> {
    draw_entries::Entity::find()
        .filter(draw_entries::Column::RoundId.eq(round_id))
        .order_by_asc(draw_entries::Column::Id)
        .all(conn)
        .await
}

pub async fn list_winners_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<draw_entries::Model>, sea_orm::DbErr> {
    draw_entries::Entity::find()
        .filter(draw_entries::Column::RoundId.eq(round_id))
        .filter(draw_entries::Column::IsWinner.eq(true))
        .order_by_asc(draw_entries::Column::Id)
        .all(conn)
        .await
}

pub async fn count_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    draw_entries::Entity::find()
        .filter(draw_entries::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}

/// Marks a not-yet-winning entry. Returns false if it was already marked.
pub async fn mark_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
    prize_points: i32,
) -> Result<bool, sea_orm::DbErr> {
    let result = draw_entries::Entity::update_many()
        .col_expr(draw_entries::Column::IsWinner, Expr::val(true).into())
        .col_expr(
            draw_entries::Column::PrizePoints,
            Expr::val(Some(prize_points)).into(),
        )
        .filter(draw_entries::Column::Id.eq(entry_id))
        .filter(draw_entries::Column::IsWinner.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// One page of a user's winning entries, newest first, plus the total count.
pub async fn list_user_wins_paged<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    offset: u64,
    limit: u64,
) -> Result<(Vec<draw_entries::Model>, u64), sea_orm::DbErr> {
    let total = draw_entries::Entity::find()
        .filter(draw_entries::Column::UserId.eq(user_id))
        .filter(draw_entries::Column::IsWinner.eq(true))
        .count(conn)
        .await?;

    let rows = draw_entries::Entity::find()
        .filter(draw_entries::Column::UserId.eq(user_id))
        .filter(draw_entries::Column::IsWinner.eq(true))
        .order_by_desc(draw_entries::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;

    Ok((rows, total))
}

/// Sum of prize_points over winning entries, optionally for one user.
pub async fn sum_prizes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Option<i64>,
) -> Result<i64, sea_orm::DbErr> {
    let mut query = draw_entries::Entity::find()
        .select_only()
        .column_as(draw_entries::Column::PrizePoints.sum(), "total")
        .filter(draw_entries::Column::IsWinner.eq(true));
    if let Some(user_id) = user_id {
        query = query.filter(draw_entries::Column::UserId.eq(user_id));
    }

    let total: Option<Option<i64>> = query.into_tuple().one(conn).await?;
    Ok(total.flatten().unwrap_or(0))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    draw_entries::Entity::find().count(conn).await
}
