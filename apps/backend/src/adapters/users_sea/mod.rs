//! SeaORM adapter for the user balance collaborator.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let n = users::Entity::find()
        .filter(users::Column::Id.eq(user_id))
        .count(conn)
        .await?;
    Ok(n > 0)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        points: Set(dto.points),
        created_at: Set(dto.created_at),
        updated_at: Set(dto.created_at),
    };

    user.insert(conn).await
}

/// Atomic `points = points + amount`. Returns false if the user does not exist.
pub async fn credit_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::Points, Expr::col(users::Column::Points).add(amount))
        .col_expr(users::Column::UpdatedAt, Expr::val(now).into())
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
