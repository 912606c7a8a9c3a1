//! User balance collaborator: existence lookup and point credit.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub points: i64,
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn user_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(users_adapter::exists(conn, user_id).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    points: i64,
    now: OffsetDateTime,
) -> Result<User, DomainError> {
    let dto = users_adapter::UserCreate {
        username: username.to_string(),
        points,
        created_at: now,
    };
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

/// Adds `amount` to the balance. `Ok(false)` if the user is gone.
pub async fn credit_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(users_adapter::credit_points(conn, user_id, amount, now).await?)
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            points: model.points,
        }
    }
}
