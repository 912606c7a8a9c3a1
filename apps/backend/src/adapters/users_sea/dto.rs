//! DTOs for users_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub points: i64,
    pub created_at: OffsetDateTime,
}
