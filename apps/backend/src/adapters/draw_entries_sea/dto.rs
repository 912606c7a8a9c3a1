//! DTOs for draw_entries_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct EntryCreate {
    pub user_id: i64,
    pub round_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: OffsetDateTime,
}
