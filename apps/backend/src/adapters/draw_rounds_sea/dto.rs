//! DTOs for draw_rounds_sea adapter.

use time::OffsetDateTime;

/// DTO for inserting a new ACTIVE round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub round_number: i32,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub announce_time: OffsetDateTime,
    pub final_end_time: OffsetDateTime,
    pub total_prize: i32,
    pub winner_count: i32,
    pub prize_per_winner: i32,
    pub created_at: OffsetDateTime,
}
