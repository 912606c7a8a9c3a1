use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DrawRoundStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "ANNOUNCING")]
    Announcing,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "draw_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_number")]
    pub round_number: i32,
    #[sea_orm(column_name = "start_time")]
    pub start_time: OffsetDateTime,
    #[sea_orm(column_name = "end_time")]
    pub end_time: OffsetDateTime,
    #[sea_orm(column_name = "announce_time")]
    pub announce_time: OffsetDateTime,
    #[sea_orm(column_name = "final_end_time")]
    pub final_end_time: OffsetDateTime,
    pub status: DrawRoundStatus,
    #[sea_orm(column_name = "total_prize")]
    pub total_prize: i32,
    #[sea_orm(column_name = "winner_count")]
    pub winner_count: i32,
    #[sea_orm(column_name = "prize_per_winner")]
    pub prize_per_winner: i32,
    #[sea_orm(column_name = "total_entries")]
    pub total_entries: i32,
    /// JSON array of entry ids, set once at ACTIVE -> ANNOUNCING
    #[sea_orm(column_name = "winner_ids", column_type = "Text", nullable)]
    pub winner_ids: Option<String>,
    /// TRUE while the round is open, NULL once terminal
    #[sea_orm(column_name = "open_slot", nullable)]
    pub open_slot: Option<bool>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::draw_entries::Entity")]
    DrawEntries,
}

impl Related<super::draw_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DrawEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
