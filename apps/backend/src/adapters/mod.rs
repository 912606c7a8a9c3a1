//! SeaORM adapters; every function returns `DbErr`.

pub mod draw_entries_sea;
pub mod draw_rounds_sea;
pub mod users_sea;
