//! Repository functions: domain models over the SeaORM adapters.

pub mod entries;
pub mod rounds;
pub mod users;
