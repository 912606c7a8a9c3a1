//! Draw services: business operations over the repos, generic over the connection.

pub mod admin;
pub mod draw_queries;
pub mod entry_ledger;
pub mod prizes;
pub mod round_factory;
pub mod scheduler;
pub mod state_machine;
