#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;


// Re-exports for public API
pub use config::db::{db_url, DbKind, DbOwner, DbProfile};
pub use config::draw::DrawSettings;
pub use domain::{Clock, ManualClock, SystemClock};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use extractors::{ClientMeta, DrawUser, MaybeDrawUser};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use services::scheduler::{DrawScheduler, TickReport};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
