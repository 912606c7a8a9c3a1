use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use crate::config::draw::DrawSettings;
use crate::domain::clock::{Clock, SystemClock};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for tests that never touch storage)
    pub db: Option<DatabaseConnection>,
    /// Draw timing and prize defaults
    pub settings: DrawSettings,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: DrawSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            db: Some(db),
            settings,
            clock,
        }
    }

    /// AppState with no database and the system clock
    pub fn without_db(settings: DrawSettings) -> Self {
        Self {
            db: None,
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock, e.g. with a `ManualClock` in tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Shorthand for `self.clock().now()`
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }
}
