use std::sync::Arc;

use crate::config::db::{DbKind, DbProfile};
use crate::config::draw::DrawSettings;
use crate::domain::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    settings: DrawSettings,
    db: Option<(DbKind, DbProfile)>,
    clock: Arc<dyn Clock>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settings: DrawSettings::default(),
            db: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_db(mut self, kind: DbKind, profile: DbProfile) -> Self {
        self.db = Some((kind, profile));
        self
    }

    pub fn with_settings(mut self, settings: DrawSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.settings.validate()?;
        match self.db {
            Some((kind, profile)) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(kind, profile).await?;
                Ok(AppState::new(conn, self.settings, self.clock))
            }
            None => Ok(AppState::without_db(self.settings).with_clock(self.clock)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
