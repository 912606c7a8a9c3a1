use std::sync::Arc;

use pointdraw_backend::config::db::{DbKind, DbProfile};
use pointdraw_backend::config::draw::DrawSettings;
use pointdraw_backend::db::require_db;
use pointdraw_backend::domain::schedule::RoundParams;
use pointdraw_backend::domain::ManualClock;
use pointdraw_backend::infra::state::build_state;
use pointdraw_backend::repos::rounds::{self, Round};
use pointdraw_backend::repos::users;
use pointdraw_backend::services::round_factory;
use pointdraw_backend::state::app_state::AppState;
use sea_orm::DatabaseConnection;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const START: OffsetDateTime = datetime!(2026-06-01 12:00:00 UTC);

/// Fresh SQLite in-memory state with a manual clock parked at [`START`].
pub struct TestDraw {
    pub state: AppState,
    pub clock: ManualClock,
}

impl TestDraw {
    pub async fn new() -> Self {
        Self::with_settings(DrawSettings::default()).await
    }

    pub async fn with_settings(settings: DrawSettings) -> Self {
        let clock = ManualClock::new(START);
        let state = build_state()
            .with_db(DbKind::SqliteMemory, DbProfile::Test)
            .with_settings(settings)
            .with_clock(Arc::new(clock.clone()))
            .build()
            .await
            .expect("build sqlite test state");
        Self { state, clock }
    }

    pub fn db(&self) -> &DatabaseConnection {
        require_db(&self.state).expect("test state has a database")
    }

    pub fn now(&self) -> OffsetDateTime {
        self.state.now()
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(Duration::minutes(minutes));
    }

    /// Insert `n` users with zero balance; returns their ids.
    pub async fn seed_users(&self, n: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let user = users::create_user(self.db(), &format!("player{i}"), 0, self.now())
                .await
                .expect("seed user");
            ids.push(user.id);
        }
        ids
    }

    pub async fn points_of(&self, user_id: i64) -> i64 {
        users::find_user_by_id(self.db(), user_id)
            .await
            .expect("load user")
            .expect("user exists")
            .points
    }

    /// Open round with fixed parameters instead of a randomized prize.
    pub async fn open_round(&self, total_prize: i32, winner_count: i32) -> Round {
        let params = RoundParams {
            total_prize,
            winner_count,
            entry_minutes: self.state.settings.entry_minutes,
            announce_minutes: self.state.settings.announce_minutes,
        };
        round_factory::create_round(self.db(), params, self.now())
            .await
            .expect("create round")
    }

    pub async fn reload(&self, round_id: i64) -> Round {
        rounds::find_by_id(self.db(), round_id)
            .await
            .expect("load round")
            .expect("round exists")
    }
}
