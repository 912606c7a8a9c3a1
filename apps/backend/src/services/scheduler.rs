//! Periodic driver for the draw cycle.

use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::round_factory;
use super::state_machine::{self, Transition};
use crate::db::txn::with_txn;
use crate::domain::RoundStatus;
use crate::error::AppError;
use crate::repos::rounds;
use crate::state::app_state::AppState;

/// What one tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Round numbers moved ACTIVE -> ANNOUNCING
    pub announced: Vec<i32>,
    /// Round numbers moved ANNOUNCING -> COMPLETED
    pub completed: Vec<i32>,
    /// Open round after the tick
    pub current_round_number: Option<i32>,
}

/// Advance due ACTIVE rounds, then due ANNOUNCING rounds, then make sure a
/// round is open.
///
/// Each transition runs in its own transaction. A failed transition is
/// logged and left for the next tick; failing to read or bootstrap is
/// returned to the caller.
pub async fn run_tick(state: &AppState) -> Result<TickReport, AppError> {
    let now = state.now();
    let mut report = TickReport::default();

    for status in [RoundStatus::Active, RoundStatus::Announcing] {
        let candidates = with_txn(state, move |txn| {
            Box::pin(async move { Ok(rounds::find_by_status(txn, status).await?) })
        })
        .await?;

        for round in candidates {
            let round_id = round.id;
            let settings = state.settings.clone();
            let outcome = with_txn(state, move |txn| {
                Box::pin(async move {
                    Ok(state_machine::advance(txn, &settings, &round, now).await?)
                })
            })
            .await;

            match outcome {
                Ok(Transition::Announced { round_number, .. }) => {
                    report.announced.push(round_number)
                }
                Ok(Transition::Completed { round_number, .. }) => {
                    report.completed.push(round_number)
                }
                Ok(Transition::Unchanged) => {}
                Err(e) => {
                    error!(round_id, error = %e, "round transition failed; retrying next tick")
                }
            }
        }
    }

    let settings = state.settings.clone();
    let current = with_txn(state, move |txn| {
        Box::pin(async move {
            Ok(round_factory::get_current_or_create(txn, &settings, now).await?)
        })
    })
    .await?;
    report.current_round_number = Some(current.round_number);

    if report.announced.is_empty() && report.completed.is_empty() {
        debug!(current_round = current.round_number, "draw tick: nothing due");
    } else {
        info!(
            announced = ?report.announced,
            completed = ?report.completed,
            current_round = current.round_number,
            "draw tick"
        );
    }
    Ok(report)
}

/// Single cooperative tick loop.
#[derive(Debug, Clone)]
pub struct DrawScheduler {
    state: AppState,
    interval: Duration,
}

impl DrawScheduler {
    pub fn new(state: AppState) -> Self {
        let interval = state.settings.tick_interval();
        Self { state, interval }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Immediate tick before serving traffic; errors are fatal to startup.
    pub async fn startup(&self) -> Result<TickReport, AppError> {
        let report = run_tick(&self.state).await?;
        info!(
            current_round = ?report.current_round_number,
            "draw scheduler bootstrapped"
        );
        Ok(report)
    }

    pub async fn tick(&self) -> Result<TickReport, AppError> {
        run_tick(&self.state).await
    }

    /// Run the loop on the runtime until `shutdown` is cancelled.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    async fn run(self, shutdown: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; startup already covered it.
        interval.tick().await;

        info!(interval_secs = self.interval.as_secs(), "draw scheduler running");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("draw scheduler stopping");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        warn!(error = %e, "draw tick failed; retrying next tick");
                    }
                }
            }
        }
    }
}
