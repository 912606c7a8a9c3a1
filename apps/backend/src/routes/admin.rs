//! Operator endpoints. Access control is expected in front of the service.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::{admin, scheduler};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct StopResponse {
    stopped: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    pub total_prize: i32,
    pub winner_count: i32,
    pub duration_minutes: i64,
}

async fn stop_current(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let now = app_state.now();
    let stopped = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(admin::stop_current(txn, now).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(StopResponse { stopped }))
}

async fn create_round(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateRoundRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let now = app_state.now();
    let settings = app_state.settings.clone();
    let round = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(admin::create_custom(
                txn,
                &settings,
                req.total_prize,
                req.winner_count,
                req.duration_minutes,
                now,
            )
            .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(round))
}

async fn stats(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(admin::stats(txn).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

async fn run_tick(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let report = scheduler::run_tick(&app_state).await?;
    info!(
        announced = ?report.announced,
        completed = ?report.completed,
        current_round_number = ?report.current_round_number,
        "manual draw tick"
    );
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stop", web::post().to(stop_current))
        .route("/rounds", web::post().to(create_round))
        .route("/stats", web::get().to(stats))
        .route("/tick", web::post().to(run_tick));
}
