use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::parse_path_id;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{ClientMeta, DrawUser, MaybeDrawUser};
use crate::services::draw_queries::{self, PageRequest};
use crate::services::entry_ledger;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    fn to_request(&self) -> Result<PageRequest, AppError> {
        Ok(PageRequest::new(self.page, self.limit)?)
    }
}

async fn current_round(
    user: MaybeDrawUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.0.map(|u| u.id());
    let now = app_state.now();
    let status = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(draw_queries::current_status(txn, user_id, now).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(status))
}

async fn enter_round(
    user: DrawUser,
    meta: ClientMeta,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let now = app_state.now();
    let settings = app_state.settings.clone();
    let entry = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(entry_ledger::enter(txn, &settings, user_id, meta.into(), now).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(entry))
}

async fn my_entry(
    user: DrawUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let status = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(entry_ledger::entry_status(txn, user_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(status))
}

async fn round_history(
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = query.to_request()?;
    let history = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(draw_queries::round_history(txn, page).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(history))
}

async fn round_detail(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round_id = parse_path_id(&path, ErrorCode::InvalidRoundId, "round id")?;
    let round = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(draw_queries::get_round(txn, round_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(round))
}

async fn round_winners(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round_id = parse_path_id(&path, ErrorCode::InvalidRoundId, "round id")?;
    let winners = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(draw_queries::round_winners(txn, round_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(winners))
}

async fn user_wins(
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_path_id(&path, ErrorCode::InvalidUserId, "user id")?;
    let page = query.to_request()?;
    let history = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(draw_queries::user_win_history(txn, user_id, page).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(history))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/current", web::get().to(current_round))
        .route("/entries", web::post().to(enter_round))
        .route("/entries/me", web::get().to(my_entry))
        .route("/rounds", web::get().to(round_history))
        .route("/rounds/{round_id}", web::get().to(round_detail))
        .route("/rounds/{round_id}/winners", web::get().to(round_winners))
        .route("/users/{user_id}/wins", web::get().to(user_wins));
}
