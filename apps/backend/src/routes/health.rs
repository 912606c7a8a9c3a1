use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    migrations: String,
    time: String,
}

/// Liveness plus a database ping and the latest applied migration.
///
/// Always 200; a broken database shows up as `db: "error"`.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = app_state
        .now()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, migrations) = match require_db(&app_state) {
        Ok(conn) => {
            let ping = conn
                .query_one(Statement::from_string(
                    conn.get_database_backend(),
                    "SELECT 1".to_string(),
                ))
                .await;
            match ping {
                Ok(_) => {
                    let migrations = match get_latest_migration_version(conn).await {
                        Ok(Some(version)) => version,
                        Ok(None) => "none".to_string(),
                        Err(_) => "unknown".to_string(),
                    };
                    ("ok", migrations)
                }
                Err(e) => {
                    warn!(error = %Redacted(&e.to_string()), "health ping failed");
                    ("error", "unknown".to_string())
                }
            }
        }
        Err(_) => ("unavailable", "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
