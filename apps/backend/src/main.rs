use actix_web::{web, App, HttpServer};
use pointdraw_backend::config::db::{DbKind, DbProfile};
use pointdraw_backend::config::draw::DrawSettings;
use pointdraw_backend::infra::state::build_state;
use pointdraw_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use pointdraw_backend::routes;
use pointdraw_backend::services::scheduler::DrawScheduler;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let settings = match DrawSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid draw settings");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbKind::Postgres, DbProfile::Prod)
        .with_settings(settings)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };
    info!("database connected and migrated");

    // A round must be open before entry traffic is accepted.
    let scheduler = DrawScheduler::new(app_state.clone());
    if let Err(e) = scheduler.startup().await {
        error!(error = %e, "initial draw tick failed");
        std::process::exit(1);
    }
    let shutdown = CancellationToken::new();
    let scheduler_handle = scheduler.spawn(shutdown.clone());

    info!(%host, port, "starting point draw backend");
    let data = web::Data::new(app_state);

    let served = HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    shutdown.cancel();
    if let Err(e) = scheduler_handle.await {
        error!(error = %e, "draw scheduler task ended abnormally");
    }
    served
}
