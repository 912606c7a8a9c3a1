//! Database connection bootstrap: connect, migrate, hand back the app pool.

use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{url_for_kind, DbKind, DbOwner, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match kind {
        DbKind::Postgres => {
            opts.max_connections(16)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
        // Every pooled connection to sqlite::memory: is its own database,
        // so the pool must stay at exactly one long-lived connection.
        DbKind::SqliteMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .max_lifetime(Duration::from_secs(24 * 60 * 60))
                .acquire_timeout(Duration::from_secs(5));
        }
    }
    opts
}

/// Connect without running migrations.
pub async fn connect_db(
    kind: DbKind,
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = url_for_kind(kind, profile, owner)?;
    retry_connection(
        || {
            let opts = connect_options(kind, url.clone());
            async move { Ok(Database::connect(opts).await?) }
        },
        CONNECT_ATTEMPTS,
        CONNECT_INTERVAL_MS,
    )
    .await
}

/// Single entrypoint used by the state builder: connect and migrate up.
///
/// Postgres migrates through an owner connection and then serves traffic on
/// an app-credential pool; SQLite in-memory migrates its only connection.
pub async fn bootstrap_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let engine = match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteMemory => "sqlite",
    };

    let conn = match kind {
        DbKind::Postgres => {
            let owner = connect_db(kind, profile, DbOwner::Owner).await?;
            migrate(&owner, MigrationCommand::Up).await?;
            let _ = owner.close().await;
            connect_db(kind, profile, DbOwner::App).await?
        }
        DbKind::SqliteMemory => {
            let conn = connect_db(kind, profile, DbOwner::App).await?;
            migrate(&conn, MigrationCommand::Up).await?;
            conn
        }
    };

    info!(engine, profile = ?profile, "database ready");
    Ok(conn)
}
