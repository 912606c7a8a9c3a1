use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Database engine selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// Private in-memory SQLite, one per state (tests and local runs)
    SqliteMemory,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Builds a database URL from environment variables based on profile and owner.
///
/// `DATABASE_URL` wins when set.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    db_url_from(profile, owner, |key| env::var(key).ok())
}

/// Same as [`db_url`] with an injected variable lookup.
pub fn db_url_from<F>(profile: DbProfile, owner: DbOwner, lookup: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
        return Ok(url);
    }

    let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
    if port.parse::<u16>().is_err() {
        return Err(AppError::config(format!(
            "POSTGRES_PORT must be a valid port number, got '{port}'"
        )));
    }
    let db_name = db_name(profile, &lookup)?;
    let (username, password) = credentials(owner, &lookup)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Resolve the connection URL for a given engine.
pub fn url_for_kind(kind: DbKind, profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => db_url(profile, owner),
        DbKind::SqliteMemory => Ok(SQLITE_MEMORY_URL.to_string()),
    }
}

fn db_name<F>(profile: DbProfile, lookup: &F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match profile {
        DbProfile::Prod => must_var("PROD_DB", lookup),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB", lookup)?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials<F>(owner: DbOwner, lookup: &F) -> Result<(String, String), AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match owner {
        DbOwner::App => Ok((
            must_var("APP_DB_USER", lookup)?,
            must_var("APP_DB_PASSWORD", lookup)?,
        )),
        DbOwner::Owner => Ok((
            must_var("POINTDRAW_OWNER_USER", lookup)?,
            must_var("POINTDRAW_OWNER_PASSWORD", lookup)?,
        )),
    }
}

fn must_var<F>(name: &str, lookup: &F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
