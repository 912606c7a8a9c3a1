use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod admin;
pub mod draw;
pub mod health;

/// Register every route and the extractor configs they rely on.
///
/// `main.rs` and the route tests share this so both see the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(
            ErrorCode::InvalidPagination,
            format!("Invalid query string: {err}"),
        )
        .into()
    }));

    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/draw").configure(draw::configure_routes));
    cfg.service(web::scope("/api/admin/draw").configure(admin::configure_routes));
}

/// Parse a positive numeric path segment.
pub(crate) fn parse_path_id(raw: &str, code: ErrorCode, what: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(id) => Err(AppError::bad_request(
            code,
            format!("{what} must be positive, got: {id}"),
        )),
        Err(_) => Err(AppError::bad_request(
            code,
            format!("Invalid {what}: {raw}"),
        )),
    }
}
