use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity taken from the `X-User-Id` header.
///
/// Use `Option<DrawUser>` for endpoints where the caller may be anonymous;
/// a present but malformed header is still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawUser(pub i64);

impl DrawUser {
    pub fn id(&self) -> i64 {
        self.0
    }
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    let id = raw.trim().parse::<i64>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidUserId,
            format!("Invalid {USER_ID_HEADER} header"),
        )
    })?;
    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidUserId,
            format!("User id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

fn extract(req: &HttpRequest) -> Result<Option<DrawUser>, AppError> {
    let Some(value) = req.headers().get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidUserId,
            format!("Invalid {USER_ID_HEADER} header"),
        )
    })?;
    parse_user_id(raw).map(|id| Some(DrawUser(id)))
}

impl FromRequest for DrawUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req).and_then(|user| {
            user.ok_or_else(|| {
                AppError::bad_request(
                    ErrorCode::InvalidUserId,
                    format!("Missing {USER_ID_HEADER} header"),
                )
            })
        }))
    }
}

/// Anonymous callers resolve to `None`; malformed headers are still errors.
pub struct MaybeDrawUser(pub Option<DrawUser>);

impl FromRequest for MaybeDrawUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req).map(MaybeDrawUser))
    }
}
