use actix_web::body::to_bytes;
use actix_web::ResponseError;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

fn map(de: DomainError) -> AppError {
    de.into()
}

#[test]
fn validation_maps_to_400() {
    let app = map(DomainError::validation("winner_count out of range"));
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn already_entered_maps_to_409() {
    let app = map(DomainError::conflict(
        ConflictKind::AlreadyEntered,
        "already entered",
    ));
    assert_eq!(app.code(), ErrorCode::AlreadyEntered);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn round_creation_races_map_to_round_conflict() {
    for kind in [ConflictKind::OpenRoundExists, ConflictKind::RoundNumberTaken] {
        let app = map(DomainError::conflict(kind, "lost race"));
        assert_eq!(app.code(), ErrorCode::RoundConflict);
        assert_eq!(app.status().as_u16(), 409);
    }

    let app = map(DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "dup",
    ));
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn not_found_kinds_map_to_specific_codes() {
    let user = map(DomainError::not_found(NotFoundKind::User, "user 7"));
    assert_eq!(user.code(), ErrorCode::UserNotFound);
    assert_eq!(user.status().as_u16(), 404);

    let round = map(DomainError::not_found(NotFoundKind::Round, "round 9"));
    assert_eq!(round.code(), ErrorCode::RoundNotFound);

    let other = map(DomainError::not_found(
        NotFoundKind::Other("Thing".into()),
        "x",
    ));
    assert_eq!(other.code(), ErrorCode::NotFound);
}

#[test]
fn phase_maps_to_409_phase_mismatch() {
    let app = map(DomainError::phase("entry window closed"));
    assert_eq!(app.code(), ErrorCode::PhaseMismatch);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn infra_kinds_map_to_status() {
    let cases = [
        (InfraErrorKind::Timeout, ErrorCode::DbTimeout, 504),
        (InfraErrorKind::DbUnavailable, ErrorCode::DbUnavailable, 503),
        (InfraErrorKind::DataCorruption, ErrorCode::DataCorruption, 500),
        (InfraErrorKind::Other("x".into()), ErrorCode::DbError, 500),
    ];
    for (kind, code, status) in cases {
        let app = map(DomainError::infra(kind, "boom"));
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), status);
    }
}

#[actix_web::test]
async fn db_unavailable_response_carries_retry_after() {
    let app = map(DomainError::infra(InfraErrorKind::DbUnavailable, "down"));
    let resp = app.error_response();
    assert_eq!(resp.status().as_u16(), 503);
    assert_eq!(
        resp.headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok()),
        Some("1")
    );
    assert!(resp.headers().contains_key("x-trace-id"));

    let body = to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "DB_UNAVAILABLE");
    assert_eq!(json["title"], "Db Unavailable");
    assert_eq!(json["status"], 503);
}
