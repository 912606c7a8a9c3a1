use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::fixtures::TestDraw;

#[actix_web::test]
async fn current_round_is_empty_before_first_tick() {
    let t = TestDraw::new().await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::get().uri("/api/draw/current").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["has_active_round"], false);
    assert_eq!(body["round"], Value::Null);
    assert_eq!(body["phase"], Value::Null);
}

#[actix_web::test]
async fn enter_then_read_back() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;
    let user = users[0].to_string();
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/draw/entries")
        .insert_header(("x-user-id", user.as_str()))
        .insert_header(("user-agent", "route-test"))
        .insert_header(("x-forwarded-for", "203.0.113.5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key("x-trace-id"));
    let entry: Value = test::read_body_json(resp).await;
    assert_eq!(entry["user_id"], users[0]);
    assert_eq!(entry["is_winner"], false);
    assert!(entry.get("ip_address").is_none());

    let req = test::TestRequest::get()
        .uri("/api/draw/current")
        .insert_header(("x-user-id", user.as_str()))
        .to_request();
    let current: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current["has_active_round"], true);
    assert_eq!(current["has_entered"], true);
    assert_eq!(current["total_entries"], 1);
    assert_eq!(current["phase"], "entry");
    assert_eq!(current["round"]["status"], "ACTIVE");

    let req = test::TestRequest::get()
        .uri("/api/draw/entries/me")
        .insert_header(("x-user-id", user.as_str()))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["has_entered"], true);
    assert_eq!(mine["entry"]["id"], entry["id"]);
}

#[actix_web::test]
async fn duplicate_entry_is_a_conflict() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;
    let user = users[0].to_string();
    let app = create_test_app(t.state.clone()).await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/draw/entries")
            .insert_header(("x-user-id", user.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if expected == StatusCode::CONFLICT {
            assert_problem_details_from_service_response(
                resp,
                "ALREADY_ENTERED",
                StatusCode::CONFLICT,
                None,
            )
            .await;
        } else {
            assert_eq!(resp.status(), expected);
        }
    }
}

#[actix_web::test]
async fn late_entry_is_a_phase_mismatch() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;
    t.open_round(1000, 5).await;
    t.advance_minutes(55);
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/draw/entries")
        .insert_header(("x-user-id", users[0].to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PHASE_MISMATCH",
        StatusCode::CONFLICT,
        Some("not accepting entries"),
    )
    .await;
}

#[actix_web::test]
async fn entry_requires_a_valid_user_header() {
    let t = TestDraw::new().await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::post().uri("/api/draw/entries").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_USER_ID",
        StatusCode::BAD_REQUEST,
        Some("Missing"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/draw/current")
        .insert_header(("x-user-id", "abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_USER_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn unknown_user_cannot_enter() {
    let t = TestDraw::new().await;
    t.open_round(1000, 5).await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/draw/entries")
        .insert_header(("x-user-id", "31337"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn round_history_paginates_and_validates() {
    let t = TestDraw::new().await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/draw/rounds?page=1&limit=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["has_more"], false);
    assert_eq!(body["rounds"], Value::Array(vec![]));

    let req = test::TestRequest::get()
        .uri("/api/draw/rounds?limit=500")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("limit"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/draw/rounds?page=first")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PAGINATION",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn round_detail_and_winners() {
    let t = TestDraw::new().await;
    let round = t.open_round(1000, 5).await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/draw/rounds/{}", round.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["round_number"], round.round_number);
    assert_eq!(body["prize_per_winner"], 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/draw/rounds/{}/winners", round.id))
        .to_request();
    let winners: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(winners, Value::Array(vec![]));

    let req = test::TestRequest::get()
        .uri("/api/draw/rounds/9999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ROUND_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/draw/rounds/zero/winners")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ROUND_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn user_wins_for_unknown_user_is_empty() {
    let t = TestDraw::new().await;
    let app = create_test_app(t.state.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/draw/users/12/wins")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_winnings"], 0);
}

#[actix_web::test]
async fn huge_page_is_a_validation_error() {
    let t = TestDraw::new().await;
    let app = create_test_app(t.state.clone()).await;

    for uri in [
        "/api/draw/rounds?page=100000000000000000&limit=100",
        "/api/draw/users/12/wins?page=18446744073709551615&limit=2",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "VALIDATION_ERROR",
            StatusCode::BAD_REQUEST,
            Some("out of range"),
        )
        .await;
    }
}
