use pointdraw_backend::adapters::draw_rounds_sea as rounds_adapter;
use pointdraw_backend::domain::schedule::{RoundParams, RoundPlan};
use pointdraw_backend::domain::RoundStatus;
use pointdraw_backend::errors::domain::{ConflictKind, DomainError};
use pointdraw_backend::repos::rounds;
use sea_orm::{ConnectionTrait, DbBackend, Statement};

use crate::support::fixtures::{TestDraw, START};

fn plan() -> RoundPlan {
    RoundPlan::new(
        RoundParams {
            total_prize: 1000,
            winner_count: 5,
            entry_minutes: 50,
            announce_minutes: 10,
        },
        START,
    )
}

#[tokio::test]
async fn created_round_is_active_and_open() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    assert_eq!(round.status, RoundStatus::Active);
    assert_eq!(round.total_entries, 0);
    assert_eq!(round.prize_per_winner, 200);
    assert!(round.winner_ids.is_none());
    assert_eq!(rounds::find_open(t.db()).await.unwrap(), Some(round));
}

#[tokio::test]
async fn second_open_round_violates_open_slot() {
    let t = TestDraw::new().await;
    rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    let err = rounds::create_round(t.db(), 2, &plan(), START)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::OpenRoundExists, _)
    ));
}

#[tokio::test]
async fn round_numbers_are_unique_even_when_terminal() {
    let t = TestDraw::new().await;
    rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();
    assert!(rounds::cancel_open(t.db(), START).await.unwrap());

    let err = rounds::create_round(t.db(), 1, &plan(), START)
        .await
        .unwrap_err();
    assert!(err.is_round_creation_race());
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::RoundNumberTaken, _)
    ));
}

#[tokio::test]
async fn claim_status_only_succeeds_once() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    let first = rounds::claim_status(
        t.db(),
        round.id,
        RoundStatus::Active,
        RoundStatus::Announcing,
        START,
    )
    .await
    .unwrap();
    let second = rounds::claim_status(
        t.db(),
        round.id,
        RoundStatus::Active,
        RoundStatus::Announcing,
        START,
    )
    .await
    .unwrap();

    assert!(first);
    assert!(!second);
    // ANNOUNCING still holds the open slot
    assert_eq!(rounds::count_open(t.db()).await.unwrap(), 1);
}

#[tokio::test]
async fn claim_status_rejects_illegal_edges() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    let err = rounds::claim_status(
        t.db(),
        round.id,
        RoundStatus::Active,
        RoundStatus::Completed,
        START,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn completion_frees_the_open_slot() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();
    rounds::claim_status(t.db(), round.id, RoundStatus::Active, RoundStatus::Announcing, START)
        .await
        .unwrap();
    rounds::claim_status(t.db(), round.id, RoundStatus::Announcing, RoundStatus::Completed, START)
        .await
        .unwrap();

    assert!(rounds::find_open(t.db()).await.unwrap().is_none());
    let next = rounds::create_round(t.db(), 2, &plan(), START).await.unwrap();
    assert_eq!(next.round_number, 2);
    assert_eq!(rounds::last_round_number(t.db()).await.unwrap(), Some(2));
}

#[tokio::test]
async fn increment_only_applies_to_active_rounds() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    assert!(rounds::increment_entries(t.db(), round.id, START).await.unwrap());
    assert!(rounds::increment_entries(t.db(), round.id, START).await.unwrap());
    rounds::claim_status(t.db(), round.id, RoundStatus::Active, RoundStatus::Announcing, START)
        .await
        .unwrap();
    assert!(!rounds::increment_entries(t.db(), round.id, START).await.unwrap());

    assert_eq!(t.reload(round.id).await.total_entries, 2);
}

#[tokio::test]
async fn winner_ids_round_trip_as_json() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();

    rounds::set_winner_ids(t.db(), round.id, &[7, 3, 9], START)
        .await
        .unwrap();
    assert_eq!(t.reload(round.id).await.winner_ids, Some(vec![7, 3, 9]));

    rounds::set_winner_ids(t.db(), round.id, &[], START).await.unwrap();
    assert_eq!(t.reload(round.id).await.winner_ids, Some(vec![]));
}

#[tokio::test]
async fn set_winner_ids_on_missing_round_is_not_found() {
    let t = TestDraw::new().await;
    let err = rounds::set_winner_ids(t.db(), 999, &[1], START)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_, _)));
}

#[tokio::test]
async fn unreadable_winner_ids_are_data_corruption() {
    let t = TestDraw::new().await;
    let round = rounds::create_round(t.db(), 1, &plan(), START).await.unwrap();
    t.db()
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "UPDATE draw_rounds SET winner_ids = 'not json' WHERE id = ?",
            [round.id.into()],
        ))
        .await
        .unwrap();

    let err = rounds::find_by_id(t.db(), round.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(pointdraw_backend::errors::domain::InfraErrorKind::DataCorruption, _)
    ));
}

#[tokio::test]
async fn paged_listing_is_newest_first() {
    let t = TestDraw::new().await;
    for n in 1..=3 {
        let round = rounds::create_round(t.db(), n, &plan(), START).await.unwrap();
        rounds::claim_status(t.db(), round.id, RoundStatus::Active, RoundStatus::Announcing, START)
            .await
            .unwrap();
        rounds::claim_status(t.db(), round.id, RoundStatus::Announcing, RoundStatus::Completed, START)
            .await
            .unwrap();
    }
    rounds::create_round(t.db(), 4, &plan(), START).await.unwrap();

    let (page, total) =
        rounds::list_by_status_paged(t.db(), RoundStatus::Completed, 0, 2)
            .await
            .unwrap();
    assert_eq!(total, 3);
    let numbers: Vec<i32> = page.iter().map(|r| r.round_number).collect();
    assert_eq!(numbers, vec![3, 2]);

    let (rest, _) = rounds::list_by_status_paged(t.db(), RoundStatus::Completed, 2, 2)
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].round_number, 1);

    assert_eq!(rounds::count_all(t.db()).await.unwrap(), 4);
    assert_eq!(
        rounds_adapter::find_by_status(t.db(), RoundStatus::Active.into())
            .await
            .unwrap()
            .len(),
        1
    );
}
