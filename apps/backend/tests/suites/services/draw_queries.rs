use pointdraw_backend::domain::{Phase, RoundStatus};
use pointdraw_backend::errors::domain::{DomainError, NotFoundKind};
use pointdraw_backend::repos::entries::{self, EntryMeta};
use pointdraw_backend::repos::rounds;
use pointdraw_backend::services::draw_queries::{self, PageRequest};

use crate::support::fixtures::TestDraw;

async fn complete_round(t: &TestDraw, total_prize: i32) -> rounds::Round {
    let round = t.open_round(total_prize, 5).await;
    rounds::claim_status(t.db(), round.id, RoundStatus::Active, RoundStatus::Announcing, t.now())
        .await
        .unwrap();
    rounds::claim_status(t.db(), round.id, RoundStatus::Announcing, RoundStatus::Completed, t.now())
        .await
        .unwrap();
    t.reload(round.id).await
}

#[tokio::test]
async fn current_status_without_round_does_not_create_one() {
    let t = TestDraw::new().await;
    let status = draw_queries::current_status(t.db(), Some(1), t.now())
        .await
        .unwrap();

    assert!(!status.has_active_round);
    assert!(status.round.is_none());
    assert_eq!(status.phase, None);
    assert_eq!(rounds::count_all(t.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn current_status_tracks_phase_and_countdown() {
    let t = TestDraw::new().await;
    let users = t.seed_users(2).await;
    let round = t.open_round(1000, 5).await;
    entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), t.now())
        .await
        .unwrap();
    rounds::increment_entries(t.db(), round.id, t.now()).await.unwrap();

    t.advance_minutes(20);
    let mine = draw_queries::current_status(t.db(), Some(users[0]), t.now())
        .await
        .unwrap();
    assert!(mine.has_active_round);
    assert!(mine.has_entered);
    assert_eq!(mine.total_entries, 1);
    assert_eq!(mine.phase, Some(Phase::Entry));
    assert_eq!(mine.remaining_seconds, 30 * 60);

    let theirs = draw_queries::current_status(t.db(), Some(users[1]), t.now())
        .await
        .unwrap();
    assert!(!theirs.has_entered);

    let anon = draw_queries::current_status(t.db(), None, t.now()).await.unwrap();
    assert!(!anon.has_entered);

    t.advance_minutes(35);
    let late = draw_queries::current_status(t.db(), None, t.now()).await.unwrap();
    assert_eq!(late.phase, Some(Phase::Announce));
    assert_eq!(late.remaining_seconds, 5 * 60);
}

#[tokio::test]
async fn history_lists_only_completed_rounds() {
    let t = TestDraw::new().await;
    for _ in 0..3 {
        complete_round(&t, 1000).await;
    }
    t.open_round(1000, 5).await;
    rounds::cancel_open(t.db(), t.now()).await.unwrap();
    t.open_round(1000, 5).await;

    let page = PageRequest::new(Some(1), Some(2)).unwrap();
    let first = draw_queries::round_history(t.db(), page).await.unwrap();
    assert_eq!(first.total, 3);
    assert!(first.has_more);
    assert!(first.rounds.iter().all(|r| r.status == RoundStatus::Completed));
    assert_eq!(first.rounds[0].round_number, 3);

    let page = PageRequest::new(Some(2), Some(2)).unwrap();
    let second = draw_queries::round_history(t.db(), page).await.unwrap();
    assert_eq!(second.rounds.len(), 1);
    assert!(!second.has_more);
}

#[tokio::test]
async fn round_lookup_and_winners() {
    let t = TestDraw::new().await;
    let users = t.seed_users(2).await;
    let round = t.open_round(1000, 5).await;
    let entry = entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), t.now())
        .await
        .unwrap();
    entries::create_entry(t.db(), users[1], round.id, EntryMeta::default(), t.now())
        .await
        .unwrap();

    assert!(draw_queries::round_winners(t.db(), round.id)
        .await
        .unwrap()
        .is_empty());

    entries::mark_winner(t.db(), entry.id, 200).await.unwrap();
    let winners = draw_queries::round_winners(t.db(), round.id).await.unwrap();
    assert_eq!(winners.len(), 1);
    assert!(winners[0].is_winner);

    assert_eq!(
        draw_queries::get_round(t.db(), round.id).await.unwrap().id,
        round.id
    );
    let missing = draw_queries::get_round(t.db(), 404).await.unwrap_err();
    assert!(matches!(
        missing,
        DomainError::NotFound(NotFoundKind::Round, _)
    ));
    assert!(draw_queries::round_winners(t.db(), 404).await.is_err());
}

#[tokio::test]
async fn user_win_history_totals_all_rounds() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;

    for prize in [200, 155] {
        let round = t.open_round(1000, 5).await;
        let entry = entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), t.now())
            .await
            .unwrap();
        entries::mark_winner(t.db(), entry.id, prize).await.unwrap();
        rounds::cancel_open(t.db(), t.now()).await.unwrap();
    }

    let page = PageRequest::new(Some(1), Some(1)).unwrap();
    let history = draw_queries::user_win_history(t.db(), users[0], page)
        .await
        .unwrap();
    assert_eq!(history.total, 2);
    assert_eq!(history.entries.len(), 1);
    assert!(history.has_more);
    assert_eq!(history.total_winnings, 355);

    let nobody = draw_queries::user_win_history(t.db(), 999, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(nobody.total, 0);
    assert_eq!(nobody.total_winnings, 0);
}

#[test]
fn page_bounds_are_validation_errors() {
    assert!(PageRequest::new(Some(0), None).is_err());
    assert!(PageRequest::new(None, Some(0)).is_err());
    assert!(PageRequest::new(None, Some(101)).is_err());
    assert!(PageRequest::new(None, Some(100)).is_ok());
}

#[test]
fn huge_page_is_a_validation_error() {
    let err = PageRequest::new(Some(100_000_000_000_000_000), Some(100)).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(PageRequest::new(Some(u64::MAX), Some(1)).is_err());
}
