use pointdraw_backend::errors::domain::{ConflictKind, DomainError};
use pointdraw_backend::repos::entries::{self, EntryMeta};

use crate::support::fixtures::{TestDraw, START};

fn meta() -> EntryMeta {
    EntryMeta {
        ip_address: Some("198.51.100.7".into()),
        user_agent: Some("integration".into()),
    }
}

#[tokio::test]
async fn entry_persists_request_metadata() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;
    let round = t.open_round(1000, 5).await;

    let entry = entries::create_entry(t.db(), users[0], round.id, meta(), START)
        .await
        .unwrap();
    assert!(!entry.is_winner);
    assert_eq!(entry.prize_points, None);

    let loaded = entries::find_by_user_and_round(t.db(), users[0], round.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.ip_address.as_deref(), Some("198.51.100.7"));
    assert_eq!(loaded.user_agent.as_deref(), Some("integration"));

    let json = serde_json::to_value(&loaded).unwrap();
    assert!(json.get("ip_address").is_none());
    assert!(json.get("user_agent").is_none());
}

#[tokio::test]
async fn duplicate_entry_is_already_entered() {
    let t = TestDraw::new().await;
    let users = t.seed_users(1).await;
    let round = t.open_round(1000, 5).await;

    entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), START)
        .await
        .unwrap();
    let err = entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), START)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyEntered, _)
    ));
    assert_eq!(entries::count_for_round(t.db(), round.id).await.unwrap(), 1);
}

#[tokio::test]
async fn entry_for_unknown_user_is_rejected_by_foreign_key() {
    let t = TestDraw::new().await;
    let round = t.open_round(1000, 5).await;

    let err = entries::create_entry(t.db(), 4242, round.id, EntryMeta::default(), START)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn mark_winner_is_one_shot() {
    let t = TestDraw::new().await;
    let users = t.seed_users(2).await;
    let round = t.open_round(1000, 5).await;
    let a = entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), START)
        .await
        .unwrap();
    entries::create_entry(t.db(), users[1], round.id, EntryMeta::default(), START)
        .await
        .unwrap();

    assert!(entries::mark_winner(t.db(), a.id, 200).await.unwrap());
    assert!(!entries::mark_winner(t.db(), a.id, 200).await.unwrap());

    let winners = entries::list_winners_for_round(t.db(), round.id).await.unwrap();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].id, a.id);
    assert_eq!(winners[0].prize_points, Some(200));
    assert_eq!(entries::list_for_round(t.db(), round.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn prize_sums_cover_one_user_or_everyone() {
    let t = TestDraw::new().await;
    let users = t.seed_users(2).await;
    let round = t.open_round(1000, 5).await;
    let a = entries::create_entry(t.db(), users[0], round.id, EntryMeta::default(), START)
        .await
        .unwrap();
    let b = entries::create_entry(t.db(), users[1], round.id, EntryMeta::default(), START)
        .await
        .unwrap();

    assert_eq!(entries::total_prize_distributed(t.db()).await.unwrap(), 0);

    entries::mark_winner(t.db(), a.id, 200).await.unwrap();
    entries::mark_winner(t.db(), b.id, 200).await.unwrap();

    assert_eq!(entries::total_winnings_for_user(t.db(), users[0]).await.unwrap(), 200);
    assert_eq!(entries::total_prize_distributed(t.db()).await.unwrap(), 400);
    assert_eq!(entries::count_all(t.db()).await.unwrap(), 2);

    let (wins, total) = entries::list_user_wins_paged(t.db(), users[1], 0, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(wins[0].id, b.id);
}
