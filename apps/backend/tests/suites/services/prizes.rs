use pointdraw_backend::errors::domain::{DomainError, NotFoundKind};
use pointdraw_backend::repos::entries::{self, Entry, EntryMeta};
use pointdraw_backend::services::prizes;

use crate::support::fixtures::TestDraw;

async fn entered(t: &TestDraw, n: usize) -> (pointdraw_backend::repos::rounds::Round, Vec<Entry>) {
    let users = t.seed_users(n).await;
    let round = t.open_round(1000, 5).await;
    let mut out = Vec::new();
    for user_id in users {
        out.push(
            entries::create_entry(t.db(), user_id, round.id, EntryMeta::default(), t.now())
                .await
                .unwrap(),
        );
    }
    (round, out)
}

#[tokio::test]
async fn credits_and_marks_each_winner() {
    let t = TestDraw::new().await;
    let (round, pool) = entered(&t, 3).await;

    let out = prizes::distribute(t.db(), &round, &pool[..2], t.now())
        .await
        .unwrap();

    assert_eq!(out.credited, vec![pool[0].id, pool[1].id]);
    assert_eq!(out.total_paid(round.prize_per_winner), 400);
    assert_eq!(t.points_of(pool[0].user_id).await, 200);
    assert_eq!(t.points_of(pool[2].user_id).await, 0);
}

#[tokio::test]
async fn rerun_skips_already_marked_entries() {
    let t = TestDraw::new().await;
    let (round, pool) = entered(&t, 2).await;

    prizes::distribute(t.db(), &round, &pool, t.now()).await.unwrap();
    let again = prizes::distribute(t.db(), &round, &pool, t.now()).await.unwrap();

    assert!(again.credited.is_empty());
    assert_eq!(again.skipped.len(), 2);
    assert_eq!(t.points_of(pool[0].user_id).await, 200);
}

#[tokio::test]
async fn missing_user_fails_the_pass_and_marks_nothing() {
    let t = TestDraw::new().await;
    let (round, pool) = entered(&t, 2).await;

    let mut orphan = pool[1].clone();
    orphan.user_id = 9_999;
    let winners = vec![pool[0].clone(), orphan];

    let err = prizes::distribute(t.db(), &round, &winners, t.now())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));

    assert!(entries::list_winners_for_round(t.db(), round.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(t.points_of(pool[0].user_id).await, 0);
    assert_eq!(t.points_of(pool[1].user_id).await, 0);
    assert_eq!(entries::total_prize_distributed(t.db()).await.unwrap(), 0);
}
