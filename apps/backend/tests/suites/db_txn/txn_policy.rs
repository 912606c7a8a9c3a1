use pointdraw_backend::config::draw::DrawSettings;
use pointdraw_backend::db::txn::with_txn;
use pointdraw_backend::db::txn_policy::{current, TxnPolicy};
use pointdraw_backend::error::AppError;
use pointdraw_backend::errors::ErrorCode;
use pointdraw_backend::repos::rounds;
use pointdraw_backend::services::round_factory;
use pointdraw_backend::state::app_state::AppState;

use crate::support::fixtures::TestDraw;

#[tokio::test]
async fn policy_is_pinned_to_rollback() {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
    // Later calls are ignored.
    pointdraw_backend::db::txn_policy::set_txn_policy(TxnPolicy::CommitOnOk);
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}

#[tokio::test]
async fn ok_result_is_returned_but_not_persisted() {
    let t = TestDraw::new().await;
    let settings = t.state.settings.clone();
    let now = t.now();

    let created = with_txn(&t.state, move |txn| {
        Box::pin(async move {
            Ok(round_factory::get_current_or_create(txn, &settings, now).await?)
        })
    })
    .await
    .unwrap();

    assert_eq!(created.round_number, 1);
    assert_eq!(rounds::count_all(t.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn error_is_propagated_unchanged() {
    let t = TestDraw::new().await;
    let err = with_txn(&t.state, |_txn| {
        Box::pin(async move {
            Err::<(), _>(AppError::conflict(ErrorCode::RoundConflict, "lost"))
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::RoundConflict);
}

#[tokio::test]
async fn missing_database_is_unavailable() {
    let state = AppState::without_db(DrawSettings::default());
    let err = with_txn(&state, |_txn| Box::pin(async move { Ok(()) }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DbUnavailable);
}
