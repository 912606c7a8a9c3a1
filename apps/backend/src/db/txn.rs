use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction for its lifetime.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, then applies the process
/// [`txn_policy`] on `Ok` and rolls back on `Err`. The returned future is
/// `Send`, so it can run inside spawned tasks as well as handlers.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    R: Send,
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R> + Send,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
