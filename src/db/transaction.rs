/*!
 * Transaction Helper Utilities
 *
 * Every write in the service runs inside one of these scopes: the transaction
 * commits when the closure returns `Ok` and rolls back on `Err`.
 */

use metrics::{counter, histogram};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionError, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};
use uuid::Uuid;

/// Type alias for boxed future used in transactions
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Execute a function within a database transaction
///
/// Unlike a bare `DatabaseConnection::transaction` call, the closure's own
/// error type is handed back untouched, so a `ServiceError::NotFound` raised
/// halfway through still reaches the caller as a not-found.
///
/// ```rust,ignore
/// use crate::db::transaction::with_transaction;
///
/// let removed = with_transaction(&db, |txn| {
///     Box::pin(async move {
///         part::Entity::delete_many().exec(txn).await?;
///         Ok::<_, ServiceError>(())
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T, E>(db: &DatabaseConnection, f: F) -> Result<T, E>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<T, E>> + Send,
    T: Send,
    E: From<DbErr> + std::error::Error + Send,
{
    let transaction_id = Uuid::new_v4();
    let start = std::time::Instant::now();

    debug!(transaction_id = %transaction_id, "Starting database transaction");
    counter!("robohub_db.transaction.started", 1);

    let result = db.transaction(f).await;

    let elapsed = start.elapsed();
    histogram!("robohub_db.transaction.duration", elapsed);

    match &result {
        Ok(_) => {
            counter!("robohub_db.transaction.committed", 1);
            debug!(transaction_id = %transaction_id, "Transaction committed in {:?}", elapsed);
        }
        Err(_) => {
            counter!("robohub_db.transaction.rolled_back", 1);
            warn!(transaction_id = %transaction_id, "Transaction rolled back after {:?}", elapsed);
        }
    }

    result.map_err(|e| match e {
        TransactionError::Connection(db_err) => E::from(db_err),
        TransactionError::Transaction(err) => err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Statement};

    async fn memory_db() -> DatabaseConnection {
        // Every SQLite memory connection is its own database, so pin the pool to one.
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("in-memory sqlite");
        db.execute_unprepared("CREATE TABLE counters (id INTEGER PRIMARY KEY NOT NULL)")
            .await
            .expect("create table");
        db
    }

    async fn count(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM counters".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get("", "n").unwrap()
    }

    #[tokio::test]
    async fn commits_when_closure_succeeds() {
        let db = memory_db().await;
        let out = with_transaction(&db, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO counters (id) VALUES (1)")
                    .await?;
                Ok::<_, ServiceError>(7)
            })
        })
        .await
        .unwrap();

        assert_eq!(out, 7);
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn rolls_back_and_keeps_the_closure_error() {
        let db = memory_db().await;
        let err = with_transaction(&db, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO counters (id) VALUES (1)")
                    .await?;
                Err::<(), _>(ServiceError::not_found("Robot", 1))
            })
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(count(&db).await, 0);
    }
}
