//! Transaction scope for one logical operation.
//!
//! # Responsibility
//! - Acquire the store connection, begin a transaction, run one action.
//! - Commit on success, roll back on any error, always release.
//!
//! # Invariants
//! - Exactly one of commit or rollback happens per `run` call.
//! - The action's error is returned unchanged after rollback.
//! - Scopes do not nest; one scope per request or script call.

use super::{DbError, Store, TxStage};
use log::{debug, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::sync::Arc;
use std::time::Instant;

/// Factory for transaction scopes over a shared [`Store`].
#[derive(Debug, Clone)]
pub struct UnitOfWork {
    store: Arc<Store>,
}

impl UnitOfWork {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Runs `action` inside one IMMEDIATE transaction.
    ///
    /// `action` receives the transactional connection; everything it writes
    /// becomes visible to other scopes only after a successful commit.
    ///
    /// # Errors
    /// - Returns the action's error unchanged after rolling back.
    /// - Returns `DbError` (converted into `E`) when begin or commit fails;
    ///   a failed commit leaves the transaction rolled back.
    ///
    /// # Panics
    /// Panics raised by `action` propagate; the transaction is rolled back
    /// and the connection released during unwind.
    pub fn run<T, E, F>(&self, action: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        let started_at = Instant::now();
        let mut conn = self.store.acquire();

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::transaction(TxStage::Begin))?;

        let outcome = action(&tx);
        let result = match outcome {
            Ok(value) => match tx.commit() {
                Ok(()) => {
                    debug!(
                        "event=uow_commit module=db status=ok duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    Ok(value)
                }
                Err(err) => {
                    warn!(
                        "event=uow_commit module=db status=error duration_ms={} error_code=commit_failed error={}",
                        started_at.elapsed().as_millis(),
                        err
                    );
                    Err(E::from(DbError::transaction(TxStage::Commit)(err)))
                }
            },
            Err(err) => {
                match tx.rollback() {
                    Ok(()) => debug!(
                        "event=uow_rollback module=db status=ok duration_ms={}",
                        started_at.elapsed().as_millis()
                    ),
                    Err(rollback_err) => warn!(
                        "event=uow_rollback module=db status=error duration_ms={} error_code=rollback_failed error={}",
                        started_at.elapsed().as_millis(),
                        rollback_err
                    ),
                }
                Err(err)
            }
        };

        release(&conn);
        result
    }
}

// Last step before the guard drops: never hand back a connection that is
// still inside a transaction.
fn release(conn: &Connection) {
    if conn.is_autocommit() {
        return;
    }
    if let Err(err) = conn.execute_batch("ROLLBACK;") {
        warn!(
            "event=uow_release module=db status=error error_code=forced_rollback_failed error={}",
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::UnitOfWork;
    use crate::db::{DbError, Store};
    use std::sync::Arc;

    fn uow() -> UnitOfWork {
        UnitOfWork::new(Arc::new(Store::open_in_memory().unwrap()))
    }

    fn category_count(uow: &UnitOfWork) -> i64 {
        uow.run(|conn| {
            conn.query_row("SELECT COUNT(*) FROM expense_categories;", [], |row| {
                row.get(0)
            })
            .map_err(DbError::from)
        })
        .unwrap()
    }

    #[test]
    fn run_commits_on_success() {
        let uow = uow();
        uow.run(|conn| {
            conn.execute("INSERT INTO expense_categories (name) VALUES ('Travel');", [])
                .map_err(DbError::from)
        })
        .unwrap();

        assert_eq!(category_count(&uow), 1);
    }

    #[test]
    fn run_rolls_back_and_returns_action_error_unchanged() {
        let uow = uow();
        let err = uow
            .run(|conn| -> Result<(), DbError> {
                conn.execute("INSERT INTO expense_categories (name) VALUES ('Travel');", [])?;
                Err(DbError::UnsupportedSchemaVersion {
                    db_version: 7,
                    latest_supported: 1,
                })
            })
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UnsupportedSchemaVersion { db_version: 7, .. }
        ));
        assert_eq!(category_count(&uow), 0);
    }

    #[test]
    fn panic_inside_scope_rolls_back_and_releases_connection() {
        let uow = uow();
        let cloned = uow.clone();
        let outcome = std::panic::catch_unwind(move || {
            let _: Result<(), DbError> = cloned.run(|conn| {
                conn.execute("INSERT INTO expense_categories (name) VALUES ('Travel');", [])?;
                panic!("boom");
            });
        });
        assert!(outcome.is_err());

        assert_eq!(category_count(&uow), 0);
    }
}
