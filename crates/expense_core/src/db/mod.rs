//! SQLite storage bootstrap, schema migrations and transaction scoping.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection owned by a [`Store`].
//! - Apply schema migrations in deterministic order.
//! - Scope every logical operation in one [`UnitOfWork`] transaction.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Foreign keys are enforced on every connection handed out by a store.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod store;
pub mod uow;

pub use store::Store;
pub use uow::UnitOfWork;

pub type DbResult<T> = Result<T, DbError>;

/// Point in a unit of work where the store refused to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
}

impl TxStage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Commit => "commit",
        }
    }
}

/// Store-level failure below the repository layer.
#[derive(Debug)]
pub enum DbError {
    /// A statement failed while running inside an open scope.
    Sqlite(rusqlite::Error),
    /// The scope could not be opened or made durable.
    Transaction {
        stage: TxStage,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    pub(crate) fn transaction(stage: TxStage) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Transaction { stage, source }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Transaction { stage, source } => {
                write!(f, "transaction {} failed: {source}", stage.as_str())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema v{db_version} is ahead of this build (max v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Transaction { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{DbError, TxStage};
    use std::error::Error;

    #[test]
    fn transaction_error_names_the_stage_and_keeps_the_cause() {
        let err = DbError::transaction(TxStage::Commit)(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("transaction commit failed: "));
        assert!(err.source().is_some());
    }
}
