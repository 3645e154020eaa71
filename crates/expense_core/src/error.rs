//! Domain errors and their wire translation.
//!
//! # Responsibility
//! - Classify every failure surfaced by core into one of four kinds.
//! - Give each failure a stable `(code, message)` pair callers branch on.
//!
//! # Invariants
//! - `code` values are a stable contract; messages are for humans.
//! - `Database` never exposes store error text through `message()`.

use crate::db::DbError;
use crate::repo::RepoError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Database,
}

/// Failure raised by the service layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller-supplied data failed a semantic check.
    Validation {
        code: &'static str,
        message: &'static str,
    },
    /// A uniqueness invariant would be violated.
    Conflict {
        code: &'static str,
        message: &'static str,
    },
    /// A referenced entity does not exist.
    NotFound {
        code: &'static str,
        message: &'static str,
    },
    /// Unclassified persistence failure. The source is kept for logs only.
    Database { source: Option<RepoError> },
}

impl ServiceError {
    pub fn empty_name() -> Self {
        Self::Validation {
            code: "empty_name",
            message: "Category name must not be empty.",
        }
    }

    pub fn empty_code() -> Self {
        Self::Validation {
            code: "empty_code",
            message: "Expense code must not be empty.",
        }
    }

    pub fn duplicate_name() -> Self {
        Self::Conflict {
            code: "duplicate_name",
            message: "Category name must be unique.",
        }
    }

    pub fn duplicate_code() -> Self {
        Self::Conflict {
            code: "duplicate_code",
            message: "Expense code must be unique within category.",
        }
    }

    pub fn category_not_found() -> Self {
        Self::NotFound {
            code: "not_found",
            message: "Category not found.",
        }
    }

    pub fn code_not_found() -> Self {
        Self::NotFound {
            code: "not_found",
            message: "Expense code not found.",
        }
    }

    pub fn database(source: RepoError) -> Self {
        Self::Database {
            source: Some(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database { .. } => ErrorKind::Database,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. }
            | Self::Conflict { code, .. }
            | Self::NotFound { code, .. } => code,
            Self::Database { .. } => "db_error",
        }
    }

    /// Human-readable message safe to show to callers.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation { message, .. }
            | Self::Conflict { message, .. }
            | Self::NotFound { message, .. } => message,
            Self::Database { .. } => "Database error.",
        }
    }

    /// Transport status suggested for this failure.
    ///
    /// Validation and conflict share 400: both are caller-correctable.
    pub fn suggested_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Database => 500,
        }
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code().to_string(),
            message: self.message().to_string(),
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            detail: self.to_detail(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Database {
                source: Some(err), ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::database(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::database(RepoError::Db(value))
    }
}

/// `(code, message)` pair as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Uniform error body: `{"detail": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: ErrorDetail,
}
