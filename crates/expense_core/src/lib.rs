//! Core domain logic for the expense category/code registry.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use db::{DbError, DbResult, Store, UnitOfWork};
pub use error::{ErrorDetail, ErrorEnvelope, ErrorKind, ServiceError, ServiceResult};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use model::category::{CategoryId, ExpenseCategory};
pub use model::code::{CodeId, ExpenseCode};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::code_repo::{CodeRepository, NewCodeRow, SqliteCodeRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::seed_if_empty;
pub use service::category_service::{CategoryPatch, CategoryService, NewCategory, NewCode};
pub use service::code_service::{CodePatch, CodeService};
pub use service::{sqlite_category_service, sqlite_code_service};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
