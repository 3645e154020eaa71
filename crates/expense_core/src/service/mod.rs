//! Core use-case services.
//!
//! # Responsibility
//! - Enforce validation and uniqueness rules, raising typed domain errors.
//! - Orchestrate repository calls inside the caller's unit of work.
//!
//! Services never open or commit transactions themselves; build them from
//! the connection handed to [`crate::db::UnitOfWork::run`].

pub mod category_service;
pub mod code_service;

use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::code_repo::SqliteCodeRepository;
use category_service::CategoryService;
use code_service::CodeService;
use rusqlite::Connection;

/// Category service bound to one transactional connection.
pub fn sqlite_category_service(
    conn: &Connection,
) -> CategoryService<SqliteCategoryRepository<'_>, SqliteCodeRepository<'_>> {
    CategoryService::new(
        SqliteCategoryRepository::new(conn),
        SqliteCodeRepository::new(conn),
    )
}

/// Code service bound to one transactional connection.
pub fn sqlite_code_service(conn: &Connection) -> CodeService<SqliteCodeRepository<'_>> {
    CodeService::new(SqliteCodeRepository::new(conn))
}
