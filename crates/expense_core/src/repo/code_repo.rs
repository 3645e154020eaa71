//! Expense code repository contract and SQLite implementation.

use super::{bool_to_int, int_to_bool, RepoResult};
use crate::model::category::CategoryId;
use crate::model::code::{CodeId, ExpenseCode};
use rusqlite::{params, Connection, Row};

const CODE_SELECT_SQL: &str = "SELECT
    id,
    category_id,
    code,
    description,
    is_active
FROM expense_codes";

/// Field set for a code row that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCodeRow<'a> {
    pub category_id: CategoryId,
    pub code: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
}

/// Data access for `expense_codes`.
pub trait CodeRepository {
    /// One code, or `None` when the id is unknown.
    fn get_code(&self, id: CodeId) -> RepoResult<Option<ExpenseCode>>;
    /// All codes of one category, ordered by id ascending.
    ///
    /// Does not check that the category exists.
    fn list_codes_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<ExpenseCode>>;
    /// Inserts a row and returns it with the store-assigned id.
    fn create_code(&self, row: &NewCodeRow<'_>) -> RepoResult<ExpenseCode>;
    /// Writes the mutable fields (`description`, `is_active`) of an existing row.
    fn update_code(&self, code: &ExpenseCode) -> RepoResult<()>;
}

/// SQLite-backed code repository bound to one (transactional) connection.
pub struct SqliteCodeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCodeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CodeRepository for SqliteCodeRepository<'_> {
    fn get_code(&self, id: CodeId) -> RepoResult<Option<ExpenseCode>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CODE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_code_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_codes_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<ExpenseCode>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CODE_SELECT_SQL}
             WHERE category_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([category_id])?;
        let mut codes = Vec::new();
        while let Some(row) = rows.next()? {
            codes.push(parse_code_row(row)?);
        }
        Ok(codes)
    }

    fn create_code(&self, row: &NewCodeRow<'_>) -> RepoResult<ExpenseCode> {
        self.conn.execute(
            "INSERT INTO expense_codes (
                category_id,
                code,
                description,
                is_active
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                row.category_id,
                row.code,
                row.description,
                bool_to_int(row.is_active),
            ],
        )?;

        Ok(ExpenseCode {
            id: self.conn.last_insert_rowid(),
            category_id: row.category_id,
            code: row.code.to_string(),
            description: row.description.map(str::to_string),
            is_active: row.is_active,
        })
    }

    fn update_code(&self, code: &ExpenseCode) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE expense_codes
             SET description = ?1, is_active = ?2
             WHERE id = ?3;",
            params![
                code.description.as_deref(),
                bool_to_int(code.is_active),
                code.id
            ],
        )?;
        Ok(())
    }
}

fn parse_code_row(row: &Row<'_>) -> RepoResult<ExpenseCode> {
    Ok(ExpenseCode {
        id: row.get("id")?,
        category_id: row.get("category_id")?,
        code: row.get("code")?,
        description: row.get("description")?,
        is_active: int_to_bool(row.get("is_active")?, "expense_codes.is_active")?,
    })
}
