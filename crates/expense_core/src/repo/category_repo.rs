//! Category repository contract and SQLite implementation.

use super::{bool_to_int, int_to_bool, RepoResult};
use crate::model::category::{CategoryId, ExpenseCategory};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name, is_active FROM expense_categories";

/// Data access for `expense_categories`.
pub trait CategoryRepository {
    /// All categories, ordered by id ascending.
    fn list_categories(&self) -> RepoResult<Vec<ExpenseCategory>>;
    /// One category, or `None` when the id is unknown.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<ExpenseCategory>>;
    /// Inserts a row and returns it with the store-assigned id.
    fn create_category(&self, name: &str, is_active: bool) -> RepoResult<ExpenseCategory>;
    /// Writes all mutable fields of an existing row.
    fn update_category(&self, category: &ExpenseCategory) -> RepoResult<()>;
}

/// SQLite-backed category repository bound to one (transactional) connection.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<ExpenseCategory>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<ExpenseCategory>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_category(&self, name: &str, is_active: bool) -> RepoResult<ExpenseCategory> {
        self.conn.execute(
            "INSERT INTO expense_categories (name, is_active) VALUES (?1, ?2);",
            params![name, bool_to_int(is_active)],
        )?;

        Ok(ExpenseCategory {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            is_active,
        })
    }

    fn update_category(&self, category: &ExpenseCategory) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE expense_categories
             SET name = ?1, is_active = ?2
             WHERE id = ?3;",
            params![
                category.name.as_str(),
                bool_to_int(category.is_active),
                category.id
            ],
        )?;
        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<ExpenseCategory> {
    Ok(ExpenseCategory {
        id: row.get("id")?,
        name: row.get("name")?,
        is_active: int_to_bool(row.get("is_active")?, "expense_categories.is_active")?,
    })
}
