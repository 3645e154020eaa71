//! Initial reference data for empty databases.

use crate::model::category::ExpenseCategory;
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::code_repo::{CodeRepository, NewCodeRow, SqliteCodeRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

struct SeedCode {
    code: &'static str,
    description: &'static str,
    is_active: bool,
}

struct SeedCategory {
    name: &'static str,
    is_active: bool,
    codes: &'static [SeedCode],
}

const SEED: &[SeedCategory] = &[
    SeedCategory {
        name: "Travel",
        is_active: true,
        codes: &[
            SeedCode {
                code: "FLIGHT",
                description: "Air travel",
                is_active: true,
            },
            SeedCode {
                code: "HOTEL",
                description: "Accommodation",
                is_active: true,
            },
        ],
    },
    SeedCategory {
        name: "Meals",
        is_active: true,
        codes: &[SeedCode {
            code: "LUNCH",
            description: "Lunch with client",
            is_active: true,
        }],
    },
    SeedCategory {
        name: "Office",
        is_active: false,
        codes: &[SeedCode {
            code: "SUPPLIES",
            description: "Office supplies",
            is_active: false,
        }],
    },
];

/// Inserts the reference categories and codes when no category exists yet.
///
/// Run inside a unit of work; returns `true` when rows were written.
pub fn seed_if_empty(conn: &Connection) -> RepoResult<bool> {
    let categories = SqliteCategoryRepository::new(conn);
    let has_any: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM expense_categories LIMIT 1);",
        [],
        |row| row.get(0),
    )?;
    if has_any {
        return Ok(false);
    }

    let codes = SqliteCodeRepository::new(conn);
    let mut code_count = 0usize;
    for seed in SEED {
        let ExpenseCategory { id, .. } = categories.create_category(seed.name, seed.is_active)?;
        for code in seed.codes {
            codes.create_code(&NewCodeRow {
                category_id: id,
                code: code.code,
                description: Some(code.description),
                is_active: code.is_active,
            })?;
            code_count += 1;
        }
    }

    info!(
        "event=seed module=seed status=ok categories={} codes={}",
        SEED.len(),
        code_count
    );
    Ok(true)
}
