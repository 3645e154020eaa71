//! Expense code domain model.
//!
//! # Invariants
//! - `category_id` always references an existing category at commit time.
//! - `code` is trimmed, non-empty and unique within its parent category.
//! - `code` never changes after creation.

use super::category::CategoryId;
use serde::{Deserialize, Serialize};

/// Store-assigned expense code identifier.
pub type CodeId = i64;

/// Bookable code under one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCode {
    pub id: CodeId,
    pub category_id: CategoryId,
    pub code: String,
    /// Free text; no length rule applies at this layer.
    pub description: Option<String>,
    pub is_active: bool,
}
