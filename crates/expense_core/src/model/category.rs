//! Expense category domain model.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `name` is trimmed, non-empty and unique across all categories.

use serde::{Deserialize, Serialize};

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// Top-level grouping that owns zero or more expense codes.
///
/// Deleting a category at the store level cascades to its codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: CategoryId,
    pub name: String,
    pub is_active: bool,
}
