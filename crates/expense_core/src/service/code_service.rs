//! Expense code use-case service.
//!
//! # Invariants
//! - `code` is immutable here; only `description` and `is_active` change.
//! - `description` is stored verbatim, empty string included.
//! - Store failures during the write surface as `db_error`; no business
//!   rule explains them.

use super::category_service::log_failure;
use crate::error::{ServiceError, ServiceResult};
use crate::model::code::{CodeId, ExpenseCode};
use crate::repo::code_repo::CodeRepository;
use serde::{Deserialize, Serialize};

/// Merge-patch input for [`CodeService::update_code`].
///
/// There is deliberately no `code` field: unknown keys sent by callers are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Code service facade over a repository implementation.
pub struct CodeService<K: CodeRepository> {
    codes: K,
}

impl<K: CodeRepository> CodeService<K> {
    pub fn new(codes: K) -> Self {
        Self { codes }
    }

    /// Applies a merge-patch to one code.
    ///
    /// # Errors
    /// - `not_found` when no code has `id`.
    /// - `db_error` when the store rejects the write.
    pub fn update_code(&self, id: CodeId, patch: &CodePatch) -> ServiceResult<ExpenseCode> {
        self.update_code_inner(id, patch)
            .inspect_err(log_failure("code_update"))
    }

    fn update_code_inner(&self, id: CodeId, patch: &CodePatch) -> ServiceResult<ExpenseCode> {
        let mut code = self
            .codes
            .get_code(id)?
            .ok_or_else(ServiceError::code_not_found)?;

        if let Some(description) = patch.description.as_ref() {
            code.description = Some(description.clone());
        }
        if let Some(is_active) = patch.is_active {
            code.is_active = is_active;
        }

        self.codes
            .update_code(&code)
            .map_err(ServiceError::database)?;
        Ok(code)
    }
}
