//! Category use-case service.
//!
//! # Responsibility
//! - Validate and normalize category/code input above the repository layer.
//! - Turn store uniqueness violations into conflict errors.
//!
//! # Invariants
//! - Names and codes are trimmed before emptiness and uniqueness checks.
//! - Updates are merge-patches: absent fields are never touched.
//! - Missing parent categories are reported as `not_found`, never as an
//!   empty list.

use crate::error::{ServiceError, ServiceResult};
use crate::model::category::{CategoryId, ExpenseCategory};
use crate::model::code::ExpenseCode;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::code_repo::{CodeRepository, NewCodeRow};
use crate::repo::RepoError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Input for [`CategoryService::create_category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// Merge-patch input for [`CategoryService::update_category`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Input for [`CategoryService::create_code_for_category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCode {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Category service facade over repository implementations.
pub struct CategoryService<C: CategoryRepository, K: CodeRepository> {
    categories: C,
    codes: K,
}

impl<C: CategoryRepository, K: CodeRepository> CategoryService<C, K> {
    pub fn new(categories: C, codes: K) -> Self {
        Self { categories, codes }
    }

    /// Lists all categories in ascending id order.
    pub fn list_categories(&self) -> ServiceResult<Vec<ExpenseCategory>> {
        Ok(self.categories.list_categories()?)
    }

    /// Creates one active category.
    ///
    /// # Errors
    /// - `empty_name` when the trimmed name is empty.
    /// - `duplicate_name` when another category already uses the name.
    pub fn create_category(&self, input: &NewCategory) -> ServiceResult<ExpenseCategory> {
        normalize_name(&input.name)
            .and_then(|name| {
                self.categories
                    .create_category(name, true)
                    .map_err(|err| classify_write_error(err, ServiceError::duplicate_name))
            })
            .inspect_err(log_failure("category_create"))
    }

    /// Applies a merge-patch to one category.
    ///
    /// # Errors
    /// - `not_found` when no category has `id`.
    /// - `empty_name` / `duplicate_name` as for create.
    pub fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> ServiceResult<ExpenseCategory> {
        self.update_category_inner(id, patch)
            .inspect_err(log_failure("category_update"))
    }

    /// Lists all codes of one category in ascending id order.
    ///
    /// # Errors
    /// - `not_found` when the category does not exist.
    pub fn list_codes_for_category(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<Vec<ExpenseCode>> {
        self.ensure_category_exists(category_id)
            .inspect_err(log_failure("category_codes_list"))?;
        Ok(self.codes.list_codes_by_category(category_id)?)
    }

    /// Creates one active code under an existing category.
    ///
    /// # Errors
    /// - `not_found` when the category does not exist.
    /// - `empty_code` when the trimmed code is empty.
    /// - `duplicate_code` when the category already has this code.
    pub fn create_code_for_category(
        &self,
        category_id: CategoryId,
        input: &NewCode,
    ) -> ServiceResult<ExpenseCode> {
        self.create_code_inner(category_id, input)
            .inspect_err(log_failure("code_create"))
    }

    fn update_category_inner(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> ServiceResult<ExpenseCategory> {
        let mut category = self
            .categories
            .get_category(id)?
            .ok_or_else(ServiceError::category_not_found)?;

        if let Some(name) = patch.name.as_deref() {
            category.name = normalize_name(name)?.to_string();
        }
        if let Some(is_active) = patch.is_active {
            category.is_active = is_active;
        }

        self.categories
            .update_category(&category)
            .map_err(|err| classify_write_error(err, ServiceError::duplicate_name))?;
        Ok(category)
    }

    fn create_code_inner(
        &self,
        category_id: CategoryId,
        input: &NewCode,
    ) -> ServiceResult<ExpenseCode> {
        self.ensure_category_exists(category_id)?;

        let code = input.code.trim();
        if code.is_empty() {
            return Err(ServiceError::empty_code());
        }

        let row = NewCodeRow {
            category_id,
            code,
            description: input.description.as_deref(),
            is_active: true,
        };
        self.codes
            .create_code(&row)
            .map_err(|err| classify_write_error(err, ServiceError::duplicate_code))
    }

    fn ensure_category_exists(&self, category_id: CategoryId) -> ServiceResult<()> {
        match self.categories.get_category(category_id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::category_not_found()),
        }
    }
}

fn normalize_name(raw: &str) -> ServiceResult<&str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::empty_name());
    }
    Ok(name)
}

/// Maps a unique-constraint failure to `conflict`, anything else to `db_error`.
fn classify_write_error(err: RepoError, conflict: fn() -> ServiceError) -> ServiceError {
    if err.is_unique_violation() {
        conflict()
    } else {
        ServiceError::database(err)
    }
}

pub(crate) fn log_failure(event: &'static str) -> impl Fn(&ServiceError) {
    move |err| {
        warn!(
            "event={event} module=service status=error error_code={}",
            err.code()
        );
    }
}
