//! Request bodies accepted by the HTTP surface.
//!
//! Shape and length limits are enforced here; trimming and uniqueness are
//! left to the core services.

use expense_core::{CategoryPatch, CodePatch, NewCategory, NewCode};
use serde::Deserialize;
use validator::Validate;

pub const NAME_MAX_LEN: u64 = 120;
pub const CODE_MAX_LEN: u64 = 64;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCodeRequest {
    #[validate(length(min = 1, max = CODE_MAX_LEN))]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `code` is not accepted here; unknown keys are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCodeRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(value: CreateCategoryRequest) -> Self {
        Self { name: value.name }
    }
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(value: UpdateCategoryRequest) -> Self {
        Self {
            name: value.name,
            is_active: value.is_active,
        }
    }
}

impl From<CreateCodeRequest> for NewCode {
    fn from(value: CreateCodeRequest) -> Self {
        Self {
            code: value.code,
            description: value.description,
        }
    }
}

impl From<UpdateCodeRequest> for CodePatch {
    fn from(value: UpdateCodeRequest) -> Self {
        Self {
            description: value.description,
            is_active: value.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CreateCategoryRequest, CreateCodeRequest, UpdateCategoryRequest, CODE_MAX_LEN,
        NAME_MAX_LEN,
    };
    use validator::Validate;

    #[test]
    fn name_length_is_bounded() {
        let ok = CreateCategoryRequest {
            name: "x".repeat(NAME_MAX_LEN as usize),
        };
        assert!(ok.validate().is_ok());

        let long = CreateCategoryRequest {
            name: "x".repeat(NAME_MAX_LEN as usize + 1),
        };
        assert!(long.validate().is_err());

        let empty = CreateCategoryRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn whitespace_name_passes_shape_check() {
        let blank = CreateCategoryRequest {
            name: "   ".to_string(),
        };
        assert!(blank.validate().is_ok());
    }

    #[test]
    fn patch_without_name_is_valid() {
        let patch = UpdateCategoryRequest {
            name: None,
            is_active: Some(false),
        };
        assert!(patch.validate().is_ok());

        let empty = UpdateCategoryRequest {
            name: Some(String::new()),
            is_active: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn code_length_counts_characters() {
        let wide = CreateCodeRequest {
            code: "é".repeat(CODE_MAX_LEN as usize),
            description: None,
        };
        assert!(wide.validate().is_ok());

        let long = CreateCodeRequest {
            code: "c".repeat(CODE_MAX_LEN as usize + 1),
            description: None,
        };
        assert!(long.validate().is_err());
    }
}
