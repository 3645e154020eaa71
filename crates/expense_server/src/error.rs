//! HTTP error translation.
//!
//! Domain failures keep their stable `code`; request-shape failures become
//! a 422 `validation_error` carrying per-field issues. Store failures are
//! logged with their cause and answered with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use expense_core::{ErrorKind, ServiceError};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use validator::ValidationErrors;

pub const VALIDATION_ERROR_CODE: &str = "validation_error";
pub const VALIDATION_ERROR_MESSAGE: &str = "Request validation failed.";
pub const INTERNAL_ERROR_CODE: &str = "internal_error";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";
pub const HTTP_ERROR_CODE: &str = "http_error";

/// One rejected input location, e.g. `["body", "name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldIssue {
    fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|part| (*part).to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    RequestValidation(Vec<FieldIssue>),
    /// Routing-level failure such as an unknown path or method.
    Http(StatusCode, String),
    Internal(String),
}

#[derive(Serialize)]
struct Body<'a> {
    detail: Detail<'a>,
}

#[derive(Serialize)]
struct Detail<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldIssue]>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => StatusCode::from_u16(err.suggested_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::RequestValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Http(status, _) => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            Self::Service(err) if err.kind() == ErrorKind::Database => {
                let cause = err
                    .source()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown".to_string());
                error!(
                    "event=request_failed module=http status=error error_code={} cause={cause}",
                    err.code()
                );
            }
            Self::Internal(cause) => {
                error!(
                    "event=request_failed module=http status=error error_code={INTERNAL_ERROR_CODE} cause={cause}"
                );
            }
            _ => {}
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::RequestValidation(issues) => write!(
                f,
                "{VALIDATION_ERROR_CODE}: {} invalid field(s)",
                issues.len()
            ),
            Self::Http(_, message) => write!(f, "{HTTP_ERROR_CODE}: {message}"),
            Self::Internal(cause) => write!(f, "{INTERNAL_ERROR_CODE}: {cause}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = match &self {
            Self::Service(err) => Body {
                detail: Detail {
                    code: err.code(),
                    message: err.message(),
                    errors: None,
                },
            },
            Self::RequestValidation(issues) => Body {
                detail: Detail {
                    code: VALIDATION_ERROR_CODE,
                    message: VALIDATION_ERROR_MESSAGE,
                    errors: Some(issues),
                },
            },
            Self::Http(_, message) => Body {
                detail: Detail {
                    code: HTTP_ERROR_CODE,
                    message: message.as_str(),
                    errors: None,
                },
            },
            Self::Internal(_) => Body {
                detail: Detail {
                    code: INTERNAL_ERROR_CODE,
                    message: INTERNAL_ERROR_MESSAGE,
                    errors: None,
                },
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        let kind = match &value {
            JsonRejection::MissingJsonContentType(_) => "content_type",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::JsonDataError(_) => "json_data",
            _ => "body",
        };
        Self::RequestValidation(vec![FieldIssue::new(&["body"], value.body_text(), kind)])
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::RequestValidation(vec![FieldIssue::new(
            &["path", "id"],
            value.body_text(),
            "int_parsing",
        )])
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        let mut issues: Vec<FieldIssue> = value
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |err| {
                    let msg = err
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| describe(err));
                    FieldIssue::new(&["body", field.as_str()], msg, err.code.to_string())
                })
            })
            .collect();
        issues.sort_by(|left, right| left.loc.cmp(&right.loc));
        Self::RequestValidation(issues)
    }
}

fn describe(err: &validator::ValidationError) -> String {
    let min = err.params.get("min");
    let max = err.params.get("max");
    match (err.code.as_ref(), min, max) {
        ("length", Some(min), Some(max)) => {
            format!("length must be between {min} and {max} characters")
        }
        _ => format!("failed `{}` check", err.code),
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, FieldIssue};
    use axum::http::StatusCode;
    use expense_core::ServiceError;

    #[test]
    fn status_follows_error_kind() {
        assert_eq!(
            ApiError::from(ServiceError::duplicate_name()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ServiceError::category_not_found()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Service(ServiceError::Database { source: None }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::RequestValidation(Vec::new()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn http_error_keeps_its_status() {
        let err = ApiError::Http(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string());
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "http_error: Method Not Allowed");
    }

    #[test]
    fn field_issue_serializes_type_key() {
        let issue = FieldIssue::new(&["body", "name"], "too long", "length");
        let value = serde_json::to_value(issue).unwrap();
        assert_eq!(value["type"], "length");
        assert_eq!(value["loc"], serde_json::json!(["body", "name"]));
    }
}
