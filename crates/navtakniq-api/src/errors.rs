// SPDX-License-Identifier: Apache-2.0

use navtakniq_model::ValidationIssue;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const POST_NOT_FOUND_MESSAGE: &str = "Post not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const INVALID_SLUG_MESSAGE: &str = "Invalid slug";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Not found";

/// Wire body shared by every error status: `{message}` or `{message, field}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidParameter,
    MalformedBody,
    NotFound,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::InvalidParameter => "invalid_parameter",
            Self::MalformedBody => "malformed_body",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub field: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    #[must_use]
    pub fn validation(issue: &ValidationIssue) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: issue.message.clone(),
            field: Some(issue.field()),
        }
    }

    /// First issue wins; an empty list still yields a 400 without a field.
    #[must_use]
    pub fn first_issue(issues: &[ValidationIssue]) -> Self {
        issues.first().map_or_else(
            || Self::new(ApiErrorCode::ValidationFailed, "validation failed"),
            Self::validation,
        )
    }

    #[must_use]
    pub fn invalid_slug() -> Self {
        Self::new(ApiErrorCode::InvalidParameter, INVALID_SLUG_MESSAGE)
    }

    #[must_use]
    pub fn malformed_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::MalformedBody,
            format!("malformed JSON body: {reason}"),
        )
    }

    #[must_use]
    pub fn post_not_found() -> Self {
        Self::new(ApiErrorCode::NotFound, POST_NOT_FOUND_MESSAGE)
    }

    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(ApiErrorCode::NotFound, ROUTE_NOT_FOUND_MESSAGE)
    }

    /// Generic 500; the underlying cause stays in server logs.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
    }

    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message.clone(),
            field: self.field.clone(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} ({field})", self.code.as_str(), self.message),
            None => write!(f, "{}: {}", self.code.as_str(), self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_is_omitted_when_absent() {
        let body = ApiError::post_not_found().body();
        assert_eq!(
            serde_json::to_value(body).expect("encode"),
            json!({"message": "Post not found"})
        );
    }

    #[test]
    fn validation_error_carries_dotted_field() {
        let issue = ValidationIssue {
            path: vec!["address".to_string(), "city".to_string()],
            message: "Required".to_string(),
        };
        let body = ApiError::validation(&issue).body();
        assert_eq!(
            serde_json::to_value(body).expect("encode"),
            json!({"message": "Required", "field": "address.city"})
        );
    }

    #[test]
    fn first_issue_of_empty_list_has_no_field() {
        let err = ApiError::first_issue(&[]);
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
        assert_eq!(err.field, None);
    }
}
