// SPDX-License-Identifier: Apache-2.0

use crate::contract::ResponseShape;
use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub shape: ResponseShape,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    match error.code {
        ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidParameter
        | ApiErrorCode::MalformedBody => ApiErrorMapping {
            status_code: 400,
            shape: ResponseShape::ValidationError,
        },
        ApiErrorCode::NotFound => ApiErrorMapping {
            status_code: 404,
            shape: ResponseShape::NotFound,
        },
        ApiErrorCode::Internal => ApiErrorMapping {
            status_code: 500,
            shape: ResponseShape::InternalError,
        },
    }
}
