// SPDX-License-Identifier: Apache-2.0

use crate::http::response_contract::{api_error_response, ok_json};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use navtakniq_api::{ApiError, ValidatedInput, SUBMIT_CONTACT};
use navtakniq_store::StoreError;
use serde_json::{Map, Value};
use tracing::{debug, error};

/// An empty body is read as `{}` so missing fields surface as field-level
/// validation issues rather than a parse failure.
pub(crate) fn decode_json_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::malformed_body(&e.to_string()))
}

fn internal_error(operation: &'static str, err: &StoreError) -> Response {
    error!(operation, code = err.code.as_str(), error = %err, "store operation failed");
    api_error_response(&ApiError::internal())
}

pub(crate) async fn submit_contact(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = match decode_json_body(&body) {
        Ok(v) => v,
        Err(err) => return api_error_response(&err),
    };
    let Some(schema) = SUBMIT_CONTACT.input else {
        error!("contact operation has no input schema");
        return api_error_response(&ApiError::internal());
    };
    let input = match schema.validate(&payload) {
        Ok(ValidatedInput::ContactSubmission(input)) => input,
        Err(issues) => {
            let err = ApiError::first_issue(&issues);
            debug!(field = err.field.as_deref().unwrap_or(""), "contact submission rejected");
            return api_error_response(&err);
        }
    };
    match state.store.create_contact_message(input).await {
        Ok(stored) => ok_json(stored),
        Err(err) => internal_error("create_contact_message", &err),
    }
}

pub(crate) async fn list_posts(State(state): State<AppState>) -> Response {
    match state.store.list_blog_posts().await {
        Ok(posts) => ok_json(posts),
        Err(err) => internal_error("list_blog_posts", &err),
    }
}

pub(crate) async fn get_post(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
) -> Response {
    // Only undecodable segments are rejected here.
    let Ok(Path(slug)) = slug else {
        return api_error_response(&ApiError::invalid_slug());
    };
    match state.store.blog_post_by_slug(&slug).await {
        Ok(Some(post)) => ok_json(post),
        Ok(None) => api_error_response(&ApiError::post_not_found()),
        Err(err) => internal_error("blog_post_by_slug", &err),
    }
}

pub(crate) async fn route_not_found() -> Response {
    api_error_response(&ApiError::route_not_found())
}
