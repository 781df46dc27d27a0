#![forbid(unsafe_code)]

pub mod client;
pub mod contract;
pub mod error_mapping;
mod errors;
pub mod path;

pub use client::{ApiClient, ClientError};
pub use contract::{
    operation, GetPost, HttpMethod, InputSchema, ListPosts, Operation, OperationContract,
    OperationId, ResponseBody, ResponseContract, ResponseShape, SubmitContact, ValidatedInput,
    GET_POST, LIST_POSTS, REGISTRY, SUBMIT_CONTACT,
};
pub use errors::{
    ApiError, ApiErrorCode, ErrorBody, INTERNAL_ERROR_MESSAGE, INVALID_SLUG_MESSAGE,
    POST_NOT_FOUND_MESSAGE, ROUTE_NOT_FOUND_MESSAGE,
};
pub use path::{build_path, placeholders, PathParams, PathValue};

pub const CRATE_NAME: &str = "navtakniq-api";
