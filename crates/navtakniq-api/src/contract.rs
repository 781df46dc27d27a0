// SPDX-License-Identifier: Apache-2.0

//! Contract registry: one declaration per network operation, read by both the
//! router and [`crate::ApiClient`].

use crate::errors::ErrorBody;
use crate::path::placeholders;
use navtakniq_model::{
    BlogPost, ContactMessage, FieldRule, InsertShape, NewContactMessage, ValidationIssue,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationId {
    SubmitContact,
    ListPosts,
    GetPost,
}

impl OperationId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitContact => "contact.submit",
            Self::ListPosts => "posts.list",
            Self::GetPost => "posts.get",
        }
    }
}

/// Request body validators. Each variant delegates to the model's insert shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSchema {
    ContactSubmission,
}

impl InputSchema {
    #[must_use]
    pub fn fields(self) -> &'static [FieldRule] {
        match self {
            Self::ContactSubmission => NewContactMessage::FIELDS,
        }
    }

    pub fn validate(self, body: &Value) -> Result<ValidatedInput, Vec<ValidationIssue>> {
        match self {
            Self::ContactSubmission => {
                NewContactMessage::validate(body).map(ValidatedInput::ContactSubmission)
            }
        }
    }
}

/// Typed request body produced by [`InputSchema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedInput {
    ContactSubmission(NewContactMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    ContactMessage,
    BlogPost,
    BlogPostList,
    ValidationError,
    NotFound,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    ContactMessage(ContactMessage),
    BlogPost(BlogPost),
    BlogPostList(Vec<BlogPost>),
    Error(ErrorBody),
}

impl ResponseShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContactMessage => "ContactMessage",
            Self::BlogPost => "BlogPost",
            Self::BlogPostList => "BlogPost[]",
            Self::ValidationError => "ValidationError",
            Self::NotFound => "NotFound",
            Self::InternalError => "InternalError",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::ValidationError | Self::NotFound | Self::InternalError
        )
    }

    pub fn parse(self, body: &Value) -> Result<ResponseBody, ValidationIssue> {
        match self {
            Self::ContactMessage => decode(self, body).map(ResponseBody::ContactMessage),
            Self::BlogPost => decode(self, body).map(ResponseBody::BlogPost),
            Self::BlogPostList => decode(self, body).map(ResponseBody::BlogPostList),
            Self::ValidationError | Self::NotFound | Self::InternalError => {
                decode(self, body).map(ResponseBody::Error)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(shape: ResponseShape, body: &Value) -> Result<T, ValidationIssue> {
    T::deserialize(body).map_err(|e| {
        ValidationIssue::root(format!("response is not a {}: {e}", shape.as_str()))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseContract {
    pub status: u16,
    pub shape: ResponseShape,
}

const fn respond(status: u16, shape: ResponseShape) -> ResponseContract {
    ResponseContract { status, shape }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationContract {
    pub id: OperationId,
    pub method: HttpMethod,
    pub path: &'static str,
    pub input: Option<InputSchema>,
    pub responses: &'static [ResponseContract],
}

impl OperationContract {
    #[must_use]
    pub fn response_shape(&self, status: u16) -> Option<ResponseShape> {
        self.responses
            .iter()
            .find(|r| r.status == status)
            .map(|r| r.shape)
    }

    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.path)
    }
}

pub const SUBMIT_CONTACT: OperationContract = OperationContract {
    id: OperationId::SubmitContact,
    method: HttpMethod::Post,
    path: "/api/contact",
    input: Some(InputSchema::ContactSubmission),
    responses: &[
        respond(200, ResponseShape::ContactMessage),
        respond(400, ResponseShape::ValidationError),
        respond(500, ResponseShape::InternalError),
    ],
};

pub const LIST_POSTS: OperationContract = OperationContract {
    id: OperationId::ListPosts,
    method: HttpMethod::Get,
    path: "/api/posts",
    input: None,
    responses: &[
        respond(200, ResponseShape::BlogPostList),
        respond(500, ResponseShape::InternalError),
    ],
};

pub const GET_POST: OperationContract = OperationContract {
    id: OperationId::GetPost,
    method: HttpMethod::Get,
    path: "/api/posts/:slug",
    input: None,
    responses: &[
        respond(200, ResponseShape::BlogPost),
        respond(400, ResponseShape::ValidationError),
        respond(404, ResponseShape::NotFound),
        respond(500, ResponseShape::InternalError),
    ],
};

pub const REGISTRY: [&OperationContract; 3] = [&SUBMIT_CONTACT, &LIST_POSTS, &GET_POST];

#[must_use]
pub fn operation(id: OperationId) -> &'static OperationContract {
    match id {
        OperationId::SubmitContact => &SUBMIT_CONTACT,
        OperationId::ListPosts => &LIST_POSTS,
        OperationId::GetPost => &GET_POST,
    }
}

/// Compile-time binding of an operation to its contract and Rust types.
pub trait Operation {
    const CONTRACT: &'static OperationContract;
    type Input;
    type Output: Serialize + DeserializeOwned;
}

#[derive(Debug, Clone, Copy)]
pub struct SubmitContact;

#[derive(Debug, Clone, Copy)]
pub struct ListPosts;

#[derive(Debug, Clone, Copy)]
pub struct GetPost;

impl Operation for SubmitContact {
    const CONTRACT: &'static OperationContract = &SUBMIT_CONTACT;
    type Input = NewContactMessage;
    type Output = ContactMessage;
}

impl Operation for ListPosts {
    const CONTRACT: &'static OperationContract = &LIST_POSTS;
    type Input = ();
    type Output = Vec<BlogPost>;
}

impl Operation for GetPost {
    const CONTRACT: &'static OperationContract = &GET_POST;
    type Input = ();
    type Output = BlogPost;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_paths_are_unique_per_method() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in REGISTRY.iter().skip(i + 1) {
                assert!(
                    !(a.method == b.method && a.path == b.path),
                    "duplicate route {} {}",
                    a.method.as_str(),
                    a.path
                );
            }
        }
    }

    #[test]
    fn lookup_by_id_matches_registry() {
        for contract in REGISTRY {
            assert_eq!(operation(contract.id), contract);
        }
    }

    #[test]
    fn every_operation_declares_success_and_internal_error() {
        for contract in REGISTRY {
            assert!(contract.response_shape(200).is_some_and(|s| !s.is_error()));
            assert_eq!(
                contract.response_shape(500),
                Some(ResponseShape::InternalError)
            );
        }
    }

    #[test]
    fn unregistered_status_has_no_shape() {
        assert_eq!(LIST_POSTS.response_shape(404), None);
        assert_eq!(SUBMIT_CONTACT.response_shape(201), None);
    }

    #[test]
    fn get_post_template_names_slug() {
        assert_eq!(GET_POST.placeholders(), vec!["slug"]);
        assert!(LIST_POSTS.placeholders().is_empty());
    }

    #[test]
    fn input_schema_is_the_model_insert_shape() {
        let schema = SUBMIT_CONTACT.input.expect("contact input");
        assert_eq!(schema.fields(), NewContactMessage::FIELDS);
        let issues = schema.validate(&json!({})).expect_err("empty body");
        assert_eq!(issues[0].field(), "name");
        let ValidatedInput::ContactSubmission(input) = schema
            .validate(&json!({"name": "Ada", "email": "a@x.io", "message": "hi", "id": 3}))
            .expect("valid body");
        assert_eq!(input, NewContactMessage::new("Ada", "a@x.io", None, "hi"));
        assert!(LIST_POSTS.input.is_none());
        assert!(GET_POST.input.is_none());
    }

    #[test]
    fn error_shapes_parse_message_and_optional_field() {
        let parsed = ResponseShape::ValidationError
            .parse(&json!({"message": "Required", "field": "email"}))
            .expect("validation body");
        assert_eq!(
            parsed,
            ResponseBody::Error(ErrorBody {
                message: "Required".to_string(),
                field: Some("email".to_string()),
            })
        );
        assert!(ResponseShape::NotFound.parse(&json!({"msg": "x"})).is_err());
    }

    #[test]
    fn list_shape_rejects_single_object() {
        let err = ResponseShape::BlogPostList
            .parse(&json!({"id": 1}))
            .expect_err("not a list");
        assert!(err.message.contains("BlogPost[]"));
    }
}
