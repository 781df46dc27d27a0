// SPDX-License-Identifier: Apache-2.0

use crate::contract::{
    GetPost, HttpMethod, ListPosts, Operation, OperationContract, ResponseBody, ResponseShape,
    SubmitContact,
};
use crate::errors::{ApiError, ErrorBody};
use crate::path::{build_path, PathParams};
use navtakniq_model::InsertShape;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    /// 400 body, or a local pre-flight validation failure.
    Validation(ErrorBody),
    NotFound(ErrorBody),
    Internal(ErrorBody),
    /// Status code the operation never declared.
    Unclassified { status: u16, body: String },
    /// No response was received.
    Transport(String),
    /// Declared status, but the body did not match its shape.
    Decode { status: u16, reason: String },
}

impl ClientError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::Internal(_) => Some(500),
            Self::Unclassified { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(body) => match &body.field {
                Some(field) => write!(f, "validation failed on {field}: {}", body.message),
                None => write!(f, "validation failed: {}", body.message),
            },
            Self::NotFound(body) => write!(f, "not found: {}", body.message),
            Self::Internal(body) => write!(f, "server error: {}", body.message),
            Self::Unclassified { status, .. } => write!(f, "unexpected status {status}"),
            Self::Transport(reason) => write!(f, "request failed: {reason}"),
            Self::Decode { status, reason } => {
                write!(f, "undecodable {status} response: {reason}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Typed caller for the registry operations.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    #[must_use]
    pub fn url_for(&self, contract: &OperationContract, params: &PathParams) -> String {
        format!("{}{}", self.base_url, build_path(contract.path, params))
    }

    /// Sends one request and classifies the reply through the contract.
    ///
    /// Declared error shapes come back as `Err`; everything else declared is
    /// returned as parsed. No retries.
    pub async fn perform(
        &self,
        contract: &OperationContract,
        params: &PathParams,
        body: Option<&Value>,
    ) -> Result<ResponseBody, ClientError> {
        self.send(contract, params, body)
            .await
            .map(|(_, parsed)| parsed)
    }

    async fn send(
        &self,
        contract: &OperationContract,
        params: &PathParams,
        body: Option<&Value>,
    ) -> Result<(u16, ResponseBody), ClientError> {
        let url = self.url_for(contract, params);
        let mut request = match contract.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        debug!(
            operation = contract.id.as_str(),
            status, "contract response received"
        );

        let Some(shape) = contract.response_shape(status) else {
            return Err(ClientError::Unclassified { status, body: raw });
        };
        let value: Value = serde_json::from_str(&raw).map_err(|e| ClientError::Decode {
            status,
            reason: e.to_string(),
        })?;
        match shape.parse(&value) {
            Ok(ResponseBody::Error(err)) => Err(match shape {
                ResponseShape::ValidationError => ClientError::Validation(err),
                ResponseShape::NotFound => ClientError::NotFound(err),
                _ => ClientError::Internal(err),
            }),
            Ok(parsed) => Ok((status, parsed)),
            Err(issue) => Err(ClientError::Decode {
                status,
                reason: issue.message,
            }),
        }
    }

    pub async fn submit_contact(
        &self,
        input: &<SubmitContact as Operation>::Input,
    ) -> Result<<SubmitContact as Operation>::Output, ClientError> {
        input
            .check()
            .map_err(|issues| ClientError::Validation(ApiError::first_issue(&issues).body()))?;
        let payload = serde_json::to_value(input).map_err(|e| ClientError::Decode {
            status: 0,
            reason: e.to_string(),
        })?;
        match self
            .send(SubmitContact::CONTRACT, &PathParams::new(), Some(&payload))
            .await?
        {
            (_, ResponseBody::ContactMessage(message)) => Ok(message),
            (status, other) => Err(unexpected(status, &other)),
        }
    }

    pub async fn list_posts(&self) -> Result<<ListPosts as Operation>::Output, ClientError> {
        match self
            .send(ListPosts::CONTRACT, &PathParams::new(), None)
            .await?
        {
            (_, ResponseBody::BlogPostList(posts)) => Ok(posts),
            (status, other) => Err(unexpected(status, &other)),
        }
    }

    pub async fn get_post(&self, slug: &str) -> Result<<GetPost as Operation>::Output, ClientError> {
        let params = PathParams::new().with("slug", slug);
        match self.send(GetPost::CONTRACT, &params, None).await? {
            (_, ResponseBody::BlogPost(post)) => Ok(post),
            (status, other) => Err(unexpected(status, &other)),
        }
    }
}

fn unexpected(status: u16, body: &ResponseBody) -> ClientError {
    let kind = match body {
        ResponseBody::ContactMessage(_) => "ContactMessage",
        ResponseBody::BlogPost(_) => "BlogPost",
        ResponseBody::BlogPostList(_) => "BlogPost[]",
        ResponseBody::Error(_) => "error body",
    };
    ClientError::Decode {
        status,
        reason: format!("unexpected {kind} for operation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GET_POST;

    #[test]
    fn url_for_joins_base_and_built_path() {
        let client = ApiClient::new("http://localhost:5000/");
        let params = PathParams::new().with("slug", "abc");
        assert_eq!(
            client.url_for(&GET_POST, &params),
            "http://localhost:5000/api/posts/abc"
        );
    }

    #[test]
    fn unexpected_body_keeps_the_response_status() {
        let err = unexpected(201, &ResponseBody::BlogPostList(Vec::new()));
        assert_eq!(err.status(), Some(201));
        assert!(err.to_string().contains("BlogPost[]"), "{err}");
    }

    #[test]
    fn status_reflects_error_class() {
        assert_eq!(ClientError::Transport("down".into()).status(), None);
        assert_eq!(
            ClientError::NotFound(ErrorBody {
                message: "Post not found".into(),
                field: None
            })
            .status(),
            Some(404)
        );
    }
}
