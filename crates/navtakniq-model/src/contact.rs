// SPDX-License-Identifier: Apache-2.0

use crate::schema::{FieldRule, InsertShape};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// Contact form payload as submitted by a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company,
            message: message.into(),
        }
    }
}

impl InsertShape for NewContactMessage {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::required("name"),
        FieldRule::required("email"),
        FieldRule::optional("company"),
        FieldRule::required("message"),
    ];
    const SYSTEM_FIELDS: &'static [&'static str] = &["id", "createdAt"];
}

/// Persisted inquiry. Never updated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewContactMessage,
    pub created_at: Timestamp,
}
