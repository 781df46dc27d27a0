// SPDX-License-Identifier: Apache-2.0

use crate::schema::{FieldRule, InsertShape, ValidationIssue};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Opaque markup; never interpreted server-side.
    pub content: String,
    pub cover_image: String,
}

impl InsertShape for NewBlogPost {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::required("slug"),
        FieldRule::required("title"),
        FieldRule::required("summary"),
        FieldRule::required("content"),
        FieldRule::required("coverImage"),
    ];
    const SYSTEM_FIELDS: &'static [&'static str] = &["id", "publishedAt"];

    /// Stored slugs must stay addressable as a single `/api/posts/:slug` segment.
    fn refine(&self) -> Result<(), Vec<ValidationIssue>> {
        validate_slug(&self.slug).map(|_| ()).map_err(|issue| vec![issue])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewBlogPost,
    pub published_at: Timestamp,
}

impl BlogPost {
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.fields.slug
    }
}

/// Slug rule for new posts: non-empty, no surrounding whitespace, no `/`.
pub fn validate_slug(raw: &str) -> Result<&str, ValidationIssue> {
    if raw.is_empty() {
        return Err(ValidationIssue::at("slug", "slug must not be empty"));
    }
    if raw.trim() != raw {
        return Err(ValidationIssue::at(
            "slug",
            "slug must not have surrounding whitespace",
        ));
    }
    if raw.contains('/') {
        return Err(ValidationIssue::at("slug", "slug must not contain '/'"));
    }
    Ok(raw)
}
