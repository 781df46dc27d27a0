#![forbid(unsafe_code)]
//! Navtakniq model SSOT.
//!
//! Every persisted entity embeds its insert shape, so the fields a caller may
//! supply are a strict subset of the stored record by construction:
//!
//! ```compile_fail
//! use navtakniq_model::NewContactMessage;
//!
//! let forged = NewContactMessage {
//!     id: 7,
//!     name: "Ada".to_string(),
//!     email: "ada@example.com".to_string(),
//!     company: None,
//!     message: "hello".to_string(),
//! };
//! ```

mod contact;
mod post;
mod schema;

pub use contact::{ContactMessage, NewContactMessage};
pub use post::{validate_slug, BlogPost, NewBlogPost};
pub use schema::{json_kind, FieldRule, InsertShape, ValidationIssue};

pub const CRATE_NAME: &str = "navtakniq-model";

/// Server-assigned instant, serialized as RFC 3339 UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
