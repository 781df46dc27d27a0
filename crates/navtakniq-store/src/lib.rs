#![forbid(unsafe_code)]

use async_trait::async_trait;
use navtakniq_model::{BlogPost, ContactMessage, NewBlogPost, NewContactMessage};
use std::fmt::{Display, Formatter};

mod fake;
mod sqlite;

pub use fake::FakeStore;
pub use sqlite::{SqliteStore, DEFAULT_POOL_SIZE};

pub const CRATE_NAME: &str = "navtakniq-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    /// Unique key already taken (blog post slug).
    Conflict,
    Unavailable,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
            Self::Io => "io_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Persistence port. Implementations assign ids and timestamps at insert.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StoreError>;

    /// All posts, most recently published first; equal timestamps fall back to
    /// the newer id.
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, StoreError>;

    async fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError>;

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost, StoreError>;
}
