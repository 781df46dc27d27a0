// SPDX-License-Identifier: Apache-2.0

use crate::{ContentStore, StoreError, StoreErrorCode};
use async_trait::async_trait;
use chrono::Utc;
use navtakniq_model::{BlogPost, ContactMessage, NewBlogPost, NewContactMessage};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

/// In-memory store with the same ordering and uniqueness rules as sqlite,
/// plus switches for injecting backend failures.
pub struct FakeStore {
    pub contact_messages: Mutex<Vec<ContactMessage>>,
    pub blog_posts: Mutex<Vec<BlogPost>>,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub write_calls: AtomicU64,
    next_contact_id: AtomicU64,
    next_post_id: AtomicU64,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            contact_messages: Mutex::new(Vec::new()),
            blog_posts: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            write_calls: AtomicU64::new(0),
            next_contact_id: AtomicU64::new(1),
            next_post_id: AtomicU64::new(1),
        }
    }
}

impl FakeStore {
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_fail_writes(true);
        store.set_fail_reads(true);
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                "fake store: writes disabled",
            ));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                "fake store: reads disabled",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        self.check_write()?;
        let mut rows = self.contact_messages.lock().await;
        let stored = ContactMessage {
            id: self.next_contact_id.fetch_add(1, Ordering::Relaxed) as i64,
            fields: message,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.check_read()?;
        let mut posts = self.blog_posts.lock().await.clone();
        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        self.check_read()?;
        Ok(self
            .blog_posts
            .lock()
            .await
            .iter()
            .find(|post| post.slug() == slug)
            .cloned())
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost, StoreError> {
        self.check_write()?;
        let mut rows = self.blog_posts.lock().await;
        if rows.iter().any(|existing| existing.slug() == post.slug) {
            return Err(StoreError::new(
                StoreErrorCode::Conflict,
                format!("slug already exists: {}", post.slug),
            ));
        }
        let stored = BlogPost {
            id: self.next_post_id.fetch_add(1, Ordering::Relaxed) as i64,
            fields: post,
            published_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}
