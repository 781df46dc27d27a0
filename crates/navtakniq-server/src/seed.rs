// SPDX-License-Identifier: Apache-2.0

use navtakniq_model::NewBlogPost;
use navtakniq_store::{ContentStore, StoreError, StoreErrorCode};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub content: &'static str,
    pub cover_image: &'static str,
}

impl SeedPost {
    #[must_use]
    pub fn to_insert(&self) -> NewBlogPost {
        NewBlogPost {
            slug: self.slug.to_string(),
            title: self.title.to_string(),
            summary: self.summary.to_string(),
            content: self.content.to_string(),
            cover_image: self.cover_image.to_string(),
        }
    }
}

/// Inserted in this order, so the last entry lists first.
pub const SEED_POSTS: [SeedPost; 3] = [
    SeedPost {
        slug: "importance-of-data-governance-in-ai",
        title: "The Importance of Data Governance in AI",
        summary: "Why robust data governance is critical for successful AI implementation.",
        content: "# The Importance of Data Governance in AI

Artificial Intelligence is only as good as the data it is trained on. In today's data-driven world, organizations are rushing to implement AI solutions, but many overlook the foundational element: **Data Governance**.

## Why It Matters

Without proper governance, AI models can become biased, inaccurate, or even dangerous. Data governance ensures that data is:
- **Accurate**: Free from errors and inconsistencies.
- **Secure**: Protected from unauthorized access.
- **Compliant**: Adhering to regulations like GDPR and CCPA.

## Key Pillars

1. **Data Quality**: Ensuring data is fit for purpose.
2. **Data Stewardship**: Assigning accountability for data assets.
3. **Data Security**: Protecting data integrity and privacy.

At **Navtakniq**, we help you build a robust data governance framework that empowers your AI initiatives.
",
        cover_image: "https://images.unsplash.com/photo-1518186285589-2f7649de83e0?auto=format&fit=crop&q=80&w=1000",
    },
    SeedPost {
        slug: "master-data-management-foundation",
        title: "Master Data Management: The Foundation",
        summary: "How MDM serves as the backbone of your digital transformation journey.",
        content: "# Master Data Management: The Foundation

Master Data Management (MDM) is the process of defining and managing the critical data of an organization to provide a single point of reference.

## The Single Source of Truth

In a complex enterprise, data is often siloed across different departments. Sales has one view of the customer, marketing has another, and support has a third. MDM consolidates these views into a **Golden Record**.

## Benefits of MDM

- **Improved Decision Making**: Reliable data leads to better insights.
- **Operational Efficiency**: Streamlined processes and reduced errors.
- **Regulatory Compliance**: Easier reporting and auditing.

Don't let data silos hold you back. Let **Navtakniq** guide your MDM strategy.
",
        cover_image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?auto=format&fit=crop&q=80&w=1000",
    },
    SeedPost {
        slug: "navigating-data-quality-challenges",
        title: "Navigating Data Quality Challenges",
        summary: "Strategies for identifying and resolving data quality issues in your organization.",
        content: "# Navigating Data Quality Challenges

Bad data costs organizations millions of dollars every year. From lost revenue to damaged reputation, the impact of poor data quality is far-reaching.

## Common Data Quality Issues

- **Incompleteness**: Missing values in critical fields.
- **Inconsistency**: Different formats for the same data (e.g., date formats).
- **Duplication**: Multiple records for the same entity.

## Our Approach

We use advanced tools and methodologies to profile, cleanse, and monitor your data. Our goal is to ensure your data is a strategic asset, not a liability.

Contact **Navtakniq** today to start your data quality journey.
",
        cover_image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&q=80&w=1000",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Number of posts inserted by this call.
    Seeded(usize),
    /// Number of posts found already present; nothing was inserted.
    AlreadySeeded(usize),
}

/// Inserts [`SEED_POSTS`] iff the post collection is empty. The check and the
/// inserts are not atomic; a slug conflict from a concurrent seeder is treated
/// as already seeded.
pub async fn seed_database(store: &dyn ContentStore) -> Result<SeedOutcome, StoreError> {
    let existing = store.list_blog_posts().await?;
    if !existing.is_empty() {
        debug!(count = existing.len(), "blog posts present; skipping seed");
        return Ok(SeedOutcome::AlreadySeeded(existing.len()));
    }
    info!("seeding blog posts");
    let mut inserted = 0;
    for post in &SEED_POSTS {
        match store.create_blog_post(post.to_insert()).await {
            Ok(_) => inserted += 1,
            Err(err) if err.code == StoreErrorCode::Conflict => {
                warn!(slug = post.slug, "seed post already present");
            }
            Err(err) => return Err(err),
        }
    }
    if inserted == 0 {
        return Ok(SeedOutcome::AlreadySeeded(SEED_POSTS.len()));
    }
    info!(count = inserted, "seeding complete");
    Ok(SeedOutcome::Seeded(inserted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use navtakniq_model::{BlogPost, ContactMessage, InsertShape, NewContactMessage};
    use navtakniq_store::FakeStore;
    use std::collections::HashSet;

    #[test]
    fn seed_posts_are_valid_and_distinct() {
        let slugs: HashSet<_> = SEED_POSTS.iter().map(|p| p.slug).collect();
        assert_eq!(slugs.len(), SEED_POSTS.len());
        for post in &SEED_POSTS {
            let value = serde_json::to_value(post.to_insert()).expect("json");
            NewBlogPost::validate(&value).expect("seed post satisfies insert shape");
            assert!(post.content.starts_with("# "));
        }
    }

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let store = FakeStore::default();
        assert_eq!(
            seed_database(&store).await.expect("first"),
            SeedOutcome::Seeded(3)
        );
        assert_eq!(
            seed_database(&store).await.expect("second"),
            SeedOutcome::AlreadySeeded(3)
        );
        assert_eq!(store.list_blog_posts().await.expect("list").len(), 3);
    }

    /// Lists nothing, but every slug is already taken: another instance seeded
    /// between the emptiness check and the inserts.
    struct RacedStore(FakeStore);

    #[async_trait]
    impl ContentStore for RacedStore {
        fn backend_tag(&self) -> &'static str {
            "raced"
        }

        async fn create_contact_message(
            &self,
            message: NewContactMessage,
        ) -> Result<ContactMessage, StoreError> {
            self.0.create_contact_message(message).await
        }

        async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
            Ok(Vec::new())
        }

        async fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
            self.0.blog_post_by_slug(slug).await
        }

        async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost, StoreError> {
            self.0.create_blog_post(post).await
        }
    }

    #[tokio::test]
    async fn concurrent_seed_conflict_is_not_an_error() {
        let raced = RacedStore(FakeStore::default());
        for post in &SEED_POSTS {
            raced.0.create_blog_post(post.to_insert()).await.expect("insert");
        }
        assert_eq!(
            seed_database(&raced).await.expect("seed"),
            SeedOutcome::AlreadySeeded(3)
        );
        assert_eq!(raced.0.list_blog_posts().await.expect("list").len(), 3);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let store = FakeStore::failing();
        assert!(seed_database(&store).await.is_err());
    }
}
