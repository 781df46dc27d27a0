// SPDX-License-Identifier: Apache-2.0

use crate::{ContentStore, StoreError, StoreErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use navtakniq_model::{BlogPost, ContactMessage, NewBlogPost, NewContactMessage};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::info;

pub const DEFAULT_POOL_SIZE: usize = 4;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MEMORY_LOCATION: &str = ":memory:";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS contact_messages(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    company TEXT,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS blog_posts(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    summary TEXT NOT NULL,
    content TEXT NOT NULL,
    cover_image TEXT NOT NULL,
    published_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_blog_posts_published_at ON blog_posts(published_at);";

const POST_COLUMNS: &str = "id, slug, title, summary, content, cover_image, published_at";

/// Fixed set of connections; a permit is held for as long as a connection is
/// checked out, so `idle` is never empty when a permit was granted.
struct Pool {
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
    size: usize,
}

impl Pool {
    fn checkout(&self) -> Result<Connection, StoreError> {
        self.idle
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "connection pool poisoned"))?
            .pop()
            .ok_or_else(|| StoreError::new(StoreErrorCode::Unavailable, "no idle connection"))
    }

    fn checkin(&self, conn: Connection) {
        if let Ok(mut idle) = self.idle.lock() {
            idle.push(conn);
        }
    }
}

pub struct SqliteStore {
    pool: Arc<Pool>,
    location: String,
}

impl SqliteStore {
    /// Accepts a bare path, a `sqlite://` / `sqlite:` URL, or `:memory:`.
    pub fn connect(database_url: &str, pool_size: usize) -> Result<Self, StoreError> {
        let location = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url)
            .trim();
        if location.is_empty() {
            return Err(StoreError::new(
                StoreErrorCode::Io,
                "database location must not be empty",
            ));
        }
        if location == MEMORY_LOCATION {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(location), pool_size)
        }
    }

    pub fn open(path: &Path, pool_size: usize) -> Result<Self, StoreError> {
        let size = pool_size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open(path).map_err(|e| map_sqlite_error("open", e))?;
            conn.busy_timeout(BUSY_TIMEOUT)
                .map_err(|e| map_sqlite_error("open", e))?;
            conns.push(conn);
        }
        let first = &conns[0];
        first
            .execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| map_sqlite_error("migrate", e))?;
        first
            .execute_batch(SCHEMA_SQL)
            .map_err(|e| map_sqlite_error("migrate", e))?;
        let store = Self::from_connections(conns, path.display().to_string());
        info!(
            location = %store.location,
            pool_size = size,
            "sqlite store opened"
        );
        Ok(store)
    }

    /// Single-connection in-memory database; every connection to `:memory:`
    /// would otherwise see its own empty database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| map_sqlite_error("open", e))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| map_sqlite_error("migrate", e))?;
        Ok(Self::from_connections(
            vec![conn],
            MEMORY_LOCATION.to_string(),
        ))
    }

    fn from_connections(conns: Vec<Connection>, location: String) -> Self {
        let size = conns.len();
        Self {
            pool: Arc::new(Pool {
                idle: Mutex::new(conns),
                permits: Arc::new(Semaphore::new(size)),
                size,
            }),
            location,
        }
    }

    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.size
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    async fn with_conn<T, F>(&self, op: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let permit = Arc::clone(&self.pool.permits)
            .acquire_owned()
            .await
            .map_err(|_| StoreError::new(StoreErrorCode::Unavailable, "connection pool closed"))?;
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let conn = pool.checkout()?;
            let out = f(&conn);
            pool.checkin(conn);
            out.map_err(|e| map_sqlite_error(op, e))
        })
        .await
        .map_err(|e| {
            StoreError::new(
                StoreErrorCode::Internal,
                format!("{op}: blocking task failed: {e}"),
            )
        })?
    }
}

/// Fixed-width RFC 3339 so lexical order in sqlite equals time order.
fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn blog_post_from_row(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    let published_at: String = row.get(6)?;
    Ok(BlogPost {
        id: row.get(0)?,
        fields: NewBlogPost {
            slug: row.get(1)?,
            title: row.get(2)?,
            summary: row.get(3)?,
            content: row.get(4)?,
            cover_image: row.get(5)?,
        },
        published_at: decode_timestamp(6, &published_at)?,
    })
}

fn map_sqlite_error(op: &str, err: rusqlite::Error) -> StoreError {
    let code = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => StoreErrorCode::Conflict,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => StoreErrorCode::Unavailable,
            ErrorCode::CannotOpen
            | ErrorCode::SystemIoFailure
            | ErrorCode::ReadOnly
            | ErrorCode::DiskFull => StoreErrorCode::Io,
            _ => StoreErrorCode::Internal,
        },
        _ => StoreErrorCode::Internal,
    };
    StoreError::new(code, format!("{op}: {err}"))
}

#[async_trait]
impl ContentStore for SqliteStore {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        self.with_conn("create_contact_message", move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO contact_messages(name, email, company, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    message.name,
                    message.email,
                    message.company,
                    message.message,
                    encode_timestamp(&created_at)
                ],
            )?;
            Ok(ContactMessage {
                id: conn.last_insert_rowid(),
                fields: message,
                created_at,
            })
        })
        .await
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.with_conn("list_blog_posts", |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {POST_COLUMNS} FROM blog_posts ORDER BY published_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], blog_post_from_row)?;
            let posts = rows.collect::<rusqlite::Result<Vec<_>>>();
            posts
        })
        .await
    }

    async fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let slug = slug.to_string();
        self.with_conn("blog_post_by_slug", move |conn| {
            conn.query_row(
                &format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = ?1"),
                params![slug],
                blog_post_from_row,
            )
            .optional()
        })
        .await
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost, StoreError> {
        self.with_conn("create_blog_post", move |conn| {
            let published_at = Utc::now();
            conn.execute(
                "INSERT INTO blog_posts(slug, title, summary, content, cover_image, published_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    post.slug,
                    post.title,
                    post.summary,
                    post.content,
                    post.cover_image,
                    encode_timestamp(&published_at)
                ],
            )?;
            Ok(BlogPost {
                id: conn.last_insert_rowid(),
                fields: post,
                published_at,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_timestamps_sort_lexically() {
        let a = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("a")
            .with_timezone(&Utc);
        let b = DateTime::parse_from_rfc3339("2026-01-01T00:00:00.5Z")
            .expect("b")
            .with_timezone(&Utc);
        let (ea, eb) = (encode_timestamp(&a), encode_timestamp(&b));
        assert_eq!(ea.len(), eb.len());
        assert!(ea < eb);
        assert_eq!(decode_timestamp(0, &eb).expect("decode"), b);
    }

    #[test]
    fn connect_accepts_url_prefixes_and_memory() {
        let store = SqliteStore::connect("sqlite::memory:", 8).expect("memory store");
        assert_eq!(store.location(), ":memory:");
        assert_eq!(store.pool_size(), 1);
        assert!(SqliteStore::connect("sqlite://", 1).is_err());
    }

    #[test]
    fn constraint_violation_maps_to_conflict() {
        let conn = Connection::open_in_memory().expect("open");
        conn.execute_batch(SCHEMA_SQL).expect("schema");
        let insert = "INSERT INTO blog_posts(slug, title, summary, content, cover_image, published_at) VALUES ('a','t','s','c','i','x')";
        conn.execute(insert, []).expect("first insert");
        let err = conn.execute(insert, []).expect_err("duplicate slug");
        assert_eq!(
            map_sqlite_error("create_blog_post", err).code,
            StoreErrorCode::Conflict
        );
    }
}
