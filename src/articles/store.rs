//! Mutex-guarded in-memory article store.

use crate::articles::types::{Article, NewArticle, PageRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Abstraction over article storage used by the HTTP surface.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Store a new article, assigning its identifier and creation time.
    async fn add(&self, article: NewArticle) -> Article;

    /// Return one page of articles in insertion order.
    async fn list(&self, page: PageRequest) -> Vec<Article>;

    /// Look up an article by identifier.
    async fn get(&self, id: &str) -> Option<Article>;

    /// Return the first article whose title, subtitle, or content equals `term`.
    async fn search(&self, term: &str) -> Option<Article>;
}

/// In-memory article repository.
///
/// A single lock serializes every read and write. Identifiers come from a counter advanced
/// under that same lock, so they are never reused and an insert never overwrites an
/// existing article. Construct one per process (or per test) and share it through an `Arc`.
#[derive(Default)]
pub struct ArticleStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    articles: BTreeMap<u64, Article>,
}

impl ArticleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored articles.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.articles.len()
    }

    /// Whether the store holds no articles.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ArticleApi for ArticleStore {
    async fn add(&self, article: NewArticle) -> Article {
        let NewArticle {
            title,
            subtitle,
            content,
        } = article;
        let mut inner = self.inner.lock().await;
        let key = inner.next_id;
        inner.next_id += 1;
        let stored = Article {
            id: key.to_string(),
            title,
            subtitle,
            content,
            creation: OffsetDateTime::now_utc().to_string(),
        };
        inner.articles.insert(key, stored.clone());
        tracing::debug!(id = %stored.id, total = inner.articles.len(), "Stored article");
        stored
    }

    async fn list(&self, page: PageRequest) -> Vec<Article> {
        let inner = self.inner.lock().await;
        inner
            .articles
            .values()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect()
    }

    async fn get(&self, id: &str) -> Option<Article> {
        // Only canonical decimal strings were ever issued, so "007" or "+7" cannot match.
        let key: u64 = id.parse().ok()?;
        if key.to_string() != id {
            return None;
        }
        self.inner.lock().await.articles.get(&key).cloned()
    }

    async fn search(&self, term: &str) -> Option<Article> {
        let inner = self.inner.lock().await;
        inner
            .articles
            .values()
            .find(|article| article.matches(term))
            .cloned()
    }
}
