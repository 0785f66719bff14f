//! HTTP surface for the article repository.
//!
//! This module exposes a compact Axum router:
//!
//! - `GET /articles` – One page of articles in insertion order. Optional `limit` (default 3)
//!   and `offset` (default 0) query parameters; unparsable values fall back to the defaults.
//! - `POST /articles` – Store an article. Requires `content-type: application/json`; the
//!   server assigns `id` and `creation`. Responds with an empty body and a `location` header.
//! - `GET /articles/search?q=term` – First article whose title, subtitle, or content equals
//!   `term` exactly.
//! - `GET /articles/{id}` – Single article by identifier.
//!
//! Any other method on `/articles` answers `405 Method Not Allowed`.

use crate::articles::{ArticleApi, NewArticle, PageRequest};
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Media type required on `POST /articles` bodies.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Build the HTTP router exposing the article API surface.
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: ArticleApi + 'static,
{
    Router::new()
        .route(
            "/articles",
            get(list_articles::<S>)
                .post(add_article::<S>)
                .fallback(method_not_allowed),
        )
        .route("/articles/search", get(search_articles::<S>))
        .route("/articles/:id", get(get_article::<S>))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Raw query-string pairs in request order, repeated keys included.
type QueryPairs = Vec<(String, String)>;

/// First value given for `key`; later repetitions are ignored.
fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

async fn list_articles<S>(
    State(store): State<Arc<S>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response, ApiError>
where
    S: ArticleApi,
{
    let page = PageRequest::from_query(
        first_param(&pairs, "limit"),
        first_param(&pairs, "offset"),
    );
    let articles = store.list(page).await;
    tracing::debug!(
        limit = page.limit,
        offset = page.offset,
        returned = articles.len(),
        "Listed articles"
    );
    json_response(&articles)
}

/// Store a new article.
///
/// The body is read before the content type is checked, so a broken upload surfaces as a
/// read failure even when the header is also wrong.
async fn add_article<S>(
    State(store): State<Arc<S>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError>
where
    S: ArticleApi,
{
    let body = body.map_err(|rejection| ApiError::BodyRead(rejection.body_text()))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if content_type != JSON_CONTENT_TYPE {
        return Err(ApiError::UnsupportedMediaType(content_type.to_string()));
    }

    let article: NewArticle = serde_json::from_slice(&body).map_err(ApiError::InvalidPayload)?;
    let stored = store.add(article).await;
    tracing::info!(id = %stored.id, title = %stored.title, "Article created");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/articles/{}", stored.id))],
    )
        .into_response())
}

async fn get_article<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    S: ArticleApi,
{
    let article = store.get(&id).await.ok_or(ApiError::NotFound)?;
    json_response(&article)
}

async fn search_articles<S>(
    State(store): State<Arc<S>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response, ApiError>
where
    S: ArticleApi,
{
    let term = first_param(&pairs, "q").unwrap_or_default();
    let article = store.search(term).await.ok_or_else(|| {
        tracing::debug!(term, "No article matched search term");
        ApiError::NotFound
    })?;
    json_response(&article)
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

fn json_response<T>(value: &T) -> Result<Response, ApiError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value).map_err(ApiError::Serialization)?;
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
}

/// Failures surfaced by the article handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read.
    #[error("{0}")]
    BodyRead(String),
    /// `POST /articles` was sent with a media type other than `application/json`.
    #[error("need content-type 'application/json', have '{0}'")]
    UnsupportedMediaType(String),
    /// The body was not an article-shaped JSON object.
    #[error("{0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// No article matched the identifier or search term, or the path was malformed.
    #[error("not found")]
    NotFound,
    /// The response payload could not be encoded.
    #[error("{0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BodyRead(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        match self {
            Self::NotFound => status.into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}
