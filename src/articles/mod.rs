//! Article data model and the in-memory store behind the HTTP surface.

mod store;
pub mod types;

pub use store::{ArticleApi, ArticleStore};
pub use types::{Article, DEFAULT_PAGE_LIMIT, NewArticle, PageRequest};
