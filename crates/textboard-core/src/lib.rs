//! Text board core
//!
//! Domain layer shared by every storage backend:
//! - `Article` model with paging/search queries
//! - `CommandRequest` parser for `path?key=value` input lines
//! - `ArticleRepository` seam with an in-memory implementation
//! - `ArticleService` adding validation and operation logging
//! - Structured error and logging facilities

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod repo;
pub mod request;
pub mod service;

pub use textboard_core_types::schema;

// Re-export commonly used types
pub use errors::{BoardError, ExError, ExErrorKind, Result};
pub use model::{Article, ArticlePage, ArticleQuery};
pub use repo::{ArticleRepository, MemoryArticleRepository};
pub use request::CommandRequest;
pub use service::ArticleService;
