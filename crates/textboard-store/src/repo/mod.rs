//! Repository layer persisting articles to SQLite

pub mod article_repo;

pub use article_repo::SqliteArticleRepository;
