pub mod article;

pub use article::{validate_title, Article, ArticlePage, ArticleQuery};
