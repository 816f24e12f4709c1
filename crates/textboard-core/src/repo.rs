//! Article repository seam
//!
//! The service talks to storage only through `ArticleRepository`. This crate
//! ships the in-memory implementation; `textboard-store` provides SQLite.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{Article, ArticleQuery};

/// Storage operations the board needs for articles
pub trait ArticleRepository {
    /// Store a new article and return its generated id
    fn write(&mut self, title: &str, body: &str) -> Result<i64>;

    fn find_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// One page of articles, newest first, filtered by the query keyword
    fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>>;

    /// Number of articles matching the keyword (all articles when `None`)
    fn count(&self, keyword: Option<&str>) -> Result<i64>;

    /// Replace title and body; `false` when no such article exists
    fn modify(&mut self, id: i64, title: &str, body: &str) -> Result<bool>;

    /// Remove an article; `false` when no such article exists
    fn delete(&mut self, id: i64) -> Result<bool>;
}

/// In-memory repository
///
/// Not thread-safe; ids come from a counter that is never reused, even after
/// deletes.
#[derive(Debug, Clone, Default)]
pub struct MemoryArticleRepository {
    articles: BTreeMap<i64, Article>,
    last_id: i64,
}

impl MemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    fn matching<'a>(&'a self, keyword: Option<&'a str>) -> impl Iterator<Item = &'a Article> {
        self.articles
            .values()
            .rev()
            .filter(move |a| keyword.is_none_or(|k| a.matches_keyword(k)))
    }
}

impl ArticleRepository for MemoryArticleRepository {
    fn write(&mut self, title: &str, body: &str) -> Result<i64> {
        self.last_id += 1;
        let id = self.last_id;
        self.articles
            .insert(id, Article::new(id, title.to_string(), body.to_string()));
        Ok(id)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        Ok(self.articles.get(&id).cloned())
    }

    fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        Ok(self
            .matching(query.keyword.as_deref())
            .skip(skip)
            .take(query.page_size as usize)
            .cloned()
            .collect())
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64> {
        Ok(self.matching(keyword).count() as i64)
    }

    fn modify(&mut self, id: i64, title: &str, body: &str) -> Result<bool> {
        match self.articles.get_mut(&id) {
            Some(article) => {
                article.revise(title.to_string(), body.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        Ok(self.articles.remove(&id).is_some())
    }
}
