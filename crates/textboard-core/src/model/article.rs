use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BoardError;

/// Default number of articles shown per list page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Article - one post on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Sequential identifier, starting at 1
    pub id: i64,

    /// When the article was written
    pub reg_date: DateTime<Utc>,

    /// When the article was last modified (equals `reg_date` until then)
    pub update_date: DateTime<Utc>,

    pub title: String,

    pub body: String,
}

impl Article {
    /// Create a new Article stamped with the current time
    pub fn new(id: i64, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            reg_date: now,
            update_date: now,
            title,
            body,
        }
    }

    /// Replace title and body and bump `update_date`
    pub fn revise(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.update_date = Utc::now();
    }

    /// True when the keyword occurs in the title or the body
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.title.contains(keyword) || self.body.contains(keyword)
    }
}

/// Paging and search options for listing articles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub keyword: Option<String>,
}

impl ArticleQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            keyword: None,
        }
    }

    /// Restrict the listing to articles containing `keyword`; blank keywords are ignored
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = if keyword.trim().is_empty() {
            None
        } else {
            Some(keyword)
        };
        self
    }

    /// Number of rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a listing together with paging totals
#[derive(Debug, Clone, PartialEq)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub page: u32,
    pub total_count: i64,
    pub last_page: u32,
}

impl ArticlePage {
    pub fn new(articles: Vec<Article>, query: &ArticleQuery, total_count: i64) -> Self {
        let page_size = i64::from(query.page_size);
        let last_page = ((total_count + page_size - 1) / page_size).max(1);
        Self {
            articles,
            page: query.page,
            total_count,
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
        }
    }
}

/// Reject empty or whitespace-only titles
///
/// # Errors
///
/// Returns `InvalidTitle` when the trimmed title is empty.
pub fn validate_title(title: &str) -> Result<(), BoardError> {
    if title.trim().is_empty() {
        return Err(BoardError::InvalidTitle {
            reason: "Title cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article() {
        let article = Article::new(1, "Hello".to_string(), "World".to_string());

        assert_eq!(article.id, 1);
        assert_eq!(article.title, "Hello");
        assert_eq!(article.reg_date, article.update_date);
    }

    #[test]
    fn test_revise_bumps_update_date() {
        let mut article = Article::new(1, "a".to_string(), "b".to_string());
        let reg_date = article.reg_date;

        article.revise("c".to_string(), "d".to_string());

        assert_eq!(article.title, "c");
        assert_eq!(article.body, "d");
        assert_eq!(article.reg_date, reg_date);
        assert!(article.update_date >= reg_date);
    }

    #[test]
    fn test_keyword_matches_title_or_body() {
        let article = Article::new(1, "rust board".to_string(), "hello".to_string());
        assert!(article.matches_keyword("board"));
        assert!(article.matches_keyword("ell"));
        assert!(!article.matches_keyword("kotlin"));
    }

    #[test]
    fn test_query_offset_and_clamping() {
        assert_eq!(ArticleQuery::new(1, 10).offset(), 0);
        assert_eq!(ArticleQuery::new(3, 10).offset(), 20);
        assert_eq!(ArticleQuery::new(0, 0).page, 1);
        assert_eq!(ArticleQuery::new(0, 0).page_size, 1);
    }

    #[test]
    fn test_blank_keyword_is_ignored() {
        let query = ArticleQuery::default().with_keyword("   ");
        assert_eq!(query.keyword, None);
    }

    #[test]
    fn test_page_last_page() {
        let query = ArticleQuery::new(1, 10);
        assert_eq!(ArticlePage::new(vec![], &query, 0).last_page, 1);
        assert_eq!(ArticlePage::new(vec![], &query, 10).last_page, 1);
        assert_eq!(ArticlePage::new(vec![], &query, 11).last_page, 2);
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("ok").is_ok());
        assert!(matches!(
            validate_title("  \t"),
            Err(BoardError::InvalidTitle { .. })
        ));
    }
}
