//! Article service
//!
//! Validation and logging around an `ArticleRepository`. Each public
//! operation emits:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use std::time::Instant;

use crate::errors::{BoardError, ExError, Result};
use crate::model::{validate_title, Article, ArticlePage, ArticleQuery};
use crate::repo::ArticleRepository;
use crate::{log_op_end, log_op_error, log_op_start};

pub struct ArticleService {
    repo: Box<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repo: Box<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// Create an article and return its id
    ///
    /// # Errors
    ///
    /// `InvalidTitle` for blank titles, or any storage failure.
    pub fn write(&mut self, title: &str, body: &str) -> Result<i64> {
        log_op_start!("article_write");
        let start = Instant::now();

        let result = validate_title(title)
            .map_err(ExError::from)
            .and_then(|()| self.repo.write(title.trim(), body.trim()))
            .map_err(|e| {
                log_op_error!(
                    "article_write",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "article_write",
            duration_ms = start.elapsed().as_millis() as u64,
            article_id = result
        );

        Ok(result)
    }

    /// Fetch one article
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown.
    pub fn detail(&self, id: i64) -> Result<Article> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| BoardError::ArticleNotFound { article_id: id }.into())
    }

    /// One page of articles plus totals
    ///
    /// # Errors
    ///
    /// Any storage failure.
    pub fn list(&self, query: &ArticleQuery) -> Result<ArticlePage> {
        let total = self.repo.count(query.keyword.as_deref())?;
        let articles = self.repo.list(query)?;
        Ok(ArticlePage::new(articles, query, total))
    }

    /// Replace title and body of an existing article
    ///
    /// # Errors
    ///
    /// `InvalidTitle` for blank titles, `NotFound` when the id is unknown.
    pub fn modify(&mut self, id: i64, title: &str, body: &str) -> Result<Article> {
        log_op_start!("article_modify", article_id = id);
        let start = Instant::now();

        let result = self.modify_impl(id, title, body).map_err(|e| {
            log_op_error!(
                "article_modify",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                article_id = id
            );
            e
        })?;

        log_op_end!(
            "article_modify",
            duration_ms = start.elapsed().as_millis() as u64,
            article_id = id
        );

        Ok(result)
    }

    fn modify_impl(&mut self, id: i64, title: &str, body: &str) -> Result<Article> {
        validate_title(title)?;
        if !self.repo.modify(id, title.trim(), body.trim())? {
            return Err(BoardError::ArticleNotFound { article_id: id }.into());
        }
        self.detail(id)
    }

    /// Delete an article
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        log_op_start!("article_delete", article_id = id);
        let start = Instant::now();

        let deleted = self.repo.delete(id).and_then(|deleted| {
            if deleted {
                Ok(())
            } else {
                Err(BoardError::ArticleNotFound { article_id: id }.into())
            }
        });

        match deleted {
            Ok(()) => {
                log_op_end!(
                    "article_delete",
                    duration_ms = start.elapsed().as_millis() as u64,
                    article_id = id
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "article_delete",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    article_id = id
                );
                Err(e)
            }
        }
    }
}
