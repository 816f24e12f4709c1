//! SQLite article repository
//!
//! Every statement is built with `SecSql`; user text only ever reaches
//! SQLite as a bound value.

#![allow(clippy::result_large_err)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use textboard_core::model::{Article, ArticleQuery};
use textboard_core::repo::ArticleRepository;

use crate::db::ConnectionPool;
use crate::errors::Result;
use crate::sec_sql::SecSql;
use crate::sql_args;

const ARTICLE_COLUMNS: &str = "SELECT id, reg_date, update_date, title, body FROM article";

/// Article storage backed by a connection pool
pub struct SqliteArticleRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteArticleRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn keyword_filter(sql: SecSql, keyword: Option<&str>) -> SecSql {
        match keyword {
            Some(keyword) => sql.append(
                "WHERE (instr(title, ?) > 0 OR instr(body, ?) > 0)",
                sql_args![keyword, keyword],
            ),
            None => sql,
        }
    }
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    let reg_date: String = row.get(1)?;
    let update_date: String = row.get(2)?;

    Ok(Article {
        id: row.get(0)?,
        reg_date: parse_timestamp(1, &reg_date)?,
        update_date: parse_timestamp(2, &update_date)?,
        title: row.get(3)?,
        body: row.get(4)?,
    })
}

impl ArticleRepository for SqliteArticleRepository {
    fn write(&mut self, title: &str, body: &str) -> Result<i64> {
        let conn = self.pool.get()?;
        let now = Utc::now().to_rfc3339();

        let id = SecSql::create("INSERT INTO article (reg_date, update_date, title, body)")
            .append("VALUES (?, ?, ?, ?)", sql_args![&now, &now, title, body])
            .bind(&conn)?
            .execute_insert()?;

        tracing::debug!(article_id = id, "inserted article");
        Ok(id)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        let conn = self.pool.get()?;

        let article = SecSql::create(ARTICLE_COLUMNS)
            .append("WHERE id = ?", [id])
            .bind(&conn)?
            .query_row_optional(article_from_row)?;
        Ok(article)
    }

    fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let conn = self.pool.get()?;
        let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);

        let articles =
            Self::keyword_filter(SecSql::create(ARTICLE_COLUMNS), query.keyword.as_deref())
                .append_sql("ORDER BY id DESC")
                .append("LIMIT ? OFFSET ?", sql_args![query.page_size, offset])
                .bind(&conn)?
                .query_map(article_from_row)?;
        Ok(articles)
    }

    fn count(&self, keyword: Option<&str>) -> Result<i64> {
        let conn = self.pool.get()?;

        let count = Self::keyword_filter(SecSql::create("SELECT COUNT(*) FROM article"), keyword)
            .bind(&conn)?
            .query_scalar_i64()?;
        Ok(count)
    }

    fn modify(&mut self, id: i64, title: &str, body: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        let now = Utc::now().to_rfc3339();

        let affected = SecSql::create("UPDATE article")
            .append(
                "SET update_date = ?, title = ?, body = ?",
                sql_args![now, title, body],
            )
            .append("WHERE id = ?", [id])
            .bind(&conn)?
            .execute_update()?;

        Ok(affected > 0)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let conn = self.pool.get()?;

        let affected = SecSql::create("DELETE FROM article")
            .append("WHERE id = ?", [id])
            .bind(&conn)?
            .execute_update()?;

        Ok(affected > 0)
    }
}
