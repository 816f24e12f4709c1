//! Application wiring
//!
//! `AppContext` is built once at start-up and owns every controller; there
//! is no process-wide registry.

use std::sync::Arc;

use textboard_core::errors::{BoardError, Result};
use textboard_core::{ArticleRepository, ArticleService, CommandRequest, MemoryArticleRepository};
use textboard_store::{ConnectionPool, SqliteArticleRepository};

use crate::config::{BoardConfig, StorageKind};
use crate::console::Console;
use crate::controller::{system, ArticleController};
use crate::router::{self, Action};

/// Whether the REPL keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct AppContext {
    articles: ArticleController,
}

impl AppContext {
    /// Build the repository selected by `config` and everything above it
    ///
    /// # Errors
    ///
    /// Fails when the SQLite pool cannot be opened or migrated.
    pub fn build(config: &BoardConfig) -> Result<Self> {
        let repo: Box<dyn ArticleRepository> = match config.storage {
            StorageKind::Memory => Box::new(MemoryArticleRepository::new()),
            StorageKind::Sqlite => {
                let pool = Arc::new(ConnectionPool::open(config.pool_config())?);
                Box::new(SqliteArticleRepository::new(pool))
            }
        };

        tracing::info!(storage = ?config.storage, "board ready");
        Ok(Self::with_repository(repo, config.page_size))
    }

    pub fn with_repository(repo: Box<dyn ArticleRepository>, page_size: u32) -> Self {
        Self {
            articles: ArticleController::new(ArticleService::new(repo), page_size),
        }
    }

    /// Route one request to its controller
    ///
    /// # Errors
    ///
    /// `UnknownCommand` when no route matches, otherwise whatever the
    /// controller reports.
    pub fn dispatch(&mut self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<Flow> {
        let action = router::resolve(rq.path()).ok_or_else(|| BoardError::UnknownCommand {
            path: rq.path().to_string(),
        })?;
        tracing::debug!(?action, path = rq.path(), "dispatching");

        match action {
            Action::ArticleAdd => self.articles.add(rq, console)?,
            Action::ArticleList => self.articles.list(rq, console)?,
            Action::ArticleDetail => self.articles.detail(rq, console)?,
            Action::ArticleModify => self.articles.modify(rq, console)?,
            Action::ArticleDelete => self.articles.delete(rq, console)?,
            Action::Help => system::help(console)?,
            Action::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}
