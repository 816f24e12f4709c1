//! Text board CLI
//!
//! Interactive text board backed by SQLite or memory

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use textboard_core::logging_facility;

mod app;
mod config;
mod console;
mod controller;
mod repl;
mod router;

use app::AppContext;
use config::{BoardConfig, LogProfile, StorageKind};
use console::Console;

#[derive(Debug, Parser)]
#[command(name = "textboard")]
#[command(about = "Text board - write, list and edit short articles", long_about = None)]
struct Cli {
    /// TOML configuration file (default: ./textboard.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, conflicts_with = "memory")]
    db: Option<PathBuf>,

    /// Keep articles in memory only
    #[arg(long)]
    memory: bool,

    #[arg(long, value_enum)]
    log_profile: Option<LogProfile>,

    /// Run a command line and exit (repeatable)
    #[arg(long = "exec", value_name = "LINE")]
    exec: Vec<String>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut BoardConfig) {
        if self.memory {
            config.storage = StorageKind::Memory;
        }
        if let Some(db) = &self.db {
            config.storage = StorageKind::Sqlite;
            config.db_path = db.clone();
        }
        if let Some(profile) = self.log_profile {
            config.log_profile = profile;
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BoardConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    logging_facility::init(config.log_profile.into());

    let mut app = AppContext::build(&config)?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    if cli.exec.is_empty() {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        repl::run(&mut app, &mut Console::new(&mut input, &mut output))?;
    } else {
        let mut input = io::empty();
        repl::run_lines(&mut app, &mut Console::new(&mut input, &mut output), &cli.exec)?;
    }

    output.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
