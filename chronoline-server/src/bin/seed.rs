//! Seed the persons database from a JSON file.
//!
//! With no arguments this loads the bundled sample dataset into the default
//! data directory. Records whose ids already exist are left untouched, so
//! re-running is safe.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chronoline_server::config::Config;
use chronoline_server::db::persons::{self, CreatePersonInput};
use chronoline_server::db::PersonDb;

const SAMPLE_DATA: &str = include_str!("../../data/sample_persons.json");

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Load person records into the chronoline database", long_about = None)]
struct Args {
    /// JSON file with an array of person records (defaults to the bundled
    /// sample dataset)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Directory holding the SQLite database
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let json = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => SAMPLE_DATA.to_string(),
    };

    let items: Vec<CreatePersonInput> =
        serde_json::from_str(&json).context("Failed to parse person records")?;
    info!("Loaded {} person records", items.len());

    let mut config = Config::default();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create data dir {:?}", config.data_dir))?;

    let db = PersonDb::open(&config.db_path()).context("Failed to open database")?;
    let result = db.with_conn_mut(|conn| persons::bulk_create(conn, items))?;

    info!(
        "Seed complete: {} inserted, {} skipped",
        result.inserted, result.skipped
    );
    for error in &result.errors {
        warn!("Rejected record: {}", error);
    }

    if result.errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} records were rejected", result.errors.len())
    }
}
