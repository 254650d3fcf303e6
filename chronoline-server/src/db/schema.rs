//! Database schema definitions

use rusqlite::Connection;
use tracing::info;

use crate::error::ApiError;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<(), ApiError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating new database schema v{}", SCHEMA_VERSION);
        create_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        info!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
fn get_schema_version(conn: &Connection) -> Result<i32, ApiError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )
    .map_err(|e| ApiError::Database(format!("Failed to create schema_version table: {}", e)))?;

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), ApiError> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| ApiError::Database(format!("Failed to clear schema_version: {}", e)))?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?)", [version])
        .map_err(|e| ApiError::Database(format!("Failed to set schema_version: {}", e)))?;
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<(), ApiError> {
    conn.execute_batch(PERSONS_SCHEMA)
        .map_err(|e| ApiError::Database(format!("Failed to create persons tables: {}", e)))?;

    conn.execute_batch(INDEXES_SCHEMA)
        .map_err(|e| ApiError::Database(format!("Failed to create indexes: {}", e)))?;

    Ok(())
}

fn migrate_schema(conn: &Connection, from_version: i32) -> Result<(), ApiError> {
    // Add migration steps here as schema evolves
    match from_version {
        _ => {}
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Persons table schema
const PERSONS_SCHEMA: &str = r#"
-- One row per historical figure.
-- Years use astronomical numbering (negative = BCE).
CREATE TABLE IF NOT EXISTS persons (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    birth_year INTEGER NOT NULL,
    death_year INTEGER NOT NULL,

    -- Optional rule/tenure sub-interval of the life span
    reign_start INTEGER,
    reign_end INTEGER,

    category TEXT NOT NULL,
    -- Possibly a '/'-composite of several country names
    country TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',

    -- Ordered list of achievement texts, as a JSON array
    achievements TEXT NOT NULL DEFAULT '[]',
    -- Years aligned with the first three achievements entries
    achievement_year_1 INTEGER,
    achievement_year_2 INTEGER,
    achievement_year_3 INTEGER,

    image_url TEXT,

    CHECK (birth_year <= death_year)
);

-- Country tokens stored separately so composite values filter per name
CREATE TABLE IF NOT EXISTS person_countries (
    person_id TEXT NOT NULL,
    country TEXT NOT NULL,
    PRIMARY KEY (person_id, country),
    FOREIGN KEY (person_id) REFERENCES persons(id) ON DELETE CASCADE
);
"#;

/// Index definitions for the filterable columns
const INDEXES_SCHEMA: &str = r#"
CREATE INDEX IF NOT EXISTS idx_persons_category ON persons(category);
CREATE INDEX IF NOT EXISTS idx_persons_birth_year ON persons(birth_year);
CREATE INDEX IF NOT EXISTS idx_persons_death_year ON persons(death_year);
CREATE INDEX IF NOT EXISTS idx_person_countries_country ON person_countries(country);
"#;
