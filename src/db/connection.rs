use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".ciu-stats";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "ciu_stats.sqlite";

/// Ensure the database file exists, create the schema on first run, and
/// return a live connection. Both binaries go through this function so the
/// interactive app and the seeding utility always hit the same file.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Open a throwaway in-memory database with the same schema. Used by tests so
/// the data-access layer can be exercised without touching the home directory.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    create_tables(&conn)?;
    Ok(conn)
}

/// The one table this application owns. Column order is fixed and mirrored by
/// `CaseRecord`; the CRN carries the uniqueness constraint because the view
/// keys rows by it and the delete path matches on it.
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS stats (
            crn TEXT NOT NULL UNIQUE,
            report_date TEXT NOT NULL,
            date_filed TEXT NOT NULL,
            description TEXT NOT NULL,
            in_custody TEXT NOT NULL,
            charges INTEGER NOT NULL,
            warrants INTEGER NOT NULL,
            detective TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create stats table")?;
    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
