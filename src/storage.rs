//! Local persistence for the audit log.
//!
//! Everything lives in a single `SQLite` file:
//!
//! ```text
//! ~/.radar/audit.sqlite
//!   audit (id, x, y, recorded_at)   # One row per resolved target
//! ```

mod audit;

use std::{fs, path::Path};

use rusqlite::Connection;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS audit (
        id          TEXT PRIMARY KEY NOT NULL,
        x           REAL NOT NULL,
        y           REAL NOT NULL,
        recorded_at TEXT NOT NULL
    );
";

/// `SQLite`-backed storage for audit records.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens the database at `path`, creating it and its parent directory
    /// if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        log::debug!("opened audit database at {}", path.display());
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}
