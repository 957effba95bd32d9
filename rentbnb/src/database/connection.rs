//! Database connection management.

use rusqlite::{Connection, ErrorCode, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` connection configured for concurrent booking traffic.
///
/// Each process (or thread) opens its own `Database`; `SQLite` serializes
/// writers through its file lock and WAL mode lets readers proceed
/// alongside a writer.
///
/// # Examples
///
/// ```no_run
/// use rentbnb::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/rentbnb.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// Creates the parent directory when `auto_create` is set, enables WAL
    /// mode and foreign keys, applies the busy timeout, and initializes or
    /// verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, a PRAGMA
    /// fails, or the schema version is unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        log::debug!("opening database {}", config.path.display());
        let conn = Connection::open_with_flags(&config.path, flags)?;

        // busy_timeout first so the remaining setup also waits on locks
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        super::migrations::check_schema_compatibility(&conn)
            .map_err(|e| lock_timeout(e, &config))?;

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Starts a write transaction, taking the database write lock up front.
    ///
    /// Holding the lock from the first read guarantees that what a
    /// check-then-write sequence read is still true when it writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the lock is not acquired within the
    /// busy timeout.
    pub fn begin_write(&mut self) -> Result<Transaction<'_>> {
        let timeout = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| busy_to_timeout(e, timeout))
    }

    /// Converts lock contention errors into [`Error::LockTimeout`].
    #[must_use]
    pub fn translate_error(&self, err: Error) -> Error {
        lock_timeout(err, &self.config)
    }
}

fn lock_timeout(err: Error, config: &DatabaseConfig) -> Error {
    match err {
        Error::Database(e) => busy_to_timeout(e, config.busy_timeout.as_secs()),
        other => other,
    }
}

fn busy_to_timeout(err: rusqlite::Error, seconds: u64) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::LockTimeout { seconds },
        _ => Error::Database(err),
    }
}
