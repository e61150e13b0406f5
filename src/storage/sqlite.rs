//! SQLite storage handle
//!
//! A [`Database`] only remembers where the store lives. Every operation
//! calls [`Database::connect`] for a fresh [`SqliteStore`], does its work and
//! drops it, which closes the connection on every exit path.

use std::path::{Path, PathBuf};
use rusqlite::{Connection, ErrorCode, Params};
use crate::{Result, Error};
use super::{schema, CustomerRepository, OrderRepository};

/// Location of the clientbook store
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign keys enforced
    pub fn connect(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.path)
    }

    /// Create the customers and orders tables if they are missing.
    ///
    /// Safe to call on every start.
    pub fn ensure_schema(&self) -> Result<()> {
        let store = self.connect()?;
        store.initialize_schema()?;
        tracing::info!("Schema ready at {}", self.path.display());
        Ok(())
    }

    pub fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(self)
    }

    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let store = self.connect()?;
        Ok(DbStats {
            customers: store.count("customers")?,
            orders: store.count("orders")?,
        })
    }
}

/// One open connection to the store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open(path).map_err(open_error)?;
        let store = Self { conn };
        store.enable_foreign_keys().map_err(open_error)?;
        tracing::debug!("Opened {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.enable_foreign_keys()?;
        Ok(store)
    }

    // SQLite leaves foreign keys off per connection unless asked
    fn enable_foreign_keys(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON")
    }

    /// Whether this connection enforces foreign keys
    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let on: bool = self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(on)
    }

    /// Initialize the database schema
    pub fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Run one statement with bound parameters, returning the affected row count.
    ///
    /// The connection is in autocommit mode, so a successful call is already
    /// committed.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> rusqlite::Result<usize> {
        self.conn.execute(sql, params)
    }

    /// Run an INSERT and return the generated row id
    pub fn insert<P: Params>(&self, sql: &str, params: P) -> rusqlite::Result<i64> {
        self.conn.execute(sql, params)?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Close explicitly, surfacing any error that dropping would swallow
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }
}

/// Which constraint a failed write tripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
    Other,
}

/// Classify a constraint violation, or `None` for any other failure
pub fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                Some(Constraint::Unique)
            } else if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                Some(Constraint::ForeignKey)
            } else {
                Some(Constraint::Other)
            }
        }
        _ => None,
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub customers: usize,
    pub orders: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Orders: {}", self.orders)
    }
}
