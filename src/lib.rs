//! # Clientbook - customer and order records on SQLite
//!
//! Clientbook keeps two related record types in a single local SQLite file:
//! - Customers, unique by email
//! - Orders, each owned by exactly one customer and removed with it
//!
//! The storage and record modules never write to the console. `ui` holds
//! the terminal helpers the `clientbook` binary builds its output from.

pub mod config;
pub mod customer;
pub mod order;
pub mod output;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use customer::{Customer, NewCustomer};
pub use order::{NewOrder, OrderWithCustomer};
pub use storage::{CustomerRepository, Database, DbStats, OrderRepository, SqliteStore};

use std::path::PathBuf;

/// Result type alias for Clientbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Clientbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Order date {0} is outside years 0000-9999")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("The email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Customer with ID {0} not found")]
    CustomerNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
