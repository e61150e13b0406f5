//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customers(id, name, email unique, phone)
//! - orders(id, customer_id -> customers.id on delete cascade, product, amount, date)

pub mod customers;
pub mod orders;
pub mod schema;
pub mod sqlite;

pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use sqlite::{Database, DbStats, SqliteStore};
