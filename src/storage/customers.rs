//! Customer repository

use rusqlite::{params, OptionalExtension};
use crate::{Result, Error};
use crate::customer::{Customer, NewCustomer};
use super::sqlite::{constraint_violation, Constraint, Database};

const SELECT_CUSTOMER: &str = "SELECT id, name, email, phone FROM customers";

/// CRUD operations against `customers`
pub struct CustomerRepository<'a> {
    db: &'a Database,
}

impl<'a> CustomerRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a customer and return its generated id
    pub fn add(&self, customer: &NewCustomer) -> Result<i64> {
        customer.validate()?;

        let store = self.db.connect()?;
        let id = store
            .insert(
                "INSERT INTO customers (name, email, phone) VALUES (?1, ?2, ?3)",
                params![customer.name, customer.email, customer.phone_for_storage()],
            )
            .map_err(|e| email_conflict(e, &customer.email))?;

        tracing::debug!("Added customer {} ({})", id, customer.email);
        Ok(id)
    }

    /// All customers in storage order
    pub fn list(&self) -> Result<Vec<Customer>> {
        let store = self.db.connect()?;
        let mut stmt = store.connection().prepare(SELECT_CUSTOMER)?;

        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(customers)
    }

    /// Get a customer by id
    pub fn get(&self, id: i64) -> Result<Option<Customer>> {
        let store = self.db.connect()?;
        store
            .connection()
            .query_row(&format!("{} WHERE id = ?1", SELECT_CUSTOMER), [id], row_to_customer)
            .optional()
            .map_err(Into::into)
    }

    /// Replace every field of an existing customer.
    ///
    /// Returns `false` when no customer has this id.
    pub fn update(&self, id: i64, customer: &NewCustomer) -> Result<bool> {
        customer.validate()?;

        let store = self.db.connect()?;
        let changed = store
            .execute(
                "UPDATE customers SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
                params![customer.name, customer.email, customer.phone_for_storage(), id],
            )
            .map_err(|e| email_conflict(e, &customer.email))?;

        tracing::debug!("Update customer {}: {} row(s)", id, changed);
        Ok(changed > 0)
    }

    /// Delete a customer together with all of its orders.
    ///
    /// Returns `false` when no customer has this id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let store = self.db.connect()?;
        let changed = store.execute("DELETE FROM customers WHERE id = ?1", [id])?;

        tracing::debug!("Delete customer {}: {} row(s)", id, changed);
        Ok(changed > 0)
    }
}

fn email_conflict(err: rusqlite::Error, email: &str) -> Error {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => Error::DuplicateEmail(email.to_string()),
        _ => Error::Storage(err),
    }
}

fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
    })
}
