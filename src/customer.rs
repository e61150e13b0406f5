//! Customer records
//!
//! A customer is identified by a generated integer id and must carry a
//! name and an email. Emails are unique across all customers; the store
//! enforces that, not this module.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A customer as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Field values for creating or replacing a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone,
        }
    }

    /// Check required fields before any storage access.
    ///
    /// A name or email made only of whitespace counts as missing.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        Ok(())
    }

    /// Phone as it should be persisted: blank input is stored as NULL
    pub fn phone_for_storage(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
