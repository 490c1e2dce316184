//! Customer entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::CustomerId;

/// Errors that can occur constructing or updating a customer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// Email does not have a `local@domain.tld` shape.
    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    /// Address is empty or whitespace only.
    #[error("Address cannot be empty")]
    EmptyAddress,
}

/// A customer with contact details.
///
/// Identity is the customer ID; two customers with the same ID compare equal
/// regardless of contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    address: String,
}

impl Customer {
    /// Creates a new customer.
    ///
    /// Fails with [`CustomerError::InvalidEmail`] if the email does not have
    /// a basic `local@domain.tld` shape.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, CustomerError> {
        let email = email.into();
        if !is_valid_email(&email) {
            return Err(CustomerError::InvalidEmail { email });
        }
        Ok(Self {
            id,
            name: name.into(),
            email,
            address: address.into(),
        })
    }

    /// Returns the customer ID.
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Returns the customer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Replaces the postal address.
    ///
    /// Fails with [`CustomerError::EmptyAddress`] if the trimmed value is
    /// empty; identity is unaffected either way.
    pub fn update_address(&mut self, new_address: impl Into<String>) -> Result<(), CustomerError> {
        let new_address = new_address.into();
        if new_address.trim().is_empty() {
            return Err(CustomerError::EmptyAddress);
        }
        self.address = new_address;
        Ok(())
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

/// Checks for a `local@domain.tld` shape: exactly one `@`, a non-empty local
/// part, a dotted domain, and no whitespace anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}
