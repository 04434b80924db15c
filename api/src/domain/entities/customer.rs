//! Customer domain entity
//!
//! Represents a registered bank customer.

use chrono::NaiveDate;

use super::TaxId;

/// Unique identifier for a customer, assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub i64);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub tax_id: TaxId,
    pub birth_date: NaiveDate,
}

/// A validated registration, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub tax_id: TaxId,
    pub birth_date: NaiveDate,
}
