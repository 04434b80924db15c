//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Customer, CustomerId, NewCustomer, TaxId};
use crate::error::DomainError;

/// Repository for Customer entities
///
/// Implementations must enforce uniqueness of `email` and `tax_id` on insert
/// themselves. Lookups made before an insert can race with other writers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by tax ID (CPF)
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, DomainError>;

    /// Persist a new customer, assigning its ID
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;
}
