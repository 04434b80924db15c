//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::entities::{Customer, CustomerId, NewCustomer, TaxId};
use crate::domain::ports::CustomerRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

/// Behaves like the `customers` table: generated ids, unique email and tax_id
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
    should_fail: bool,
    fail_inserts: bool,
    racing_writer: Mutex<Option<Customer>>,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self {
            customers: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
            should_fail: false,
            fail_inserts: false,
            racing_writer: Mutex::new(None),
        }
    }
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were unreachable
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Lookups succeed, inserts fail
    pub fn failing_inserts(self) -> Self {
        Self {
            fail_inserts: true,
            ..self
        }
    }

    /// Store `customer` right before the next insert, after any lookups ran
    ///
    /// Simulates another request committing the same email or tax ID in the
    /// gap between validation and the write.
    pub fn with_racing_writer(self, customer: Customer) -> Self {
        *self.racing_writer.lock().unwrap() = Some(customer);
        self
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        {
            let mut customers = self.customers.write().unwrap();
            self.next_id.fetch_max(customer.id.0 + 1, Ordering::SeqCst);
            customers.insert(customer.id, customer);
        }
        self
    }

    /// Number of stored customers
    pub fn len(&self) -> usize {
        self.customers.read().unwrap().len()
    }

    /// Number of email/tax_id lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail {
            Err(DomainError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        self.check_available()?;
        let customers = self.customers.read().unwrap();
        Ok(customers.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        self.check_available()?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let customers = self.customers.read().unwrap();
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, DomainError> {
        self.check_available()?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let customers = self.customers.read().unwrap();
        Ok(customers.values().find(|c| &c.tax_id == tax_id).cloned())
    }

    async fn insert(&self, new_customer: &NewCustomer) -> Result<Customer, DomainError> {
        self.check_available()?;
        if self.fail_inserts {
            return Err(DomainError::Database("insert failed".to_string()));
        }

        let mut customers = self.customers.write().unwrap();

        if let Some(racer) = self.racing_writer.lock().unwrap().take() {
            self.next_id.fetch_max(racer.id.0 + 1, Ordering::SeqCst);
            customers.insert(racer.id, racer);
        }

        if customers.values().any(|c| c.email == new_customer.email) {
            return Err(DomainError::Database(
                "duplicate key value violates unique constraint \"customers_email_key\""
                    .to_string(),
            ));
        }
        if customers.values().any(|c| c.tax_id == new_customer.tax_id) {
            return Err(DomainError::Database(
                "duplicate key value violates unique constraint \"customers_tax_id_key\""
                    .to_string(),
            ));
        }

        let id = CustomerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let customer = Customer {
            id,
            name: new_customer.name.clone(),
            email: new_customer.email.clone(),
            tax_id: new_customer.tax_id.clone(),
            birth_date: new_customer.birth_date,
        };
        customers.insert(id, customer.clone());

        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_customer, OTHER_VALID_TAX_ID};

    fn new_customer(email: &str, tax_id: &str) -> NewCustomer {
        let base = test_customer();
        NewCustomer {
            name: base.name,
            email: email.to_string(),
            tax_id: tax_id.parse().unwrap(),
            birth_date: base.birth_date,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryCustomerRepository::new().with_customer(test_customer());

        let customer = repo
            .insert(&new_customer("bia@x.com", OTHER_VALID_TAX_ID))
            .await
            .unwrap();

        assert_eq!(customer.id, CustomerId(2));
    }

    #[tokio::test]
    async fn insert_enforces_unique_email_without_validator() {
        let repo = InMemoryCustomerRepository::new().with_customer(test_customer());

        let err = repo
            .insert(&new_customer("ana@x.com", OTHER_VALID_TAX_ID))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("customers_email_key"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn insert_enforces_unique_tax_id_without_validator() {
        let repo = InMemoryCustomerRepository::new().with_customer(test_customer());

        let err = repo
            .insert(&new_customer("bia@x.com", "52998224725"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("customers_tax_id_key"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn racing_writer_lands_between_lookup_and_insert() {
        let repo = InMemoryCustomerRepository::new().with_racing_writer(test_customer());

        assert!(repo.find_by_email("ana@x.com").await.unwrap().is_none());

        let err = repo
            .insert(&new_customer("ana@x.com", OTHER_VALID_TAX_ID))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("customers_email_key"));
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_id(&CustomerId(1)).await.unwrap().is_some());
    }
}
