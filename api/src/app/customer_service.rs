//! Customer service
//!
//! Handles customer registration and lookup.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::app::registration_validator::{RegistrationCandidate, RegistrationValidator};
use crate::domain::entities::{Customer, CustomerId};
use crate::domain::ports::CustomerRepository;
use crate::error::AppError;

/// Service for registering customers
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
    validator: RegistrationValidator<CR>,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>, validator: RegistrationValidator<CR>) -> Self {
        Self {
            customers,
            validator,
        }
    }

    /// Register a new customer
    ///
    /// Validates the candidate against today's date and returns the stored
    /// customer with its generated ID. Nothing is written when validation fails.
    pub async fn register(&self, candidate: &RegistrationCandidate) -> Result<Customer, AppError> {
        self.register_on(candidate, Utc::now().date_naive()).await
    }

    /// Register a new customer, judging the birth date against `today`
    pub async fn register_on(
        &self,
        candidate: &RegistrationCandidate,
        today: NaiveDate,
    ) -> Result<Customer, AppError> {
        let new_customer = match self.validator.validate(candidate, today).await {
            Ok(new_customer) => new_customer,
            Err(AppError::Validation(violations)) => {
                tracing::debug!(
                    violations = violations.len(),
                    "Rejected customer registration"
                );
                return Err(AppError::Validation(violations));
            }
            Err(e) => return Err(e),
        };

        let customer = self.customers.insert(&new_customer).await?;

        tracing::info!(customer_id = %customer.id, "Registered customer");

        Ok(customer)
    }

    /// Find a customer by ID
    pub async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, AppError> {
        Ok(self.customers.find_by_id(id).await?)
    }
}
