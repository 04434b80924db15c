//! Registration validator
//!
//! Decides whether a registration payload may be persisted. Structural
//! checks run first and are all collected; the store is only consulted for
//! duplicates once every field is well formed.

use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::entities::{NewCustomer, TaxId};
use crate::domain::ports::CustomerRepository;
use crate::error::{AppError, DomainError, FieldViolation};

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_TAX_ID: &str = "taxId";
pub const FIELD_BIRTH_DATE: &str = "birthDate";

/// Unvalidated registration payload, as received at the request boundary
#[derive(Debug, Clone, Default)]
pub struct RegistrationCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub birth_date: Option<String>,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)*[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$",
        )
        .expect("email pattern is valid")
    })
}

/// Whether `email` matches the address grammar accepted for registration
pub fn is_well_formed_email(email: &str) -> bool {
    email.len() <= 254 && email_pattern().is_match(email)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Field-level checks that need no stored data.
///
/// Reports at most one violation per field.
pub fn check_structure(
    candidate: &RegistrationCandidate,
    today: NaiveDate,
) -> Result<NewCustomer, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = non_blank(&candidate.name);
    if name.is_none() {
        violations.push(FieldViolation::new(FIELD_NAME, "must not be blank"));
    }

    let email = match non_blank(&candidate.email) {
        None => {
            violations.push(FieldViolation::new(FIELD_EMAIL, "must not be blank"));
            None
        }
        Some(email) if !is_well_formed_email(email) => {
            violations.push(FieldViolation::new(
                FIELD_EMAIL,
                "must be a well-formed email address",
            ));
            None
        }
        Some(email) => Some(email),
    };

    let tax_id = match non_blank(&candidate.tax_id) {
        None => {
            violations.push(FieldViolation::new(FIELD_TAX_ID, "must not be blank"));
            None
        }
        Some(raw) => match raw.parse::<TaxId>() {
            Ok(tax_id) => Some(tax_id),
            Err(_) => {
                violations.push(FieldViolation::new(FIELD_TAX_ID, "must be a valid CPF"));
                None
            }
        },
    };

    let birth_date = match candidate.birth_date.as_deref() {
        None => {
            violations.push(FieldViolation::new(FIELD_BIRTH_DATE, "must not be null"));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Err(_) => {
                violations.push(FieldViolation::new(
                    FIELD_BIRTH_DATE,
                    "must be a date in the format YYYY-MM-DD",
                ));
                None
            }
            Ok(date) if date >= today => {
                violations.push(FieldViolation::new(
                    FIELD_BIRTH_DATE,
                    "must be a date in the past",
                ));
                None
            }
            Ok(date) => Some(date),
        },
    };

    match (name, email, tax_id, birth_date) {
        (Some(name), Some(email), Some(tax_id), Some(birth_date)) if violations.is_empty() => {
            Ok(NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                tax_id,
                birth_date,
            })
        }
        _ => Err(violations),
    }
}

/// Validates registrations against field rules and already stored customers
pub struct RegistrationValidator<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
}

impl<CR> RegistrationValidator<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>) -> Self {
        Self { customers }
    }

    /// Look up both unique keys; either, both or neither may already be taken
    ///
    /// The tax ID is compared in its normalised form but reported as
    /// `submitted_tax_id`, the value the caller sent.
    pub async fn check_uniqueness(
        &self,
        customer: &NewCustomer,
        submitted_tax_id: &str,
    ) -> Result<Vec<FieldViolation>, DomainError> {
        let mut violations = Vec::new();

        if self.customers.find_by_email(&customer.email).await?.is_some() {
            violations.push(FieldViolation::new(
                FIELD_EMAIL,
                format!("email already registered: {}", customer.email),
            ));
        }

        if self
            .customers
            .find_by_tax_id(&customer.tax_id)
            .await?
            .is_some()
        {
            violations.push(FieldViolation::new(
                FIELD_TAX_ID,
                format!("CPF already registered: {}", submitted_tax_id),
            ));
        }

        Ok(violations)
    }

    /// Run every check and return the payload ready for persistence
    ///
    /// Violations come back as `AppError::Validation`; store failures during
    /// the lookups propagate as `AppError::Domain`.
    pub async fn validate(
        &self,
        candidate: &RegistrationCandidate,
        today: NaiveDate,
    ) -> Result<NewCustomer, AppError> {
        let customer = check_structure(candidate, today).map_err(AppError::Validation)?;

        let submitted_tax_id = candidate.tax_id.as_deref().unwrap_or_default().trim();
        let violations = self.check_uniqueness(&customer, submitted_tax_id).await?;
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        Ok(customer)
    }
}
