//! Customer handlers
//!
//! Endpoints for customer registration and lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::RegistrationCandidate;
use crate::domain::entities::{Customer, CustomerId};
use crate::domain::ports::CustomerRepository;
use crate::error::AppError;
use crate::AppState;

/// Request body for customer registration
///
/// Every field is optional here so that a missing field is reported as a
/// violation alongside the others instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
}

impl From<CreateCustomerRequest> for RegistrationCandidate {
    fn from(request: CreateCustomerRequest) -> Self {
        RegistrationCandidate {
            name: request.name,
            email: request.email,
            tax_id: request.tax_id,
            birth_date: request.birth_date,
        }
    }
}

/// Response body for a persisted customer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id.0,
            name: customer.name,
            email: customer.email,
            tax_id: customer.tax_id.to_string(),
            birth_date: customer.birth_date,
        }
    }
}

/// POST /customers
///
/// Register a new customer. Every violated field is reported at once.
pub async fn create_customer<CR>(
    State(state): State<AppState<CR>>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
{
    let customer = state
        .customer_service
        .register(&request.into())
        .await?;

    Ok(Json(customer.into()))
}

/// GET /customers/:id
pub async fn get_customer<CR>(
    State(state): State<AppState<CR>>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
{
    let customer = state
        .customer_service
        .get(&CustomerId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))?;

    Ok(Json(customer.into()))
}
