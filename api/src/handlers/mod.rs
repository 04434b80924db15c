//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod customers;

pub use customers::{create_customer, get_customer};
