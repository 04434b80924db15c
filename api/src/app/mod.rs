//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod customer_service;
pub mod registration_validator;

pub use customer_service::CustomerService;
pub use registration_validator::{RegistrationCandidate, RegistrationValidator};
