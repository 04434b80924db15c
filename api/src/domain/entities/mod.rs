//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod customer;
pub mod tax_id;

pub use customer::{Customer, CustomerId, NewCustomer};
pub use tax_id::TaxId;
