//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod customer_repo;


pub use customer_repo::PostgresCustomerRepository;
