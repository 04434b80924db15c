//! SeaORM entities
//!
//! Table mappings for the PostgreSQL schema in `api/sql/`.

pub mod customers;
