//! api-bank API Server
//!
//! Customer registration for a bank: validates a new customer's data,
//! rejects duplicate emails and CPFs, and stores the customer.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ConnectOptions, Database};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;



use adapters::PostgresCustomerRepository;
use app::{CustomerService, RegistrationValidator};
use config::Config;
use domain::ports::CustomerRepository;

/// Application state shared across all handlers
pub struct AppState<CR>
where
    CR: CustomerRepository,
{
    pub customer_service: Arc<CustomerService<CR>>,
}

impl<CR> Clone for AppState<CR>
where
    CR: CustomerRepository,
{
    fn clone(&self) -> Self {
        Self {
            customer_service: self.customer_service.clone(),
        }
    }
}

impl<CR> AppState<CR>
where
    CR: CustomerRepository,
{
    /// Wire the service and validator around one repository
    pub fn new(customers: Arc<CR>) -> Self {
        let validator = RegistrationValidator::new(customers.clone());
        Self {
            customer_service: Arc::new(CustomerService::new(customers, validator)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router over any customer repository
pub fn build_router<CR>(state: AppState<CR>) -> Router
where
    CR: CustomerRepository + 'static,
{
    Router::new()
        // Health check
        .route("/health", get(health))
        // Customers
        .route("/customers", post(handlers::create_customer::<CR>))
        .route("/customers/:id", get(handlers::get_customer::<CR>))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apibank_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api-bank API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(config.sql_logging);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters and app state
    let customer_repo = Arc::new(PostgresCustomerRepository::new(db));
    let app = build_router(AppState::new(customer_repo));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
