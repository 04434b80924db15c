use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Upper bound of the SeaORM connection pool
    pub database_max_connections: u32,
    /// Log every SQL statement through sqlx
    pub sql_logging: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10),
            sql_logging: env::var("SQL_LOGGING")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
