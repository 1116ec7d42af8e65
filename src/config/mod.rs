//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `REGISTRAR` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use orientation_registrar::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod admin;
mod database;
mod error;
mod notify;
mod registration;
mod server;

pub use admin::AdminConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use notify::NotifyConfig;
pub use registration::{RegistrationConfig, StorageBackend};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection, required for `storage = "postgres"`
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Flow settings: capacity, offer windows, numbering
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Admin token and broadcast settings
    pub admin: AdminConfig,

    /// Outbound delivery
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `REGISTRAR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `REGISTRAR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REGISTRAR__REGISTRATION__CAPACITY_PER_DATE=120`
    ///   -> `registration.capacity_per_date = 120`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REGISTRAR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only checked when Postgres storage is selected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if self.registration.storage == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.registration.validate()?;
        self.admin.validate()?;
        self.notify.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
