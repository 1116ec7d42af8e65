//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresParticipantRepository` - Participant rows, numbering and seats
//! - `PostgresSessionStore` - Conversation contexts as JSONB documents

mod participant_repository;
mod session_store;

pub use participant_repository::PostgresParticipantRepository;
pub use session_store::PostgresSessionStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens a connection pool, applying pending migrations when configured.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}
