//! PostgreSQL implementation of SessionStore.
//!
//! Each context is one JSONB document keyed by internal key.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, InternalKey};
use crate::domain::registration::RegistrationContext;
use crate::ports::SessionStore;

#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn load(&self, key: &InternalKey) -> Result<Option<RegistrationContext>, DomainError> {
        let row: Option<(Json<RegistrationContext>,)> =
            sqlx::query_as("SELECT context FROM channel_sessions WHERE internal_key = $1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to load session: {}", e)))?;

        Ok(row.map(|(Json(context),)| context))
    }

    async fn save(&self, context: &RegistrationContext) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO channel_sessions (internal_key, context, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (internal_key) DO UPDATE
            SET context = EXCLUDED.context, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(context.internal_key.as_str())
        .bind(Json(context))
        .bind(context.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save session: {}", e)))?;

        Ok(())
    }
}
