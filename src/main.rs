//! Orientation Registrar server.
//!
//! Loads configuration from `REGISTRAR__*` environment variables (and `.env`
//! in development), wires storage, delivery and admin access, then serves
//! the channel and admin APIs.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orientation_registrar::adapters::http::{self, AdminAppState, ChannelsAppState};
use orientation_registrar::adapters::{
    postgres, InMemoryParticipantRepository, InMemorySessionStore, PostgresParticipantRepository,
    PostgresSessionStore, SharedTokenAuthorizer, SystemClock, TracingSender, WebhookSender,
};
use orientation_registrar::application::{RegistrationEngine, RegistrationSettings};
use orientation_registrar::config::{AppConfig, ServerConfig, StorageBackend};
use orientation_registrar::ports::{
    AdminAuthorizer, Clock, MessageSender, ParticipantRepository, SessionStore,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn storage(
    config: &AppConfig,
) -> Result<(Arc<dyn ParticipantRepository>, Arc<dyn SessionStore>), BoxError> {
    let base = config.registration.participant_number_base;
    match config.registration.storage {
        StorageBackend::Postgres => {
            tracing::info!(database = %config.database.redacted_url(), "connecting to postgres");
            let pool = postgres::connect(&config.database).await?;
            Ok((
                Arc::new(PostgresParticipantRepository::new(pool.clone(), base)),
                Arc::new(PostgresSessionStore::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, registrations are lost on restart");
            Ok((
                Arc::new(InMemoryParticipantRepository::new(base)),
                Arc::new(InMemorySessionStore::new()),
            ))
        }
    }
}

fn sender(config: &AppConfig) -> Result<Arc<dyn MessageSender>, BoxError> {
    match &config.notify.webhook_url {
        Some(url) => Ok(Arc::new(WebhookSender::new(url.clone(), config.notify.timeout())?)),
        None => {
            tracing::info!("no delivery webhook configured, outbound messages are only logged");
            Ok(Arc::new(TracingSender))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.registration.utc_offset()?));
    let (participants, sessions) = storage(&config).await?;
    let sender = sender(&config)?;
    let authorizer: Arc<dyn AdminAuthorizer> =
        Arc::new(SharedTokenAuthorizer::new(config.admin.token.clone()));

    let engine = Arc::new(RegistrationEngine::new(
        participants.clone(),
        sessions,
        clock.clone(),
        RegistrationSettings::from(&config.registration),
    ));
    let channels = ChannelsAppState {
        engine,
        clock: clock.clone(),
        interactive_window: config.registration.interactive_window(),
        email_window: config.registration.email_window(),
    };
    let admin = AdminAppState::new(
        participants,
        sender,
        authorizer,
        clock,
        config.admin.broadcast_concurrency,
    );

    let app = http::router(channels, admin, config.server.request_timeout());
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        capacity = config.registration.capacity_per_date,
        "orientation registrar listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
