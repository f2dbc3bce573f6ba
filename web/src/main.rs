//! Maitred reservation backend server.
//!
//! Boot order: environment file, tracing, configuration, providers,
//! router, serve. Configuration is loaded once into an immutable struct
//! and injected into each component constructor.

use maitred_auth::RestIdentityProvider;
use maitred_core::config::Config;
use maitred_core::ReservationEngine;
use maitred_notify::{AnyMailer, EmailNotifier};
use maitred_store::RestStore;
use maitred_web::{AppState, router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env()?;

    let store = RestStore::new(&config.store)?;
    let identity = RestIdentityProvider::new(&config.identity)?;
    let mailer = AnyMailer::from_transport(&config.email.transport)?;
    let notifier = EmailNotifier::new(mailer, &config.email);

    let engine = ReservationEngine::new(store, notifier);
    let state = AppState::new(engine, identity);
    let app = router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "maitred listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "maitred_web=info,maitred_core=info,maitred_store=info,maitred_auth=info,maitred_notify=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
