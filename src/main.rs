use anyhow::Context;
use std::time::Duration;
use tracing::info;

use d3e_dismantle::{
    api::{build_router, AppState},
    catalog::{load_or_empty, source_from_config},
    config::Config,
    logging::init_tracing,
    matcher::MatcherConfig,
    metrics::METRICS,
    session::SessionStore,
};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config.logging);

    let source = source_from_config(&config.catalog).context("building catalog source")?;
    let catalog = load_or_empty(source.as_ref()).await;

    let state = AppState::new(
        catalog,
        MatcherConfig::from(&config.matcher),
        SessionStore::from_settings(&config.session),
    );

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.clear_expired();
            METRICS.set_active_sessions(sessions.len());
        }
    });

    let router = build_router(state, config.server.max_body_bytes);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;

    info!("Dismantling service listening on {}", address);
    axum::serve(listener, router).await?;

    Ok(())
}
