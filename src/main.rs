use std::sync::Arc;

use club_booking::{
    adapters::{clock::SystemClock, database::json, http},
    commands::DomainLogic,
    config::Config,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_booking=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        clubs = %config.data.clubs_path.display(),
        competitions = %config.data.competitions_path.display(),
        "loading data files"
    );

    // Nothing is served unless both files are valid
    let database = json::load_database(&config.data.clubs_path, &config.data.competitions_path)
        .map_err(|err| {
            error!("{err}");
            err
        })?;

    let logic = DomainLogic::new(Arc::new(database), Arc::new(SystemClock));
    let app = http::router(logic);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "cannot listen for the shutdown signal");
    }
}
