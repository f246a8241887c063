use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lansia_helper_backend::config::AppConfig;
use lansia_helper_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting Lansia Helper backend, data in {}", config.data_directory.display());
    match &config.source {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }
    let app_state = initialize_backend(&config).await?;

    // Registered reminders live in memory; rebuild them from the stored schedules
    let today = Local::now().date_naive();
    match app_state.schedule_service.reconcile_reminders(today).await {
        Ok(result) => info!(
            "Startup reconciliation: {} reminders for {} schedules",
            result.reminders_registered, result.schedules_checked
        ),
        Err(e) => warn!("Startup reconciliation failed: {}", e),
    }

    let dispatcher = app_state.reminder_service.run(config.reminder_tick());
    let app = create_router(app_state, &config.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dispatcher.abort();
    info!("Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
