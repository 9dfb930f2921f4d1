mod model;
mod server;

use std::{process::ExitCode, sync::Arc};

use dioxus_logger::tracing::{self, Level};

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    liveness::LivenessServer,
    model::status::BotStatus,
    scheduler::latency,
    service::command::COMMANDS,
    startup,
    state::{AppState, BotContext},
};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialise logging: {e}");
    }

    dotenvy::dotenv().ok();

    match run().await {
        Ok(()) => {
            tracing::info!("Shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Starts every component, runs until Ctrl-C or a fatal bot error, then shuts down.
async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let http_client = startup::setup_reqwest_client()?;
    let status = Arc::new(BotStatus::new());
    let commands = startup::setup_command_service(&config, http_client, status.clone())?;

    tracing::info!("Starting bot in {} mode", config.environment.as_str());

    let mut client =
        bot::start::init_bot(&config, BotContext::new(status.clone(), commands)).await?;
    let shard_manager = client.shard_manager.clone();

    let mut scheduler = latency::start_scheduler(shard_manager.clone(), status.clone()).await?;

    let liveness = if config.liveness_enabled() {
        let state = AppState::new(status.clone(), config.environment, COMMANDS.len());
        Some(LivenessServer::start(state, config.port).await?)
    } else {
        tracing::info!("Liveness server disabled outside production");
        None
    };

    let outcome = tokio::select! {
        result = bot::start::start_bot(&mut client) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            Ok(())
        }
    };

    shard_manager.shutdown_all().await;
    status.mark_closed().await;

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop latency sampler: {}", e);
    }

    if let Some(liveness) = liveness {
        liveness.stop().await;
    }

    outcome
}
