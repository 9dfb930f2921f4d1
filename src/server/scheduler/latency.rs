use std::{sync::Arc, time::Duration};

use dioxus_logger::tracing;
use serenity::gateway::ShardManager;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, model::status::BotStatus};

/// Starts the gateway latency sampler
///
/// This scheduler runs every 15 seconds and copies the heartbeat latency of the
/// running shards into the bot status, where `/ping` and the liveness endpoints
/// read it.
///
/// # Arguments
/// - `shard_manager`: Shard manager of the Discord client
/// - `status`: Bot status receiving the samples
///
/// # Returns
/// - `Ok(JobScheduler)`: The running scheduler, to be shut down on exit
/// - `Err(AppError)`: The job could not be created or the scheduler failed to start
pub async fn start_scheduler(
    shard_manager: Arc<ShardManager>,
    status: Arc<BotStatus>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("*/15 * * * * *", move |_uuid, _lock| {
        let shard_manager = shard_manager.clone();
        let status = status.clone();

        Box::pin(async move {
            sample_latency(&shard_manager, &status).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Latency sampler started");

    Ok(scheduler)
}

/// Records the average heartbeat latency across shards
async fn sample_latency(shard_manager: &ShardManager, status: &BotStatus) {
    let latencies: Vec<Option<Duration>> = {
        let runners = shard_manager.runners.lock().await;
        runners.values().map(|runner| runner.latency).collect()
    };

    let latency = average_latency(latencies);
    if let Some(latency) = latency {
        tracing::trace!("Gateway latency {}ms", latency.as_millis());
    }

    status.set_latency(latency).await;
}

/// Mean of the measured latencies, ignoring shards without a heartbeat ack yet.
fn average_latency(latencies: impl IntoIterator<Item = Option<Duration>>) -> Option<Duration> {
    let measured: Vec<Duration> = latencies.into_iter().flatten().collect();
    if measured.is_empty() {
        return None;
    }

    Some(measured.iter().sum::<Duration>() / measured.len() as u32)
}
