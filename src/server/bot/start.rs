use std::{future::Future, time::Duration};

use dioxus_logger::tracing;
use rand::Rng;
use serenity::all::{Client, GatewayIntents};
use serenity::gateway::GatewayError;

use crate::server::{bot::handler::Handler, config::Config, error::AppError, state::BotContext};

/// Connection attempts made before startup is abandoned.
pub const MAX_CONNECT_ATTEMPTS: u32 = 5;

/// Delay before the first retry; doubled for every later one.
pub const BACKOFF_BASE: Duration = Duration::from_secs(2);

/// Upper bound of the random delay added to each backoff.
const MAX_JITTER_MS: u64 = 1000;

/// Builds the Discord client with the bot's event handler.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `bot` - Command service and status shared with the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to connect
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(config: &Config, bot: BotContext) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(bot))
        .await?;

    Ok(client)
}

/// Connects the bot and runs it until shutdown.
///
/// Serenity retries a failed shard start forever, so reachability is checked
/// first: the gateway endpoint is fetched with the bot token, retried with
/// exponential backoff and jitter up to `MAX_CONNECT_ATTEMPTS`. Rejected
/// credentials are not retried. Once the shards start, Serenity handles
/// reconnects itself, so this only returns when the shards are shut down or a
/// fatal gateway error occurs.
///
/// # Arguments
/// - `client` - Client built by `init_bot`
///
/// # Returns
/// - `Ok(())` - The shards were shut down
/// - `Err(AppError::DiscordErr)` - Discord rejected the token or intents
/// - `Err(AppError::ConnectExhausted)` - Every connection attempt failed
pub async fn start_bot(client: &mut Client) -> Result<(), AppError> {
    let http = client.http.clone();

    let attempts = connect_with_backoff(
        || {
            let http = http.clone();
            async move { http.get_bot_gateway().await.map(|_| ()) }
        },
        |attempt| backoff_delay(attempt, random_jitter()),
    )
    .await?;

    tracing::info!(
        "Discord reachable after {} attempt(s), starting shards",
        attempts
    );

    client.start().await?;

    Ok(())
}

/// Runs `connect` until it succeeds, fails fatally, or the attempts run out.
///
/// # Arguments
/// - `connect` - One connection attempt
/// - `delay_for` - Wait after the failed attempt number `n` (1-based)
///
/// # Returns
/// - `Ok(u32)` - Number of attempts made, the last one successful
/// - `Err(AppError::DiscordErr)` - An attempt failed with a fatal error
/// - `Err(AppError::ConnectExhausted)` - `MAX_CONNECT_ATTEMPTS` attempts failed
async fn connect_with_backoff<C, Fut, D>(mut connect: C, delay_for: D) -> Result<u32, AppError>
where
    C: FnMut() -> Fut,
    Fut: Future<Output = Result<(), serenity::Error>>,
    D: Fn(u32) -> Duration,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        tracing::info!(
            "Connecting to Discord (attempt {}/{})",
            attempt,
            MAX_CONNECT_ATTEMPTS
        );

        let err = match connect().await {
            Ok(()) => return Ok(attempt),
            Err(e) => e,
        };

        if is_fatal(&err) {
            tracing::error!("Discord rejected the connection: {}", err);
            return Err(err.into());
        }

        if attempt >= MAX_CONNECT_ATTEMPTS {
            tracing::error!("Discord connection attempt {} failed: {}", attempt, err);
            return Err(AppError::ConnectExhausted(attempt));
        }

        let delay = delay_for(attempt);
        tracing::warn!(
            "Discord connection attempt {} failed: {}. Retrying in {:.1}s",
            attempt,
            err,
            delay.as_secs_f64()
        );
        tokio::time::sleep(delay).await;
    }
}

/// Delay after the failed attempt number `attempt` (1-based).
///
/// # Returns
/// - `BACKOFF_BASE * 2^(attempt - 1) + jitter`
pub fn backoff_delay(attempt: u32, jitter: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    BACKOFF_BASE * 2u32.pow(exponent) + jitter
}

fn random_jitter() -> Duration {
    let mut rng = rand::rng();
    Duration::from_millis(rng.random_range(0..MAX_JITTER_MS))
}

/// Whether retrying cannot help: the token or the requested intents were refused.
fn is_fatal(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Gateway(
            GatewayError::InvalidAuthentication
            | GatewayError::InvalidGatewayIntents
            | GatewayError::DisallowedGatewayIntents,
        ) => true,
        serenity::Error::Http(e) => {
            let status = e.status_code().map(|status| status.as_u16());
            status.is_some_and(is_rejected_status)
        }
        _ => false,
    }
}

/// HTTP statuses Discord answers with for a bad or revoked token.
fn is_rejected_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}
