//! Liveness HTTP server lifecycle.
//!
//! The server runs on its own task and shares nothing with command handling
//! except read access to `BotStatus`. A bind failure is reported to the caller;
//! a failure while serving is logged and leaves the bot running.

use std::net::SocketAddr;

use dioxus_logger::tracing;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::server::{error::AppError, router, state::AppState};

/// Starts the liveness server.
pub struct LivenessServer;

impl LivenessServer {
    /// Binds `0.0.0.0:port` and serves the liveness routes in the background.
    ///
    /// # Arguments
    /// - `state` - Liveness state shared with the handlers
    /// - `port` - Port to listen on; `0` picks a free port
    ///
    /// # Returns
    /// - `Ok(LivenessHandle)` - Handle for the running server
    /// - `Err(AppError::IoErr)` - The port could not be bound
    pub async fn start(state: AppState, port: u16) -> Result<LivenessHandle, AppError> {
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router::router(state);

        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = served {
                tracing::error!("Liveness server error: {}", e);
            }
        });

        tracing::info!("Liveness server listening on {}", local_addr);

        Ok(LivenessHandle {
            local_addr,
            shutdown_tx,
            task,
        })
    }
}

/// Handle of a running liveness server.
pub struct LivenessHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl LivenessHandle {
    /// Address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());

        if let Err(e) = self.task.await {
            tracing::error!("Liveness server task failed: {}", e);
        }

        tracing::info!("Liveness server stopped");
    }
}
