//! Run-wide stop signal.
//!
//! A single broadcast channel fans out "stop now" to every virtual user. It
//! fires on Ctrl+C, on SIGTERM (unix), or when the run deadline passes.
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Sends shutdown once `duration` has elapsed, unless something else stops
/// the run first.
pub fn spawn_deadline(shutdown_tx: &ShutdownSender, duration: Duration) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            () = tokio::time::sleep(duration) => {
                drop(shutdown_tx.send(()));
            }
        }
    })
}

pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted; stopping virtual users.");
                    drop(shutdown_tx.send(()));
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    info!("Terminated; stopping virtual users.");
                    drop(shutdown_tx.send(()));
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted; stopping virtual users.");
                    drop(shutdown_tx.send(()));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use std::future::Future;

    const HANDLER_TIMEOUT: Duration = Duration::from_secs(1);

    fn run_async_test<F>(future: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
        runtime.block_on(future)
    }

    async fn join_within(handle: JoinHandle<()>) -> AppResult<()> {
        tokio::time::timeout(HANDLER_TIMEOUT, handle)
            .await
            .map_err(|err| {
                AppError::validation(format!("Timed out waiting for shutdown task: {}", err))
            })?
            .map_err(|err| AppError::validation(format!("Shutdown task join error: {}", err)))
    }

    #[test]
    fn signal_handler_exits_on_shutdown() -> AppResult<()> {
        run_async_test(async {
            let (shutdown_tx, _) = shutdown_channel();
            let handle = setup_signal_shutdown_handler(&shutdown_tx);

            if shutdown_tx.send(()).is_err() {
                return Err(AppError::validation("Failed to send shutdown"));
            }
            join_within(handle).await
        })
    }

    #[test]
    fn deadline_broadcasts_shutdown() -> AppResult<()> {
        run_async_test(async {
            let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
            let handle = spawn_deadline(&shutdown_tx, Duration::from_millis(20));

            tokio::time::timeout(HANDLER_TIMEOUT, shutdown_rx.recv())
                .await
                .map_err(|err| AppError::validation(format!("Deadline never fired: {}", err)))?
                .map_err(|err| AppError::validation(format!("Shutdown channel closed: {}", err)))?;
            join_within(handle).await
        })
    }

    #[test]
    fn deadline_exits_early_on_shutdown() -> AppResult<()> {
        run_async_test(async {
            let (shutdown_tx, _) = shutdown_channel();
            let handle = spawn_deadline(&shutdown_tx, Duration::from_secs(3600));

            if shutdown_tx.send(()).is_err() {
                return Err(AppError::validation("Failed to send shutdown"));
            }
            join_within(handle).await
        })
    }
}
