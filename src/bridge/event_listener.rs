use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::warn;

use super::NativeValueUpdate;
use crate::EventChannelConfig;
use crate::EventRouter;

/// Inbound half of the bridge: receives update events emitted by the native
/// driver and fans them into the event router.
///
/// The router's `dispatch` is the single synchronization point for inbound
/// delivery; the intake loop itself holds no state beyond the channel.
pub struct BridgeEventListener {
    router: Arc<EventRouter>,
}

/// Handle to a spawned intake loop.
///
/// Cloned senders from [`sender`](BridgeEventHandle::sender) are handed to
/// the native driver's emit side; [`shutdown`](BridgeEventHandle::shutdown)
/// stops the loop after draining events that are already queued.
pub struct BridgeEventHandle {
    event_tx: mpsc::Sender<NativeValueUpdate>,
    shutdown_tx: watch::Sender<()>,
    join_handle: JoinHandle<()>,
}

impl BridgeEventHandle {
    pub fn sender(&self) -> mpsc::Sender<NativeValueUpdate> {
        self.event_tx.clone()
    }

    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        // Drop our own sender so a draining loop can observe channel close.
        drop(self.event_tx);
        if let Err(e) = self.join_handle.await {
            warn!("bridge event intake task failed: {:?}", e);
        }
    }
}

impl BridgeEventListener {
    pub fn new(router: Arc<EventRouter>) -> Self {
        Self { router }
    }

    /// Spawns the intake loop on the current tokio runtime.
    pub fn spawn(
        self,
        config: &EventChannelConfig,
    ) -> BridgeEventHandle {
        let (event_tx, event_rx) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(());

        let router = self.router;
        let join_handle = tokio::spawn(async move {
            Self::run(router, event_rx, shutdown_rx).await;
        });

        BridgeEventHandle {
            event_tx,
            shutdown_tx,
            join_handle,
        }
    }

    async fn run(
        router: Arc<EventRouter>,
        mut event_rx: mpsc::Receiver<NativeValueUpdate>,
        mut shutdown_rx: watch::Receiver<()>,
    ) {
        debug!("bridge event intake started");
        loop {
            tokio::select! {
                // Queued events drain before a shutdown signal is honored,
                // so updates accepted by the channel are never dropped.
                biased;

                maybe_update = event_rx.recv() => {
                    match maybe_update {
                        Some(update) => router.dispatch(update.id, update.value),
                        None => {
                            debug!("all bridge event senders dropped, intake stopping");
                            break;
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    debug!("bridge event intake received shutdown signal");
                    break;
                }
            }
        }
    }
}
