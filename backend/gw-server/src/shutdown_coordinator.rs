use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::broadcast;

const NONE_REQUESTED: u8 = 0;

/// What the process does once the server has drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    /// Exit
    Stop,
    /// Re-exec the same binary with the same arguments
    Restart,
}

impl ShutdownKind {
    /// Higher rank wins when several kinds are requested; stop beats restart.
    fn rank(self) -> u8 {
        match self {
            ShutdownKind::Restart => 1,
            ShutdownKind::Stop => 2,
        }
    }

    fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(ShutdownKind::Restart),
            2 => Some(ShutdownKind::Stop),
            _ => None,
        }
    }
}

/// Graceful shutdown coordinator
///
/// Every kind ever requested is folded into one sticky value, so a restart
/// arriving after a stop can not turn that stop into a re-exec.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<ShutdownKind>,
    requested: Arc<AtomicU8>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            shutdown_tx,
            requested: Arc::new(AtomicU8::new(NONE_REQUESTED)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownKind> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (called from the signal listener)
    pub fn shutdown(&self, kind: ShutdownKind) {
        let previous = self.requested.fetch_max(kind.rank(), Ordering::SeqCst);
        if let Some(earlier) = ShutdownKind::from_rank(previous)
            && earlier.rank() >= kind.rank()
        {
            log::info!("Shutdown requested ({kind:?}), keeping earlier {earlier:?}");
        } else {
            log::info!("Shutdown requested ({kind:?}), notifying all subsystems");
        }
        let _ = self.shutdown_tx.send(kind);
    }

    /// Strongest kind requested so far
    pub fn requested(&self) -> Option<ShutdownKind> {
        ShutdownKind::from_rank(self.requested.load(Ordering::SeqCst))
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a [`ShutdownCoordinator`]
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<ShutdownKind>,
    requested: Arc<AtomicU8>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
            requested: coordinator.requested.clone(),
        }
    }

    /// Wait for the shutdown signal.
    ///
    /// A closed channel means every coordinator is gone, which is treated as
    /// a plain stop.
    pub async fn wait(&mut self) -> ShutdownKind {
        loop {
            match self.shutdown_rx.recv().await {
                Ok(kind) => return self.resolve(kind),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return ShutdownKind::Stop,
            }
        }
    }

    /// Non-blocking check; consumes the signal if present
    pub fn poll_shutdown(&mut self) -> Option<ShutdownKind> {
        loop {
            match self.shutdown_rx.try_recv() {
                Ok(kind) => return Some(self.resolve(kind)),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    fn resolve(&self, received: ShutdownKind) -> ShutdownKind {
        ShutdownKind::from_rank(self.requested.load(Ordering::SeqCst)).unwrap_or(received)
    }
}
