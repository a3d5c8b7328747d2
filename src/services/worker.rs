use crate::services::revocation::RevocationStore;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, sleep};

/// Periodically drops expired entries from the token blacklist
pub struct RevocationSweeper {
    revocations: Arc<dyn RevocationStore>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl RevocationSweeper {
    pub fn new(
        revocations: Arc<dyn RevocationStore>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            revocations,
            interval,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("🚀 Revocation sweeper started ({:?} interval)", self.interval);

        loop {
            tokio::select! {
                _ = self.shutdown.changed() => {
                    tracing::info!("🛑 Revocation sweeper shutting down");
                    break;
                }
                _ = sleep(self.interval) => {
                    self.sweep().await;
                }
            }
        }
    }

    async fn sweep(&self) {
        let purged = self.revocations.purge_expired().await;
        if purged > 0 {
            tracing::info!("🧹 Purged {} expired revoked tokens", purged);
        }
    }
}
