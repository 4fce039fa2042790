//! Cancellable periodic task.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to a task that runs a callback on a fixed period.
///
/// The first tick fires one full period after spawning. The task ends when
/// the callback returns [`ControlFlow::Break`], when [`cancel`](Self::cancel)
/// is called, or when the handle is dropped. A callback already running is
/// allowed to finish; cancellation takes effect before the next tick.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl ScheduledTask {
    /// Spawns `tick` every `period` on the current tokio runtime.
    pub fn every<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let cancellation_token = CancellationToken::new();
        let token = cancellation_token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    () = token.cancelled() => {
                        debug!("Scheduled task cancelled");
                        break;
                    }

                    _ = interval.tick() => {
                        if tick().await.is_break() {
                            debug!("Scheduled task completed");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            handle,
            cancellation_token,
        }
    }

    /// Stops the task before its next tick.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Returns true until the task is cancelled or has completed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancellation_token.is_cancelled() && !self.handle.is_finished()
    }

    /// Cancels the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.cancellation_token.cancel();
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}
