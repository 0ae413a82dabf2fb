//! Background audio energy sampler
//!
//! Long-lived task polling an [`EnergySource`] at a fixed rate and
//! publishing the latest estimate through a watch channel. The frame
//! loop reads the value without any handshake; the sampler stops
//! deterministically when signalled, before the serial link is torn
//! down.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::EnergySource;

/// Handle to the running sampler task.
pub struct AudioSampler {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AudioSampler {
    /// Spawn the sampler; returns the handle and the level receiver.
    pub fn spawn<E>(mut source: E, period: Duration) -> (Self, watch::Receiver<f32>)
    where
        E: EnergySource + Send + 'static,
    {
        let (level_tx, level_rx) = watch::channel(0.0f32);
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            debug!("audio sampler started");
            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        let level = source.current_energy().clamp(0.0, 1.0);
                        if level_tx.send(level).is_err() {
                            // Nobody is listening anymore
                            break;
                        }
                    }
                }
            }
            debug!("audio sampler stopped");
        });

        (Self { stop_tx, handle }, level_rx)
    }

    /// Signal the task and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.handle.await;
    }
}
