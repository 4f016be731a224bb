//! Fixed-rate frame driver
//!
//! For hosts without their own render loop: ticks the broadcaster on a tokio
//! interval until cancelled.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::broadcast::ScrollBroadcaster;

pub struct FrameDriver;

impl FrameDriver {
    /// Spawn the frame loop. The handle resolves to the number of broadcasts delivered.
    pub fn spawn(
        broadcaster: ScrollBroadcaster,
        frame_interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<u64> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut broadcasts = 0u64;

            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if broadcaster.tick().is_some() {
                            broadcasts += 1;
                        }
                    }
                }
            }

            debug!(broadcasts, "Frame driver stopped");
            broadcasts
        })
    }
}
