//! Single-owner detection worker.
//!
//! Runs a [`ShakeMonitor`] inside one tokio task so that samples from the
//! platform sensor callback are processed strictly in arrival order, off the
//! caller's thread. Triggers are forwarded on an mpsc channel.
//!
//! Stopping the worker is prioritised over pending samples and over trigger
//! delivery: once [`DetectionHandle::stop`] is called, samples still queued
//! are dropped and never touch the discarded session, even if nobody is
//! reading the trigger channel.

use crate::session::{MotionError, ShakeMonitor};
use safeguard_core::{SensorSample, ShakeThresholds, TriggerEvent};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Queue depth between the sensor callback and the worker
pub const DEFAULT_SAMPLE_BUFFER: usize = 256;

/// Handle to a running detection worker
#[derive(Debug)]
pub struct DetectionHandle {
    samples: mpsc::Sender<SensorSample>,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
}

/// Spawn a worker with a fresh detection session
pub fn spawn_detection(
    thresholds: ShakeThresholds,
    buffer: usize,
) -> (DetectionHandle, mpsc::Receiver<TriggerEvent>) {
    let (sample_tx, sample_rx) = mpsc::channel(buffer.max(1));
    let (trigger_tx, trigger_rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = oneshot::channel();

    let mut monitor = ShakeMonitor::new(thresholds);
    monitor.enable();

    let task = tokio::spawn(run(monitor, sample_rx, trigger_tx, stop_rx));

    (
        DetectionHandle {
            samples: sample_tx,
            stop: Some(stop_tx),
            task,
        },
        trigger_rx,
    )
}

async fn run(
    mut monitor: ShakeMonitor,
    mut samples: mpsc::Receiver<SensorSample>,
    triggers: mpsc::Sender<TriggerEvent>,
    mut stop: oneshot::Receiver<()>,
) -> u64 {
    let mut processed = 0u64;
    loop {
        let sample = tokio::select! {
            biased;
            _ = &mut stop => break,
            next = samples.recv() => match next {
                Some(sample) => sample,
                None => break,
            },
        };
        processed += 1;

        let Some(event) = monitor.on_sample(&sample) else {
            continue;
        };
        // a full trigger queue must not keep stop waiting
        tokio::select! {
            biased;
            _ = &mut stop => break,
            sent = triggers.send(event) => {
                if sent.is_err() {
                    debug!("Trigger receiver dropped, stopping detection worker");
                    break;
                }
            }
        }
    }
    monitor.disable();
    info!(processed, "Detection worker stopped");
    processed
}

impl DetectionHandle {
    /// Queue a sample for processing.
    ///
    /// Returns `false` if the worker has already stopped.
    pub async fn feed(&self, sample: SensorSample) -> bool {
        self.samples.send(sample).await.is_ok()
    }

    /// Non-blocking variant of [`feed`](Self::feed) for sensor callbacks.
    ///
    /// Returns `false` if the queue is full or the worker has stopped.
    pub fn try_feed(&self, sample: SensorSample) -> bool {
        self.samples.try_send(sample).is_ok()
    }

    /// Stop the worker and wait for it to release its session.
    ///
    /// Returns the number of samples the session processed, or
    /// [`MotionError::WorkerFailed`] if the worker task panicked.
    pub async fn stop(mut self) -> Result<u64, MotionError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.await.map_err(|e| {
            warn!(error = %e, "Detection worker failed");
            MotionError::WorkerFailed(e.to_string())
        })
    }
}
