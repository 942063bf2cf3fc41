//! # Batch Scheduler
//!
//! Hands accepted batches to a single background worker. `submit` never
//! waits: the batch is either queued immediately or refused when the queue
//! is full. The worker runs batches one at a time in acceptance order.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use super::batch_orchestrator::BatchOrchestrator;
use super::outcome::BatchOutcome;
use crate::constants::events;
use crate::error::{FootprintError, FootprintResult};
use crate::logging::log_batch_operation;
use crate::models::Product;

/// A batch waiting for the worker
#[derive(Debug)]
struct BatchJob {
    calculation_id: Uuid,
    products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct BatchScheduler {
    sender: mpsc::Sender<BatchJob>,
}

impl BatchScheduler {
    /// Start the worker and return the submission handle with the worker's join handle.
    ///
    /// The worker stops once every `BatchScheduler` clone has been dropped and
    /// the queued batches have drained.
    pub fn spawn(orchestrator: Arc<BatchOrchestrator>, capacity: usize) -> (Self, JoinHandle<()>) {
        Self::spawn_with_observer(orchestrator, capacity, None)
    }

    /// Like [`BatchScheduler::spawn`], additionally forwarding every terminal
    /// [`BatchOutcome`] to `observer`
    pub fn spawn_with_observer(
        orchestrator: Arc<BatchOrchestrator>,
        capacity: usize,
        observer: Option<mpsc::UnboundedSender<BatchOutcome>>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(orchestrator, receiver, observer));
        (Self { sender }, worker)
    }

    /// Accept a batch for background execution and return its calculation id.
    ///
    /// Fails without blocking when `capacity` batches are already waiting or
    /// the worker has stopped.
    pub fn submit(&self, products: Vec<Product>) -> FootprintResult<Uuid> {
        let calculation_id = Uuid::new_v4();
        let total = products.len();

        self.sender
            .try_send(BatchJob {
                calculation_id,
                products,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => {
                    warn!(calculation_id = %calculation_id, "Batch queue is full");
                    FootprintError::unexpected("batch queue is full")
                }
                TrySendError::Closed(_) => FootprintError::unexpected("batch worker is not running"),
            })?;

        log_batch_operation(events::BATCH_ACCEPTED, calculation_id, Some(total), "pending", None);
        Ok(calculation_id)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

async fn run_worker(
    orchestrator: Arc<BatchOrchestrator>,
    mut receiver: mpsc::Receiver<BatchJob>,
    observer: Option<mpsc::UnboundedSender<BatchOutcome>>,
) {
    info!("Batch worker started");

    while let Some(job) = receiver.recv().await {
        let outcome = orchestrator
            .run_batch(job.calculation_id, job.products)
            .await;
        debug_assert!(outcome.state.is_terminal());

        info!(
            calculation_id = %outcome.calculation_id,
            state = %outcome.state,
            processed = outcome.processed,
            "Batch finished"
        );

        if let Some(observer) = &observer {
            if observer.send(outcome).is_err() {
                warn!("Batch outcome observer dropped");
            }
        }
    }

    info!("Batch worker stopped");
}
