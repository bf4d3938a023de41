//! Debounced persistence of document snapshots
//!
//! Every scheduled snapshot restarts the quiet period; when it elapses only the
//! most recent snapshot is written.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::store::DocumentStore;
use crate::error::{Result, ResumeCrafterError};
use crate::model::ResumeDocument;

enum Command {
    Schedule(Arc<ResumeDocument>),
    Flush(oneshot::Sender<Result<bool>>),
}

pub struct SaveScheduler {
    commands: mpsc::UnboundedSender<Command>,
    worker: JoinHandle<()>,
}

impl SaveScheduler {
    /// Start the save worker on the current tokio runtime
    pub fn spawn(store: Arc<dyn DocumentStore>, debounce: Duration) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(store, debounce, receiver));
        Self { commands, worker }
    }

    pub fn schedule(&self, document: Arc<ResumeDocument>) {
        if self.commands.send(Command::Schedule(document)).is_err() {
            warn!("Save worker has stopped; dropping scheduled save");
        }
    }

    /// Persist the pending snapshot now; `Ok(false)` when nothing was pending
    pub async fn flush(&self) -> Result<bool> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Flush(reply))
            .map_err(|_| ResumeCrafterError::Storage("save worker has stopped".to_string()))?;

        response
            .await
            .map_err(|_| ResumeCrafterError::Storage("save worker dropped the flush request".to_string()))?
    }

    /// Stop the worker after writing any pending snapshot
    pub async fn shutdown(self) -> Result<()> {
        drop(self.commands);
        self.worker
            .await
            .map_err(|e| ResumeCrafterError::Storage(format!("save worker failed: {}", e)))
    }
}

fn persist(store: &dyn DocumentStore, pending: &mut Option<Arc<ResumeDocument>>) -> Result<bool> {
    let Some(document) = pending.take() else {
        return Ok(false);
    };

    match store.save(&document) {
        Ok(()) => {
            debug!("Persisted document snapshot");
            Ok(true)
        }
        Err(e) => {
            // Keep it so the next flush retries
            *pending = Some(document);
            Err(e)
        }
    }
}

async fn run_worker(
    store: Arc<dyn DocumentStore>,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    let mut pending: Option<Arc<ResumeDocument>> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let wake_at = deadline.unwrap_or_else(Instant::now);

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Schedule(document)) => {
                    pending = Some(document);
                    deadline = Some(Instant::now() + debounce);
                }
                Some(Command::Flush(reply)) => {
                    deadline = None;
                    let _ = reply.send(persist(store.as_ref(), &mut pending));
                }
                None => {
                    if let Err(e) = persist(store.as_ref(), &mut pending) {
                        warn!("Final save failed: {}", e);
                    }
                    break;
                }
            },
            _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                deadline = None;
                if let Err(e) = persist(store.as_ref(), &mut pending) {
                    warn!("Debounced save failed: {}", e);
                }
            }
        }
    }
}
