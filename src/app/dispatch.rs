use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::state::Ticket;
use crate::client::{ClientError, ReportBackend, ReportBlob, ReportRequest};

#[derive(Debug)]
pub struct Finished {
    pub ticket: Ticket,
    pub outcome: Result<ReportBlob, ClientError>,
}

/// Runs backend requests on the tokio runtime and hands the outcomes back to
/// the UI thread.
pub struct Dispatcher {
    backend: Arc<dyn ReportBackend>,
    runtime: Handle,
    sender: Sender<Finished>,
    receiver: Receiver<Finished>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ReportBackend>, runtime: Handle) -> Self {
        let (sender, receiver) = channel();
        Self {
            backend,
            runtime,
            sender,
            receiver,
        }
    }

    /// `on_done` runs after the outcome is queued, typically to wake the UI.
    pub fn dispatch<F>(&self, ticket: Ticket, request: ReportRequest, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();
        debug!(ticket, kind = ?request.kind(), "dispatching report request");

        self.runtime.spawn(async move {
            let outcome = backend.generate(&request).await;
            if sender.send(Finished { ticket, outcome }).is_err() {
                warn!(ticket, "report finished after the window closed");
            }
            on_done();
        });
    }

    pub fn poll(&self) -> Vec<Finished> {
        self.receiver.try_iter().collect()
    }
}
