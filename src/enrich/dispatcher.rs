//! Background execution of catalog calls.
//!
//! Every call runs on its own short-lived thread and reports back over a single
//! channel. The UI loop drains the channel on each tick, so all state mutation
//! stays on the UI thread. Dropping the dispatcher drops the receiver; late
//! completions then fail to send and are discarded.

use super::{Completion, LookupRequest};
use crate::catalog::CatalogClient;
use crate::model::CatalogError;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Runs catalog calls off the UI thread and collects their completions.
pub struct Dispatcher {
    client: Arc<dyn CatalogClient>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Dispatcher {
    /// Dispatcher issuing calls against `client`.
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { client, tx, rx }
    }

    /// Start the one-shot listing fetch.
    pub fn fetch_reading_log(&self) {
        debug!("dispatching reading log fetch");
        self.spawn(
            "reading-log".to_string(),
            |client| Completion::ReadingLog(client.fetch_reading_log()),
            || Completion::ReadingLog(Err(spawn_failure("reading log"))),
        );
    }

    /// Start one enrichment lookup.
    pub fn dispatch(&self, request: LookupRequest) {
        debug!(request = %request, "dispatching lookup");
        let fallback = request.clone();
        self.spawn(
            "lookup".to_string(),
            move |client| execute(client, request),
            move || failed(fallback),
        );
    }

    /// Take every completion received so far without blocking.
    pub fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Block until the next completion or the timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn spawn<F, E>(&self, name: String, work: F, on_spawn_error: E)
    where
        F: FnOnce(&dyn CatalogClient) -> Completion + Send + 'static,
        E: FnOnce() -> Completion,
    {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new().name(name).spawn(move || {
            let completion = work(client.as_ref());
            // Receiver gone means the dashboard was left; nothing to deliver to.
            let _ = tx.send(completion);
        });

        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn catalog thread");
            let _ = self.tx.send(on_spawn_error());
        }
    }
}

/// Run a lookup synchronously against `client`.
pub fn execute(client: &dyn CatalogClient, request: LookupRequest) -> Completion {
    match request {
        LookupRequest::Author(name) => {
            let result = client.fetch_author(&name);
            Completion::Author { name, result }
        }
        LookupRequest::Rating(work_id) => {
            let result = client.fetch_work_rating(&work_id);
            Completion::Rating { work_id, result }
        }
        LookupRequest::Subject(work_id) => {
            let result = client.fetch_work_detail(&work_id);
            Completion::Subject { work_id, result }
        }
    }
}

fn spawn_failure(what: &str) -> CatalogError {
    CatalogError::Network {
        url: what.to_string(),
        reason: "could not start request thread".to_string(),
    }
}

fn failed(request: LookupRequest) -> Completion {
    let err = spawn_failure(&request.to_string());
    match request {
        LookupRequest::Author(name) => Completion::Author {
            name,
            result: Err(err),
        },
        LookupRequest::Rating(work_id) => Completion::Rating {
            work_id,
            result: Err(err),
        },
        LookupRequest::Subject(work_id) => Completion::Subject {
            work_id,
            result: Err(err),
        },
    }
}
