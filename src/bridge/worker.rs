//! Background execution of backend calls.
//!
//! Each request runs on its own short-lived thread and reports back over an
//! mpsc channel. The event loop drains the channel on every tick, so the UI
//! never blocks on the network.

use super::client::{ChatApi, QueryRequest, QueryResponse};
use super::Ticket;
use crate::model::{BridgeError, CourseStats};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

/// Result of a background backend call.
#[derive(Debug)]
pub enum BridgeEvent {
    /// A query finished (successfully or not).
    QueryFinished {
        /// Ticket the query was started with.
        ticket: Ticket,
        /// Backend answer or failure.
        result: Result<QueryResponse, BridgeError>,
    },
    /// The course statistics request finished.
    CoursesLoaded(Result<CourseStats, BridgeError>),
}

/// Runs [`ChatApi`] calls off the UI thread.
#[derive(Debug)]
pub struct Worker {
    api: Arc<dyn ChatApi>,
    tx: Sender<BridgeEvent>,
    rx: Receiver<BridgeEvent>,
}

impl Worker {
    /// Create a worker for `api`.
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { api, tx, rx }
    }

    /// Send `request` in the background; the result arrives as
    /// [`BridgeEvent::QueryFinished`] carrying `ticket`.
    pub fn dispatch_query(&self, ticket: Ticket, request: QueryRequest) {
        let api = Arc::clone(&self.api);
        self.spawn(
            "coursechat-query",
            move || BridgeEvent::QueryFinished {
                ticket,
                result: api.query(&request),
            },
            move |err| BridgeEvent::QueryFinished {
                ticket,
                result: Err(err),
            },
        );
    }

    /// Fetch course statistics in the background.
    pub fn dispatch_courses(&self) {
        let api = Arc::clone(&self.api);
        self.spawn(
            "coursechat-courses",
            move || BridgeEvent::CoursesLoaded(api.courses()),
            |err| BridgeEvent::CoursesLoaded(Err(err)),
        );
    }

    /// Next finished call, if any. Never blocks.
    pub fn try_recv(&self) -> Option<BridgeEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished call.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<BridgeEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn spawn<F, E>(&self, name: &str, job: F, on_spawn_error: E)
    where
        F: FnOnce() -> BridgeEvent + Send + 'static,
        E: FnOnce(BridgeError) -> BridgeEvent,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
            // Receiver is gone only when the app is shutting down.
            let _ = tx.send(job());
        });

        if let Err(e) = spawned {
            error!(thread = name, error = %e, "Failed to spawn backend worker");
            // Input stays disabled until the pending ticket resolves.
            let err = BridgeError::Transport(format!("could not start {name}: {e}"));
            let _ = self.tx.send(on_spawn_error(err));
        } else {
            debug!(thread = name, "Backend worker started");
        }
    }
}
