//! The store actor: single owner of the document collection.
//!
//! All mutation and query traffic funnels through one task via two bounded
//! channels, so the task handles exactly one request at a time and no query
//! can observe a half-applied insert. Which of two concurrent submissions
//! from different callers wins is whichever the select takes first;
//! independent callers get no cross-channel ordering.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use logpile_core::Document;

use crate::error::StoreError;
use crate::search::{evaluate, SearchRequest};

/// Rendezvous-style hand-off: a sender parks until the actor takes its message.
const CHANNEL_CAPACITY: usize = 1;

/// A search plus the channel its result is returned on.
struct QueryRequest {
    search: SearchRequest,
    respond_to: oneshot::Sender<Vec<Document>>,
}

/// Cloneable handle to the store actor.
#[derive(Clone)]
pub struct StoreHandle {
    insert_tx: mpsc::Sender<Document>,
    query_tx: mpsc::Sender<QueryRequest>,
}

impl StoreHandle {
    /// Append one document to the collection.
    ///
    /// Fire-and-forget: resolves once the actor has accepted the message,
    /// with no acknowledgment of when it becomes visible to other callers.
    pub async fn insert(&self, document: Document) -> Result<(), StoreError> {
        self.insert_tx
            .send(document)
            .await
            .map_err(|_| StoreError::Closed)
    }

    /// Run one search against the current collection and wait for the result.
    pub async fn search(&self, search: SearchRequest) -> Result<Vec<Document>, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.query_tx
            .send(QueryRequest {
                search,
                respond_to: tx,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }
}

/// Spawn the store task and return a handle to it.
///
/// The task runs until every handle is dropped. Documents live for the
/// process lifetime; there is no eviction or compaction.
pub fn spawn() -> StoreHandle {
    let (insert_tx, insert_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (query_tx, query_rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(run(insert_rx, query_rx));

    StoreHandle {
        insert_tx,
        query_tx,
    }
}

async fn run(
    mut insert_rx: mpsc::Receiver<Document>,
    mut query_rx: mpsc::Receiver<QueryRequest>,
) {
    let mut documents: Vec<Document> = Vec::new();

    loop {
        tokio::select! {
            Some(document) = insert_rx.recv() => {
                documents.push(document);
            }
            Some(request) = query_rx.recv() => {
                let hits = evaluate(&documents, &request.search);
                debug!(total = documents.len(), hits = hits.len(), "search answered");
                // Caller may have gone away; nothing to do about it.
                let _ = request.respond_to.send(hits);
            }
            else => break,
        }
    }

    debug!(total = documents.len(), "store task stopped");
}
