use std::sync::mpsc::{Receiver, TryRecvError};

use super::Document;

/// One discrete, ordered view of the documents matching a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Increases by one with every snapshot delivered to the same subscription.
    pub sequence: u64,
    pub documents: Vec<Document>,
}

/// Receiving end of a store subscription. Dropping it (or passing it to
/// `DocumentStore::unsubscribe`) ends delivery.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<Snapshot>,
}

impl Subscription {
    pub(crate) fn new(id: u64, receiver: Receiver<Snapshot>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next pending snapshot, if any, without blocking.
    pub fn try_next(&self) -> Option<Snapshot> {
        match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drains every pending snapshot and returns the most recent one.
    pub fn latest(&self) -> Option<Snapshot> {
        let mut latest = None;
        while let Some(snapshot) = self.try_next() {
            latest = Some(snapshot);
        }
        latest
    }
}
