//! Document store collaborator.
//!
//! Persistence is expressed as a small document API: JSON bodies grouped
//! into collections, keyed by opaque ids, scoped to one owner, with an
//! observer stream of ordered snapshots. `SqliteDocumentStore` is the local
//! implementation backed by the `documents` table.

mod error;
mod filter;
mod records;
mod sqlite;
mod subscription;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

pub use error::StoreError;
pub use filter::DocumentFilter;
pub use records::StoredRecord;
pub use sqlite::SqliteDocumentStore;
pub use subscription::{Snapshot, Subscription};

pub type DocumentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Events,
    Templates,
    Profiles,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Templates => "templates",
            Collection::Profiles => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored JSON body together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub collection: Collection,
    pub owner: String,
    pub body: Value,
}

impl Document {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }

    /// Decodes a typed record and stamps it with this document's id.
    pub fn into_record<T: StoredRecord>(self) -> Result<T, StoreError> {
        let mut record: T = serde_json::from_value(self.body)?;
        record.set_id(self.id);
        Ok(record)
    }
}

pub trait DocumentStore {
    /// Owner every document of this store belongs to.
    fn owner(&self) -> &str;

    fn create(&self, collection: Collection, data: Value) -> Result<DocumentId, StoreError>;

    /// Merges the top-level fields of `fields` into the stored body.
    fn update(&self, collection: Collection, id: DocumentId, fields: Value)
        -> Result<(), StoreError>;

    fn delete(&self, collection: Collection, id: DocumentId) -> Result<(), StoreError>;

    fn get(&self, collection: Collection, id: DocumentId) -> Result<Document, StoreError>;

    /// Matching documents in creation order.
    fn query(&self, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError>;

    /// Delivers the current matching set immediately, then a fresh snapshot
    /// after every mutation of the filter's collection.
    fn subscribe(&self, filter: DocumentFilter) -> Result<Subscription, StoreError>;

    fn unsubscribe(&self, subscription: Subscription);
}

/// Queries and decodes typed records in one step.
pub fn query_records<T: StoredRecord>(
    store: &dyn DocumentStore,
    filter: &DocumentFilter,
) -> Result<Vec<T>, StoreError> {
    store
        .query(filter)?
        .into_iter()
        .map(Document::into_record)
        .collect()
}

/// Decodes every document of a snapshot, skipping (and logging) malformed ones.
pub fn decode_snapshot<T: StoredRecord>(snapshot: &Snapshot) -> Vec<T> {
    snapshot
        .documents
        .iter()
        .cloned()
        .filter_map(|doc| {
            let id = doc.id;
            match doc.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping malformed document {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}
