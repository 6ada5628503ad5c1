use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::sync::mpsc::{self, Sender};

use super::{
    Collection, Document, DocumentFilter, DocumentId, DocumentStore, Snapshot, StoreError,
    Subscription,
};
use crate::services::database::Database;

struct Subscriber {
    id: u64,
    filter: DocumentFilter,
    sender: Sender<Snapshot>,
    sequence: u64,
}

/// Local document store over the `documents` table, bound to one owner.
pub struct SqliteDocumentStore {
    db: Database,
    owner: String,
    subscribers: RefCell<Vec<Subscriber>>,
    next_subscription: Cell<u64>,
}

impl SqliteDocumentStore {
    pub fn new(db: Database, owner: impl Into<String>) -> Self {
        Self {
            db,
            owner: owner.into(),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(1),
        }
    }

    /// Opens the database at `path`, creating the schema when needed.
    pub fn open(path: &str, owner: impl Into<String>) -> Result<Self> {
        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(Self::new(db, owner))
    }

    pub fn in_memory(owner: impl Into<String>) -> Result<Self> {
        Self::open(":memory:", owner)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn load(&self, collection: Collection, id: DocumentId) -> Result<Document, StoreError> {
        let row: Option<(String, String)> = self
            .db
            .connection()
            .query_row(
                "SELECT owner, body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (owner, body) = row.ok_or(StoreError::NotFound { collection, id })?;
        if owner != self.owner {
            return Err(StoreError::PermissionDenied);
        }

        Ok(Document {
            id,
            collection,
            owner,
            body: serde_json::from_str(&body)?,
        })
    }

    fn notify(&self, collection: Collection) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain_mut(|subscriber| {
            if subscriber.filter.collection != collection {
                return true;
            }
            match self.query(&subscriber.filter) {
                Ok(documents) => {
                    subscriber.sequence += 1;
                    let snapshot = Snapshot {
                        sequence: subscriber.sequence,
                        documents,
                    };
                    subscriber.sender.send(snapshot).is_ok()
                }
                Err(e) => {
                    log::error!("Failed to refresh subscription {}: {}", subscriber.id, e);
                    true
                }
            }
        });
    }
}

fn require_object(data: &Value) -> Result<(), StoreError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(StoreError::Other(
            "Document body must be a JSON object".to_string(),
        ))
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn create(&self, collection: Collection, data: Value) -> Result<DocumentId, StoreError> {
        require_object(&data)?;
        self.db.connection().execute(
            "INSERT INTO documents (collection, owner, body) VALUES (?1, ?2, ?3)",
            params![collection.as_str(), self.owner, data.to_string()],
        )?;
        let id = self.db.connection().last_insert_rowid();
        log::debug!("Created {} document {}", collection, id);

        self.notify(collection);
        Ok(id)
    }

    fn update(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Value,
    ) -> Result<(), StoreError> {
        require_object(&fields)?;
        let mut document = self.load(collection, id)?;

        if let (Some(body), Some(fields)) = (document.body.as_object_mut(), fields.as_object()) {
            for (key, value) in fields {
                body.insert(key.clone(), value.clone());
            }
        }

        self.db.connection().execute(
            "UPDATE documents SET body = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
            params![document.body.to_string(), id],
        )?;
        log::debug!("Updated {} document {}", collection, id);

        self.notify(collection);
        Ok(())
    }

    fn delete(&self, collection: Collection, id: DocumentId) -> Result<(), StoreError> {
        self.load(collection, id)?;
        self.db
            .connection()
            .execute("DELETE FROM documents WHERE id = ?1", params![id])?;
        log::debug!("Deleted {} document {}", collection, id);

        self.notify(collection);
        Ok(())
    }

    fn get(&self, collection: Collection, id: DocumentId) -> Result<Document, StoreError> {
        self.load(collection, id)
    }

    fn query(&self, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError> {
        let mut stmt = self.db.connection().prepare(
            "SELECT id, body FROM documents
             WHERE collection = ?1 AND owner = ?2
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![filter.collection.as_str(), self.owner], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let document = Document {
                id,
                collection: filter.collection,
                owner: self.owner.clone(),
                body: serde_json::from_str(&body)?,
            };
            if filter.matches(&document) {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    fn subscribe(&self, filter: DocumentFilter) -> Result<Subscription, StoreError> {
        let documents = self.query(&filter)?;
        let (sender, receiver) = mpsc::channel();

        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);

        // The receiver is alive here, so the initial send cannot fail.
        let _ = sender.send(Snapshot {
            sequence: 1,
            documents,
        });

        self.subscribers.borrow_mut().push(Subscriber {
            id,
            filter,
            sender,
            sequence: 1,
        });
        Ok(Subscription::new(id, receiver))
    }

    fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers
            .borrow_mut()
            .retain(|subscriber| subscriber.id != subscription.id());
    }
}
