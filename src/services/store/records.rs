use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Collection, DocumentId};
use crate::models::event::ScheduleEvent;
use crate::models::template::EventTemplate;

/// A model persisted as one document of a fixed collection.
pub trait StoredRecord: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn set_id(&mut self, id: DocumentId);
}

impl StoredRecord for ScheduleEvent {
    const COLLECTION: Collection = Collection::Events;

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}

impl StoredRecord for EventTemplate {
    const COLLECTION: Collection = Collection::Templates;

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}
