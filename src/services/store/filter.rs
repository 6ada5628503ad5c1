use serde_json::Value;

use super::{Collection, Document};

/// Selects documents of one collection whose top-level fields equal the
/// given values. Owner scoping is applied by the store itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFilter {
    pub collection: Collection,
    pub field_equals: Vec<(String, Value)>,
}

impl DocumentFilter {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            field_equals: Vec::new(),
        }
    }

    /// Adds an equality condition on a top-level field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field_equals.push((name.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        document.collection == self.collection
            && self
                .field_equals
                .iter()
                .all(|(name, value)| document.body.get(name) == Some(value))
    }
}
