// Event Template service
// CRUD operations for activity templates kept in the document store

use anyhow::{Context, Result};

use crate::models::template::EventTemplate;
use crate::services::store::{query_records, Collection, DocumentFilter, DocumentId, DocumentStore};

/// Templates of one category, in the order they were created.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateGroup {
    pub category: String,
    pub templates: Vec<EventTemplate>,
}

pub struct TemplateService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> TemplateService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Filter selecting one child's templates.
    pub fn child_filter(child_id: &str) -> DocumentFilter {
        DocumentFilter::new(Collection::Templates).field("childId", child_id)
    }

    /// Create a new template
    pub fn create(&self, mut template: EventTemplate) -> Result<EventTemplate> {
        template.validate().map_err(|e| anyhow::anyhow!(e))?;
        template.user_id = self.store.owner().to_string();

        let body = serde_json::to_value(&template).context("Failed to encode template")?;
        let id = self
            .store
            .create(Collection::Templates, body)
            .context("Failed to insert template")?;
        template.id = Some(id);

        log::info!("Created template '{}' ({} min)", template.title, template.duration_minutes);
        Ok(template)
    }

    /// Get a template by ID
    pub fn get_by_id(&self, id: DocumentId) -> Result<EventTemplate> {
        let template = self
            .store
            .get(Collection::Templates, id)
            .context("Template not found")?
            .into_record()?;
        Ok(template)
    }

    /// Update an existing template
    pub fn update(&self, template: &EventTemplate) -> Result<()> {
        template.validate().map_err(|e| anyhow::anyhow!(e))?;

        let id = template
            .id
            .ok_or_else(|| anyhow::anyhow!("Template ID is required for update"))?;

        let body = serde_json::to_value(template).context("Failed to encode template")?;
        self.store
            .update(Collection::Templates, id, body)
            .context("Failed to update template")?;

        log::info!("Updated template {}", id);
        Ok(())
    }

    /// Delete a template by ID. Events created from it are left in place.
    pub fn delete(&self, id: DocumentId) -> Result<()> {
        self.store
            .delete(Collection::Templates, id)
            .context("Failed to delete template")?;

        log::info!("Deleted template {}", id);
        Ok(())
    }

    pub fn list_for_child(&self, child_id: &str) -> Result<Vec<EventTemplate>> {
        query_records(self.store, &Self::child_filter(child_id))
            .context("Failed to fetch templates")
    }
}

/// Groups templates by category for the palette, keeping only titles that
/// contain `search` (case-insensitive). Empty groups are dropped.
pub fn grouped_by_category(templates: &[EventTemplate], search: &str) -> Vec<TemplateGroup> {
    let needle = search.trim().to_lowercase();
    let mut groups: Vec<TemplateGroup> = Vec::new();

    for template in templates {
        if !needle.is_empty() && !template.title.to_lowercase().contains(&needle) {
            continue;
        }
        match groups.iter_mut().find(|g| g.category == template.category) {
            Some(group) => group.templates.push(template.clone()),
            None => groups.push(TemplateGroup {
                category: template.category.clone(),
                templates: vec![template.clone()],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::SqliteDocumentStore;
    use pretty_assertions::assert_eq;

    fn template(title: &str, category: &str) -> EventTemplate {
        EventTemplate::builder()
            .child_id("child1")
            .title(title)
            .duration_minutes(60)
            .category(category)
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        let service = TemplateService::new(&store);

        let created = service.create(template("Taekwondo", "Sports")).unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.user_id, "local");

        let loaded = service.get_by_id(created.id.unwrap()).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        let service = TemplateService::new(&store);
        let invalid = EventTemplate::new("child1", "Nap", 0);
        assert!(service.create(invalid).is_err());
        assert!(service.list_for_child("child1").unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        let service = TemplateService::new(&store);

        let mut created = service.create(template("Piano", "Academy")).unwrap();
        created.duration_minutes = 40;
        service.update(&created).unwrap();
        assert_eq!(service.get_by_id(created.id.unwrap()).unwrap().duration_minutes, 40);

        service.delete(created.id.unwrap()).unwrap();
        assert!(service.get_by_id(created.id.unwrap()).is_err());
    }

    #[test]
    fn test_update_requires_id() {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        let service = TemplateService::new(&store);
        assert!(service.update(&template("Piano", "Academy")).is_err());
    }

    #[test]
    fn test_list_for_child_scopes_by_child() {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        let service = TemplateService::new(&store);
        service.create(template("Piano", "Academy")).unwrap();
        let mut other = template("Chess", "Play");
        other.child_id = "c2".into();
        service.create(other).unwrap();

        let titles: Vec<String> = service
            .list_for_child("child1")
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Piano".to_string()]);
    }

    #[test]
    fn test_grouped_by_category() {
        let templates = vec![
            template("Math", "Academy"),
            template("Soccer", "Sports"),
            template("English", "Academy"),
        ];
        let groups = grouped_by_category(&templates, "");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Academy");
        assert_eq!(groups[0].templates.len(), 2);
        assert_eq!(groups[1].category, "Sports");
    }

    #[test]
    fn test_grouped_search_drops_empty_groups() {
        let templates = vec![template("Math", "Academy"), template("Soccer", "Sports")];
        let groups = grouped_by_category(&templates, "SOC");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].templates[0].title, "Soccer");
        assert!(grouped_by_category(&templates, "zzz").is_empty());
    }
}
