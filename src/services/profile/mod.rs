// Profile service
// Household profile: children, categories and per-child school times

use anyhow::{Context, Result};
use serde_json::json;

use crate::models::child::{Child, UserProfile};
use crate::models::school_time::{self, SchoolTime};
use crate::models::validation::{require_text, ValidationError};
use crate::services::store::{Collection, DocumentFilter, DocumentId, DocumentStore};

/// The owner's profile together with its document id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub id: DocumentId,
    pub profile: UserProfile,
}

pub struct ProfileService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ProfileService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn filter() -> DocumentFilter {
        DocumentFilter::new(Collection::Profiles)
    }

    /// Loads the owner's profile, creating the default one on first run.
    pub fn ensure_profile(&self, email: &str) -> Result<ProfileRecord> {
        if let Some(record) = self.load()? {
            return Ok(record);
        }

        let profile = UserProfile::initial(self.store.owner(), email);
        let body = serde_json::to_value(&profile).context("Failed to encode profile")?;
        let id = self
            .store
            .create(Collection::Profiles, body)
            .context("Failed to create profile")?;

        log::info!("Created default profile for {}", self.store.owner());
        Ok(ProfileRecord { id, profile })
    }

    pub fn load(&self) -> Result<Option<ProfileRecord>> {
        let documents = self
            .store
            .query(&Self::filter())
            .context("Failed to load profile")?;

        match documents.into_iter().next() {
            Some(document) => {
                let profile = document.decode().context("Malformed profile document")?;
                Ok(Some(ProfileRecord {
                    id: document.id,
                    profile,
                }))
            }
            None => Ok(None),
        }
    }

    fn require(&self) -> Result<ProfileRecord> {
        self.load()?
            .ok_or_else(|| anyhow::anyhow!("Profile has not been created yet"))
    }

    fn save_children(&self, record: &ProfileRecord) -> Result<()> {
        self.store
            .update(
                Collection::Profiles,
                record.id,
                json!({ "children": record.profile.children }),
            )
            .context("Failed to save children")?;
        Ok(())
    }

    fn save_categories(&self, record: &ProfileRecord) -> Result<()> {
        self.store
            .update(
                Collection::Profiles,
                record.id,
                json!({ "customCategories": record.profile.custom_categories }),
            )
            .context("Failed to save categories")?;
        Ok(())
    }

    pub fn add_child(&self, name: &str) -> Result<Child> {
        require_text(name, ValidationError::EmptyName).map_err(|e| anyhow::anyhow!(e))?;
        let mut record = self.require()?;

        let mut id = format!("c{}", chrono::Utc::now().timestamp_millis());
        while record.profile.child(&id).is_some() {
            id.push('x');
        }

        let child = Child::new(id, name.trim());
        record.profile.children.push(child.clone());
        self.save_children(&record)?;

        log::info!("Added child '{}' ({})", child.name, child.id);
        Ok(child)
    }

    /// Removes a child. The last remaining child cannot be removed.
    pub fn remove_child(&self, child_id: &str) -> Result<()> {
        let mut record = self.require()?;
        if record.profile.children.len() <= 1 {
            log::warn!("Refused to remove the last child");
            return Err(anyhow::anyhow!(ValidationError::LastChild));
        }

        let before = record.profile.children.len();
        record.profile.children.retain(|c| c.id != child_id);
        if record.profile.children.len() == before {
            anyhow::bail!("Unknown child '{}'", child_id);
        }

        self.save_children(&record)?;
        log::info!("Removed child {}", child_id);
        Ok(())
    }

    pub fn add_category(&self, name: &str) -> Result<()> {
        let name = name.trim();
        require_text(name, ValidationError::EmptyName).map_err(|e| anyhow::anyhow!(e))?;
        let mut record = self.require()?;

        if record.profile.custom_categories.iter().any(|c| c == name) {
            return Err(anyhow::anyhow!(ValidationError::DuplicateCategory(
                name.to_string()
            )));
        }

        record.profile.custom_categories.push(name.to_string());
        self.save_categories(&record)?;
        log::info!("Added category '{}'", name);
        Ok(())
    }

    pub fn remove_category(&self, name: &str) -> Result<()> {
        let mut record = self.require()?;
        record.profile.custom_categories.retain(|c| c != name);
        self.save_categories(&record)?;
        log::info!("Removed category '{}'", name);
        Ok(())
    }

    /// Replaces a child's school times wholesale after validating the set.
    pub fn update_school_times(&self, child_id: &str, times: Vec<SchoolTime>) -> Result<()> {
        school_time::validate_set(&times).map_err(|e| anyhow::anyhow!(e))?;
        let mut record = self.require()?;

        let child = record
            .profile
            .child_mut(child_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown child '{}'", child_id))?;
        child.school_times = times;

        self.save_children(&record)?;
        log::info!("Saved school times for {}", child_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::DEFAULT_CATEGORIES;
    use crate::models::day::DayOfWeek;
    use crate::services::store::SqliteDocumentStore;

    fn setup() -> SqliteDocumentStore {
        let store = SqliteDocumentStore::in_memory("local").unwrap();
        ProfileService::new(&store)
            .ensure_profile("parent@example.com")
            .unwrap();
        store
    }

    #[test]
    fn test_ensure_profile_creates_defaults_once() {
        let store = setup();
        let service = ProfileService::new(&store);
        let first = service.ensure_profile("ignored@example.com").unwrap();
        let second = service.ensure_profile("").unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.profile.email, "parent@example.com");
        assert_eq!(first.profile.children[0].name, "Child 1");
        assert_eq!(first.profile.children[0].color, "#818CF8");
        assert_eq!(first.profile.custom_categories, DEFAULT_CATEGORIES.to_vec());
    }

    #[test]
    fn test_add_and_remove_child() {
        let store = setup();
        let service = ProfileService::new(&store);

        let child = service.add_child("  Mina ").unwrap();
        assert!(child.id.starts_with('c'));
        assert_eq!(child.name, "Mina");
        assert_eq!(child.school_times.len(), 5);

        let profile = service.load().unwrap().unwrap().profile;
        assert_eq!(profile.children.len(), 2);

        service.remove_child(&child.id).unwrap();
        assert_eq!(service.load().unwrap().unwrap().profile.children.len(), 1);
    }

    #[test]
    fn test_last_child_cannot_be_removed() {
        let store = setup();
        let service = ProfileService::new(&store);
        let err = service.remove_child("child1").unwrap_err();
        assert_eq!(err.to_string(), ValidationError::LastChild.to_string());
    }

    #[test]
    fn test_add_child_requires_name() {
        let store = setup();
        assert!(ProfileService::new(&store).add_child("  ").is_err());
    }

    #[test]
    fn test_categories() {
        let store = setup();
        let service = ProfileService::new(&store);

        service.add_category("Music").unwrap();
        assert!(service.add_category("Music").is_err());
        assert!(service.add_category("").is_err());

        service.remove_category("Play").unwrap();
        let categories = service.load().unwrap().unwrap().profile.custom_categories;
        assert!(categories.contains(&"Music".to_string()));
        assert!(!categories.contains(&"Play".to_string()));
    }

    #[test]
    fn test_update_school_times_replaces_set() {
        let store = setup();
        let service = ProfileService::new(&store);

        let times = vec![SchoolTime::new(
            DayOfWeek::Sat,
            "10:00".parse().unwrap(),
            "12:00".parse().unwrap(),
        )];
        service.update_school_times("child1", times.clone()).unwrap();

        let profile = service.load().unwrap().unwrap().profile;
        assert_eq!(profile.children[0].school_times, times);
    }

    #[test]
    fn test_update_school_times_validates() {
        let store = setup();
        let service = ProfileService::new(&store);
        let bad = vec![SchoolTime::new(
            DayOfWeek::Mon,
            "13:00".parse().unwrap(),
            "09:00".parse().unwrap(),
        )];
        assert!(service.update_school_times("child1", bad).is_err());
        assert!(service
            .update_school_times("nobody", SchoolTime::default_week())
            .is_err());
    }
}
