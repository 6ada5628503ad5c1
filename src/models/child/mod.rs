//! Child and household profile models.
//!
//! A child is only a grouping key for templates, events and school times.
//! The profile is the single per-owner document holding the children list
//! and the custom category names.

use serde::{Deserialize, Serialize};

use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::school_time::SchoolTime;
use crate::models::validation::{is_hex_color, require_text, ValidationError};

pub const DEFAULT_CHILD_COLOR: &str = "#818CF8";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub school_times: Vec<SchoolTime>,
}

impl Child {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: DEFAULT_CHILD_COLOR.to_string(),
            school_times: SchoolTime::default_week(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, ValidationError::EmptyName)?;
        if !is_hex_color(&self.color) {
            return Err(ValidationError::InvalidColor);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    #[serde(default)]
    pub email: String,
    pub children: Vec<Child>,
    #[serde(default)]
    pub custom_categories: Vec<String>,
}

impl UserProfile {
    /// Profile created on first launch for a new owner.
    pub fn initial(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            children: vec![Child::new("child1", "Child 1")],
            custom_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn child(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut Child> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// The selected child, falling back to the first one.
    pub fn resolve_child(&self, selected: Option<&str>) -> Option<&Child> {
        selected
            .and_then(|id| self.child(id))
            .or_else(|| self.children.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_profile() {
        let profile = UserProfile::initial("local", "parent@example.com");
        assert_eq!(profile.children.len(), 1);
        assert_eq!(profile.children[0].school_times.len(), 5);
        assert_eq!(profile.custom_categories.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_resolve_child_falls_back_to_first() {
        let mut profile = UserProfile::initial("local", "");
        profile.children.push(Child::new("c2", "Second"));
        assert_eq!(profile.resolve_child(Some("c2")).unwrap().name, "Second");
        assert_eq!(profile.resolve_child(Some("gone")).unwrap().id, "child1");
        assert_eq!(profile.resolve_child(None).unwrap().id, "child1");
    }

    #[test]
    fn test_child_validation() {
        let mut child = Child::new("c", "  ");
        assert_eq!(child.validate(), Err(ValidationError::EmptyName));
        child.name = "Mina".into();
        child.color = "blue".into();
        assert_eq!(child.validate(), Err(ValidationError::InvalidColor));
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = UserProfile::initial("u1", "a@b.c");
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["customCategories"].is_array());
        assert!(json["children"][0]["schoolTimes"].is_array());
    }
}
