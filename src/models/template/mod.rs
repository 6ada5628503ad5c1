// Event Template model
// Reusable activity definitions that are dragged onto the grid

use serde::{Deserialize, Serialize};

use crate::models::validation::{require_text, ValidationError};

/// Longest duration a template may carry (one full day).
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Activity template for quick event creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    #[serde(skip)]
    pub id: Option<i64>,
    pub user_id: String,
    pub child_id: String,
    pub title: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl EventTemplate {
    /// Create a new template with required fields
    pub fn new(
        child_id: impl Into<String>,
        title: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: None,
            user_id: String::new(),
            child_id: child_id.into(),
            title: title.into(),
            duration_minutes,
            category: "Other".to_string(),
            description: String::new(),
        }
    }

    /// Create a builder for constructing templates
    pub fn builder() -> EventTemplateBuilder {
        EventTemplateBuilder::new()
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.child_id, ValidationError::NoChildSelected)?;
        require_text(&self.title, ValidationError::EmptyTitle)?;

        if self.duration_minutes < 1 {
            return Err(ValidationError::NonPositiveDuration);
        }

        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::DurationTooLong);
        }

        Ok(())
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Builder for creating activity templates
pub struct EventTemplateBuilder {
    user_id: String,
    child_id: Option<String>,
    title: Option<String>,
    duration_minutes: u32,
    category: Option<String>,
    description: String,
}

impl EventTemplateBuilder {
    pub fn new() -> Self {
        Self {
            user_id: String::new(),
            child_id: None,
            title: None,
            duration_minutes: 60,
            category: None,
            description: String::new(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn child_id(mut self, child_id: impl Into<String>) -> Self {
        self.child_id = Some(child_id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> Result<EventTemplate, ValidationError> {
        let child_id = self.child_id.ok_or(ValidationError::NoChildSelected)?;
        let title = self.title.ok_or(ValidationError::EmptyTitle)?;

        let template = EventTemplate {
            id: None,
            user_id: self.user_id,
            child_id,
            title,
            duration_minutes: self.duration_minutes,
            category: self.category.unwrap_or_else(|| "Other".to_string()),
            description: self.description,
        };

        template.validate()?;
        Ok(template)
    }
}

impl Default for EventTemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
