//! Validation failures for user input, raised before anything is persisted.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a title")]
    EmptyTitle,
    #[error("Duration must be at least 1 minute")]
    NonPositiveDuration,
    #[error("Duration cannot exceed one day")]
    DurationTooLong,
    #[error("Please select a child first")]
    NoChildSelected,
    #[error("Please enter a name")]
    EmptyName,
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("The last child cannot be removed")]
    LastChild,
    #[error("{0}")]
    InvalidTime(String),
    #[error("End time {end} must be after start time {start}")]
    EndNotAfterStart { start: String, end: String },
    #[error("Activity would end after midnight")]
    EndsAfterMidnight,
    #[error("More than one school time for {0}")]
    DuplicateSchoolDay(String),
    #[error("Color must be in hex format (#RRGGBB)")]
    InvalidColor,
}

pub(crate) fn require_text(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

pub(crate) fn is_hex_color(color: &str) -> bool {
    let Some(hex) = color.trim().strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("Swimming", ValidationError::EmptyTitle).is_ok());
        assert_eq!(
            require_text("   ", ValidationError::EmptyTitle),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#818CF8"));
        assert!(!is_hex_color("818CF8"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
