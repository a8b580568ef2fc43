//! Validated name newtypes for hierarchy entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty (except Description)
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::level::HierarchyLevel;

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for description fields
const MAX_DESCRIPTION_LENGTH: usize = 2000;

// ============================================================================
// LocationName
// ============================================================================

/// A validated name for any hierarchy node (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationName(String);

impl LocationName {
    /// Create a new validated name for a node at `level`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn for_level(level: HierarchyLevel, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(format!(
                "{} name cannot be empty",
                level.title()
            )));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "{} name cannot exceed {} characters",
                level.title(),
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LocationName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::for_level(HierarchyLevel::Bin, s)
    }
}

impl From<LocationName> for String {
    fn from(name: LocationName) -> String {
        name.0
    }
}

// ============================================================================
// Description
// ============================================================================

/// A validated description (may be empty, <=2000 chars, trimmed)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a new validated description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the description exceeds 2000 characters.
    pub fn new(description: impl Into<String>) -> Result<Self, DomainError> {
        let description = description.into();
        let trimmed = description.trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> String {
        description.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let name = LocationName::for_level(HierarchyLevel::Zone, "  Good Condition ").expect("valid");
        assert_eq!(name.as_str(), "Good Condition");
    }

    #[test]
    fn empty_name_names_the_level() {
        let err = LocationName::for_level(HierarchyLevel::Rack, "   ").expect_err("empty");
        assert_eq!(err.to_string(), "Validation failed: Rack name cannot be empty");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let long = "x".repeat(201);
        assert!(LocationName::for_level(HierarchyLevel::Zone, long).is_err());
    }

    #[test]
    fn description_may_be_empty() {
        let desc = Description::new("   ").expect("valid");
        assert!(desc.is_empty());
        assert!(Description::new("y".repeat(2001)).is_err());
    }
}
