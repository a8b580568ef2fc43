//! Unified error types for the domain layer
//!
//! Every hierarchy rule violation is reported through `DomainError` so callers
//! can render a specific message naming the offending level.

use thiserror::Error;

use crate::level::HierarchyLevel;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a required field is empty)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A link in the ancestor chain (or the target itself) does not resolve
    #[error("{} not found: {id}", .level.title())]
    NotFound { level: HierarchyLevel, id: String },

    /// Cascade-guard: the node still owns children
    #[error(
        "Cannot delete this {level} because it contains {}",
        child_level_label(.level, .count)
    )]
    HasChildren { level: HierarchyLevel, count: usize },

    /// The same id appears twice in a tree
    #[error("Duplicate {level} id: {id}")]
    DuplicateId { level: HierarchyLevel, id: String },

    /// A code collides with an existing code where uniqueness is enforced
    #[error("{} code already in use: {code}", .level.title())]
    DuplicateCode { level: HierarchyLevel, code: String },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

fn child_level_label(level: &HierarchyLevel, count: &usize) -> String {
    match level.child() {
        Some(child) => child.count_label(*count),
        None => format!("{} items", count),
    }
}

impl DomainError {
    /// Creates a validation error for missing or malformed input.
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Zone name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error for a level of the hierarchy
    pub fn not_found(level: HierarchyLevel, id: impl Into<String>) -> Self {
        Self::NotFound {
            level,
            id: id.into(),
        }
    }

    /// Create a cascade-guard error
    pub fn has_children(level: HierarchyLevel, count: usize) -> Self {
        Self::HasChildren { level, count }
    }

    pub fn duplicate_id(level: HierarchyLevel, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            level,
            id: id.into(),
        }
    }

    pub fn duplicate_code(level: HierarchyLevel, code: impl Into<String>) -> Self {
        Self::DuplicateCode {
            level,
            code: code.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The type of child that blocks a delete, if this is a cascade-guard error.
    pub fn blocking_child_level(&self) -> Option<HierarchyLevel> {
        match self {
            Self::HasChildren { level, .. } => level.child(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Zone name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: Zone name cannot be empty");
    }

    #[test]
    fn test_not_found_names_level() {
        let err = DomainError::not_found(HierarchyLevel::Rack, "r-9");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Rack not found: r-9");
    }

    #[test]
    fn test_has_children_message_includes_count() {
        let err = DomainError::has_children(HierarchyLevel::Zone, 3);
        assert_eq!(
            err.to_string(),
            "Cannot delete this zone because it contains 3 racks"
        );
        assert_eq!(err.blocking_child_level(), Some(HierarchyLevel::Rack));
    }

    #[test]
    fn test_has_children_singular() {
        let err = DomainError::has_children(HierarchyLevel::Level, 1);
        assert_eq!(
            err.to_string(),
            "Cannot delete this level because it contains 1 bin"
        );
    }
}
