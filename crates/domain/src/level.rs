//! Hierarchy levels - the five tiers of physical storage
//!
//! Warehouse → Zone → Rack → Level → Bin, in containment order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One tier of the location hierarchy.
///
/// Also used as the *view level*: the tier whose items are currently listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyLevel {
    Warehouse,
    Zone,
    Rack,
    Level,
    Bin,
}

impl HierarchyLevel {
    pub const ALL: [HierarchyLevel; 5] = [
        HierarchyLevel::Warehouse,
        HierarchyLevel::Zone,
        HierarchyLevel::Rack,
        HierarchyLevel::Level,
        HierarchyLevel::Bin,
    ];

    /// The tier directly beneath this one, if any.
    pub fn child(self) -> Option<HierarchyLevel> {
        match self {
            Self::Warehouse => Some(Self::Zone),
            Self::Zone => Some(Self::Rack),
            Self::Rack => Some(Self::Level),
            Self::Level => Some(Self::Bin),
            Self::Bin => None,
        }
    }

    /// The tier directly above this one, if any.
    pub fn parent(self) -> Option<HierarchyLevel> {
        match self {
            Self::Warehouse => None,
            Self::Zone => Some(Self::Warehouse),
            Self::Rack => Some(Self::Zone),
            Self::Level => Some(Self::Rack),
            Self::Bin => Some(Self::Level),
        }
    }

    /// Depth below the warehouse tier (warehouse = 0).
    pub fn depth(self) -> usize {
        match self {
            Self::Warehouse => 0,
            Self::Zone => 1,
            Self::Rack => 2,
            Self::Level => 3,
            Self::Bin => 4,
        }
    }

    /// Lowercase singular label used in messages ("zone").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Zone => "zone",
            Self::Rack => "rack",
            Self::Level => "level",
            Self::Bin => "bin",
        }
    }

    /// Capitalized label for headings and error prefixes ("Zone").
    pub fn title(self) -> &'static str {
        match self {
            Self::Warehouse => "Warehouse",
            Self::Zone => "Zone",
            Self::Rack => "Rack",
            Self::Level => "Level",
            Self::Bin => "Bin",
        }
    }

    /// Count phrase with correct pluralization, e.g. `1 rack`, `3 racks`.
    pub fn count_label(self, count: usize) -> String {
        if count == 1 {
            format!("1 {}", self.as_str())
        } else {
            format!("{} {}s", count, self.as_str())
        }
    }

    /// Prefix for generated codes (`Z`, `R`, `L`, `B`). Warehouses have no generated code.
    pub fn code_prefix(self) -> Option<&'static str> {
        match self {
            Self::Warehouse => None,
            Self::Zone => Some("Z"),
            Self::Rack => Some("R"),
            Self::Level => Some("L"),
            Self::Bin => Some("B"),
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HierarchyLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warehouse" => Ok(Self::Warehouse),
            "zone" => Ok(Self::Zone),
            "rack" => Ok(Self::Rack),
            "level" => Ok(Self::Level),
            "bin" => Ok(Self::Bin),
            other => Err(DomainError::parse(format!(
                "Unknown hierarchy level: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_are_inverse() {
        for level in HierarchyLevel::ALL {
            if let Some(child) = level.child() {
                assert_eq!(child.parent(), Some(level));
                assert_eq!(child.depth(), level.depth() + 1);
            }
        }
        assert_eq!(HierarchyLevel::Bin.child(), None);
        assert_eq!(HierarchyLevel::Warehouse.parent(), None);
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(HierarchyLevel::Rack.count_label(1), "1 rack");
        assert_eq!(HierarchyLevel::Rack.count_label(3), "3 racks");
        assert_eq!(HierarchyLevel::Bin.count_label(0), "0 bins");
    }

    #[test]
    fn parses_level_names() {
        assert_eq!("Zone".parse::<HierarchyLevel>().ok(), Some(HierarchyLevel::Zone));
        assert!("aisle".parse::<HierarchyLevel>().is_err());
    }
}
