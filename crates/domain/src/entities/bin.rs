//! Bin entity - the addressable storage slot at the bottom of the hierarchy
//!
//! `full_code` is the bin's human-facing address. It is composed from the
//! ancestor codes when the bin is created and is frozen from then on: editing
//! an ancestor's code does not rewrite it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::BinId;

/// A storage bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub id: BinId,
    /// Unique within the owning level
    pub code: String,
    /// `{WarehouseCode}-{ZoneCode}-{RackCode}-{LevelCode}-B{NN}`, frozen at creation
    #[serde(default)]
    pub full_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Units currently stored in the bin
    #[serde(default)]
    pub quantity: u32,
    /// Whether different items may share the bin
    #[serde(default)]
    pub allow_mixed_items: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Bin {
    pub fn new(
        code: impl Into<String>,
        full_code: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BinId::new(),
            code: code.into(),
            full_code: full_code.into(),
            name: name.into(),
            description: String::new(),
            quantity: 0,
            allow_mixed_items: false,
            created_at,
        }
    }

    pub fn with_id(mut self, id: impl Into<BinId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn allowing_mixed_items(mut self) -> Self {
        self.allow_mixed_items = true;
        self
    }

    /// Whether the bin currently holds stock.
    pub fn is_occupied(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape_with_defaults() {
        let json = r#"{"id":"7","code":"B01","fullCode":"W1-Z-01-R-01-L-01-B01","quantity":4}"#;
        let bin: Bin = serde_json::from_str(json).expect("bin json");
        assert_eq!(bin.id.as_str(), "7");
        assert_eq!(bin.quantity, 4);
        assert!(!bin.allow_mixed_items);
        assert!(bin.is_occupied());
        assert!(bin.name.is_empty());
    }
}
