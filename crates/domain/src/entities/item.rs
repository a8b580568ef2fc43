//! Level-agnostic views over hierarchy nodes
//!
//! `LocationNode` is the read-only surface shared by every tier, used by the
//! search and statistics helpers. `LocationItem` carries one concrete node
//! together with its tier so behavior can be selected by exhaustive `match`.

use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Level, Rack, Warehouse, Zone};
use crate::level::HierarchyLevel;

/// Read-only surface of any hierarchy node.
pub trait LocationNode {
    const LEVEL: HierarchyLevel;

    fn node_id(&self) -> &str;
    fn node_code(&self) -> &str;
    fn node_name(&self) -> &str;
    /// Number of direct children (always 0 for bins).
    fn child_count(&self) -> usize;
}

impl LocationNode for Warehouse {
    const LEVEL: HierarchyLevel = HierarchyLevel::Warehouse;

    fn node_id(&self) -> &str {
        self.id.as_str()
    }
    fn node_code(&self) -> &str {
        &self.code
    }
    fn node_name(&self) -> &str {
        &self.name
    }
    fn child_count(&self) -> usize {
        self.zones.len()
    }
}

impl LocationNode for Zone {
    const LEVEL: HierarchyLevel = HierarchyLevel::Zone;

    fn node_id(&self) -> &str {
        self.id.as_str()
    }
    fn node_code(&self) -> &str {
        &self.code
    }
    fn node_name(&self) -> &str {
        &self.name
    }
    fn child_count(&self) -> usize {
        self.racks.len()
    }
}

impl LocationNode for Rack {
    const LEVEL: HierarchyLevel = HierarchyLevel::Rack;

    fn node_id(&self) -> &str {
        self.id.as_str()
    }
    fn node_code(&self) -> &str {
        &self.code
    }
    fn node_name(&self) -> &str {
        &self.name
    }
    fn child_count(&self) -> usize {
        self.levels.len()
    }
}

impl LocationNode for Level {
    const LEVEL: HierarchyLevel = HierarchyLevel::Level;

    fn node_id(&self) -> &str {
        self.id.as_str()
    }
    fn node_code(&self) -> &str {
        &self.code
    }
    fn node_name(&self) -> &str {
        &self.name
    }
    fn child_count(&self) -> usize {
        self.bins.len()
    }
}

impl LocationNode for Bin {
    const LEVEL: HierarchyLevel = HierarchyLevel::Bin;

    fn node_id(&self) -> &str {
        self.id.as_str()
    }
    fn node_code(&self) -> &str {
        &self.code
    }
    fn node_name(&self) -> &str {
        &self.name
    }
    fn child_count(&self) -> usize {
        0
    }
}

/// One node of any tier, tagged with its tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "level", content = "item", rename_all = "lowercase")]
pub enum LocationItem {
    Warehouse(Warehouse),
    Zone(Zone),
    Rack(Rack),
    Level(Level),
    Bin(Bin),
}

impl LocationItem {
    pub fn level(&self) -> HierarchyLevel {
        match self {
            Self::Warehouse(_) => HierarchyLevel::Warehouse,
            Self::Zone(_) => HierarchyLevel::Zone,
            Self::Rack(_) => HierarchyLevel::Rack,
            Self::Level(_) => HierarchyLevel::Level,
            Self::Bin(_) => HierarchyLevel::Bin,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Warehouse(w) => w.node_id(),
            Self::Zone(z) => z.node_id(),
            Self::Rack(r) => r.node_id(),
            Self::Level(l) => l.node_id(),
            Self::Bin(b) => b.node_id(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Warehouse(w) => w.node_code(),
            Self::Zone(z) => z.node_code(),
            Self::Rack(r) => r.node_code(),
            Self::Level(l) => l.node_code(),
            Self::Bin(b) => b.node_code(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Warehouse(w) => w.node_name(),
            Self::Zone(z) => z.node_name(),
            Self::Rack(r) => r.node_name(),
            Self::Level(l) => l.node_name(),
            Self::Bin(b) => b.node_name(),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Self::Warehouse(w) => w.child_count(),
            Self::Zone(z) => z.child_count(),
            Self::Rack(r) => r.child_count(),
            Self::Level(l) => l.child_count(),
            Self::Bin(b) => b.child_count(),
        }
    }
}

impl From<Warehouse> for LocationItem {
    fn from(value: Warehouse) -> Self {
        Self::Warehouse(value)
    }
}

impl From<Zone> for LocationItem {
    fn from(value: Zone) -> Self {
        Self::Zone(value)
    }
}

impl From<Rack> for LocationItem {
    fn from(value: Rack) -> Self {
        Self::Rack(value)
    }
}

impl From<Level> for LocationItem {
    fn from(value: Level) -> Self {
        Self::Level(value)
    }
}

impl From<Bin> for LocationItem {
    fn from(value: Bin) -> Self {
        Self::Bin(value)
    }
}
