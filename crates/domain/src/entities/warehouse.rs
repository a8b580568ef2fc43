//! Warehouse entity - root of the location hierarchy
//!
//! Warehouse codes are assigned externally and are globally unique.

use serde::{Deserialize, Serialize};

use crate::entities::Zone;
use crate::{WarehouseId, ZoneId};

/// A physical warehouse owning an ordered list of zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub zones: Vec<Zone>,
    /// Highest zone sequence number handed out so far
    #[serde(default)]
    pub child_sequence: u32,
}

impl Warehouse {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: WarehouseId::new(),
            code: code.into(),
            name: name.into(),
            zones: Vec::new(),
            child_sequence: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<WarehouseId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    pub fn zone_mut(&mut self, id: &ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| &z.id == id)
    }
}
