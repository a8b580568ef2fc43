//! Zone entity - an area within a warehouse (receiving, damaged goods, ...)

use serde::{Deserialize, Serialize};

use crate::entities::Rack;
use crate::{RackId, ZoneId};

/// A zone owning an ordered list of racks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    /// Unique within the owning warehouse
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub racks: Vec<Rack>,
    #[serde(default)]
    pub child_sequence: u32,
}

impl Zone {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(),
            code: code.into(),
            name: name.into(),
            racks: Vec::new(),
            child_sequence: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<ZoneId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_rack(mut self, rack: Rack) -> Self {
        self.racks.push(rack);
        self
    }

    pub fn rack(&self, id: &RackId) -> Option<&Rack> {
        self.racks.iter().find(|r| &r.id == id)
    }

    pub fn rack_mut(&mut self, id: &RackId) -> Option<&mut Rack> {
        self.racks.iter_mut().find(|r| &r.id == id)
    }
}
