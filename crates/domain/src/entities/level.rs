//! Level entity - one shelf tier of a rack

use serde::{Deserialize, Serialize};

use crate::entities::Bin;
use crate::{BinId, LevelId};

/// A shelf level owning an ordered list of bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: LevelId,
    /// Unique within the owning rack
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub bins: Vec<Bin>,
    #[serde(default)]
    pub child_sequence: u32,
}

impl Level {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LevelId::new(),
            code: code.into(),
            name: name.into(),
            bins: Vec::new(),
            child_sequence: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<LevelId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_bin(mut self, bin: Bin) -> Self {
        self.bins.push(bin);
        self
    }

    pub fn bin(&self, id: &BinId) -> Option<&Bin> {
        self.bins.iter().find(|b| &b.id == id)
    }

    pub fn bin_mut(&mut self, id: &BinId) -> Option<&mut Bin> {
        self.bins.iter_mut().find(|b| &b.id == id)
    }
}
