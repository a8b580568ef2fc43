//! Rack entity

use serde::{Deserialize, Serialize};

use crate::entities::Level;
use crate::{LevelId, RackId};

/// A rack owning an ordered list of shelf levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: RackId,
    /// Unique within the owning zone
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub child_sequence: u32,
}

impl Rack {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RackId::new(),
            code: code.into(),
            name: name.into(),
            levels: Vec::new(),
            child_sequence: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<RackId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.levels.push(level);
        self
    }

    pub fn level(&self, id: &LevelId) -> Option<&Level> {
        self.levels.iter().find(|l| &l.id == id)
    }

    pub fn level_mut(&mut self, id: &LevelId) -> Option<&mut Level> {
        self.levels.iter_mut().find(|l| &l.id == id)
    }
}
