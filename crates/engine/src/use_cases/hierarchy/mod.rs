//! Hierarchy service - the single mutator of the location tree.
//!
//! Every add/update/delete at every level goes through here, including code
//! generation and the cascade-guard. Presentation code must never re-implement
//! either.
//!
//! Operations are synchronous and either fully apply or leave the tree
//! untouched. Failures come back as `HierarchyError`, never as panics.

mod bin;
mod level;
mod rack;
mod warehouse;
mod zone;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stockyard_domain::{
    CodeSequence, DomainError, HierarchyLevel, Level, LocationNode, LocationTree, Rack,
    Warehouse, Zone,
};

use crate::infrastructure::ports::{ApiError, ClockPort, IdPort};

/// Maximum attempts at drawing an id that is not already in the tree.
const MAX_ID_ATTEMPTS: usize = 16;

/// Error type for hierarchy operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HierarchyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Inventory API error: {0}")]
    Remote(#[from] ApiError),

    #[error("{operation} a {} is not supported while an inventory API is configured", .level.as_str())]
    RemoteUnsupported {
        level: HierarchyLevel,
        operation: &'static str,
    },
}

impl HierarchyError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_not_found())
    }

    /// Child count carried by a cascade-guard failure.
    pub fn blocking_child_count(&self) -> Option<usize> {
        match self {
            Self::Domain(DomainError::HasChildren { count, .. }) => Some(*count),
            _ => None,
        }
    }
}

/// Payload for creating a zone, rack or level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    /// Explicit code; `None` or blank means "generate one"
    pub code: Option<String>,
    pub name: String,
}

impl NewLocation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            code: None,
            name: name.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Partial update for a warehouse, zone, rack or level. `None` keeps the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPatch {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Payload for creating a bin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBin {
    pub code: Option<String>,
    /// Blank names fall back to the bin's code
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub allow_mixed_items: bool,
}

/// Partial update for a bin. `None` keeps the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub allow_mixed_items: Option<bool>,
}

/// Refreshed ancestors of a deleted node, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct AncestorChain {
    pub warehouse: Warehouse,
    pub zone: Option<Zone>,
    pub rack: Option<Rack>,
    pub level: Option<Level>,
}

impl AncestorChain {
    fn warehouse(warehouse: &Warehouse) -> Self {
        Self {
            warehouse: warehouse.clone(),
            zone: None,
            rack: None,
            level: None,
        }
    }
}

/// Stateful CRUD facade over one `LocationTree`.
pub struct HierarchyService {
    tree: LocationTree,
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn IdPort>,
    sequence: CodeSequence,
}

impl HierarchyService {
    pub fn new(
        tree: LocationTree,
        clock: Arc<dyn ClockPort>,
        ids: Arc<dyn IdPort>,
        sequence: CodeSequence,
    ) -> Self {
        Self {
            tree,
            clock,
            ids,
            sequence,
        }
    }

    pub fn tree(&self) -> &LocationTree {
        &self.tree
    }

    pub fn code_sequence(&self) -> CodeSequence {
        self.sequence
    }

    /// Latest copy of the forest, for callers that cache it.
    pub fn snapshot(&self) -> Vec<Warehouse> {
        self.tree.snapshot()
    }

    /// Replace the tree wholesale with a fresh snapshot.
    pub fn load(&mut self, snapshot: Vec<Warehouse>) -> Result<(), HierarchyError> {
        let warehouses = snapshot.len();
        self.tree.replace(snapshot)?;
        tracing::info!(warehouses, "Location tree replaced from snapshot");
        Ok(())
    }

    /// Drop all tree content.
    pub fn teardown(&mut self) {
        self.tree.teardown();
        tracing::debug!("Location tree torn down");
    }

    /// Draw an id not yet used by any node of `level`.
    fn fresh_id(&self, level: HierarchyLevel) -> Result<String, HierarchyError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.gen_id();
            if !self.tree.contains_id(level, &id) {
                return Ok(id);
            }
        }
        Err(DomainError::validation(format!("Could not allocate a unique {} id", level)).into())
    }
}

/// Trimmed explicit code, or `None` when blank.
pub(crate) fn explicit_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Code a patch wants to set. A supplied but blank code is a validation error.
fn patched_code(level: HierarchyLevel, code: Option<&str>) -> Result<Option<String>, DomainError> {
    match code {
        None => Ok(None),
        Some(raw) => explicit_code(Some(raw)).map(Some).ok_or_else(|| {
            DomainError::validation(format!("{} code cannot be empty", level.title()))
        }),
    }
}

/// Sequence number and code the next generated child would get.
fn plan_code<T, F>(sequence: CodeSequence, counter: u32, siblings: &[T], render: F) -> (u32, String)
where
    T: LocationNode,
    F: Fn(u32) -> String,
{
    let codes: Vec<&str> = siblings.iter().map(LocationNode::node_code).collect();
    let n = sequence.next(counter, &codes, &render);
    (n, render(n))
}

/// Ancestor code edits do not rewrite the full codes already stored on bins.
fn note_frozen_bin_codes(level: HierarchyLevel, id: &str, old: &str, new: &str, bins: usize) {
    if bins > 0 {
        tracing::warn!(
            level = %level,
            id,
            old_code = old,
            new_code = new,
            bins,
            "Code changed above existing bins; their full codes keep the creation-time prefix"
        );
    }
}

fn prefix(level: HierarchyLevel) -> Result<&'static str, DomainError> {
    level.code_prefix().ok_or_else(|| {
        DomainError::validation(format!("{} codes cannot be generated", level.title()))
    })
}

#[cfg(test)]
mod tests;
