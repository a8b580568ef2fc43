//! Location tree aggregate - the in-memory warehouse forest
//!
//! The tree is an explicit, constructed value: `init(seed)`, any number of
//! mutations through the hierarchy service, then `teardown()`. Independent
//! trees can coexist, one per test or tenant.
//!
//! # Invariants
//!
//! - No two siblings share an id (checked on `init` and `replace`).
//! - Every lookup goes through the full id chain; the first missing link is
//!   reported as `DomainError::NotFound` naming that level.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Level, LocationNode, Rack, Warehouse, Zone};
use crate::error::DomainError;
use crate::level::HierarchyLevel;
use crate::{BinId, LevelId, RackId, WarehouseId, ZoneId};

/// The canonical forest of warehouses and their descendants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationTree {
    warehouses: Vec<Warehouse>,
}

impl LocationTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a seed or snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateId` if two siblings share an id.
    pub fn init(seed: Vec<Warehouse>) -> Result<Self, DomainError> {
        validate_forest(&seed)?;
        Ok(Self { warehouses: seed })
    }

    /// Replace the whole forest with a fresh snapshot. No merge is attempted.
    ///
    /// On error the current content is left untouched.
    pub fn replace(&mut self, snapshot: Vec<Warehouse>) -> Result<(), DomainError> {
        validate_forest(&snapshot)?;
        self.warehouses = snapshot;
        Ok(())
    }

    /// Drop all content.
    pub fn teardown(&mut self) {
        self.warehouses.clear();
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }

    /// Owned copy of the forest for callers that cache it.
    pub fn snapshot(&self) -> Vec<Warehouse> {
        self.warehouses.clone()
    }

    pub fn into_warehouses(self) -> Vec<Warehouse> {
        self.warehouses
    }

    /// Whether any node of `level` anywhere in the forest has this id.
    pub fn contains_id(&self, level: HierarchyLevel, id: &str) -> bool {
        let mut found = false;
        self.walk(|node_level, node_id| {
            if node_level == level && node_id == id {
                found = true;
            }
        });
        found
    }

    /// Whether any warehouse already uses `code`.
    pub fn warehouse_code_in_use(&self, code: &str) -> bool {
        self.warehouses.iter().any(|w| w.code == code)
    }

    fn walk<F: FnMut(HierarchyLevel, &str)>(&self, mut visit: F) {
        for warehouse in &self.warehouses {
            visit(HierarchyLevel::Warehouse, warehouse.node_id());
            for zone in &warehouse.zones {
                visit(HierarchyLevel::Zone, zone.node_id());
                for rack in &zone.racks {
                    visit(HierarchyLevel::Rack, rack.node_id());
                    for level in &rack.levels {
                        visit(HierarchyLevel::Level, level.node_id());
                        for bin in &level.bins {
                            visit(HierarchyLevel::Bin, bin.node_id());
                        }
                    }
                }
            }
        }
    }

    // =========================================================================
    // Lookups by id chain
    // =========================================================================

    pub fn warehouse(&self, warehouse_id: &WarehouseId) -> Result<&Warehouse, DomainError> {
        self.warehouses
            .iter()
            .find(|w| &w.id == warehouse_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Warehouse, warehouse_id.as_str()))
    }

    pub fn warehouse_mut(
        &mut self,
        warehouse_id: &WarehouseId,
    ) -> Result<&mut Warehouse, DomainError> {
        self.warehouses
            .iter_mut()
            .find(|w| &w.id == warehouse_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Warehouse, warehouse_id.as_str()))
    }

    pub fn zone(&self, warehouse_id: &WarehouseId, zone_id: &ZoneId) -> Result<&Zone, DomainError> {
        self.warehouse(warehouse_id)?
            .zone(zone_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Zone, zone_id.as_str()))
    }

    pub fn zone_mut(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
    ) -> Result<&mut Zone, DomainError> {
        self.warehouse_mut(warehouse_id)?
            .zone_mut(zone_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Zone, zone_id.as_str()))
    }

    pub fn rack(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
    ) -> Result<&Rack, DomainError> {
        self.zone(warehouse_id, zone_id)?
            .rack(rack_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Rack, rack_id.as_str()))
    }

    pub fn rack_mut(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
    ) -> Result<&mut Rack, DomainError> {
        self.zone_mut(warehouse_id, zone_id)?
            .rack_mut(rack_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Rack, rack_id.as_str()))
    }

    pub fn level(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
    ) -> Result<&Level, DomainError> {
        self.rack(warehouse_id, zone_id, rack_id)?
            .level(level_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Level, level_id.as_str()))
    }

    pub fn level_mut(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
    ) -> Result<&mut Level, DomainError> {
        self.rack_mut(warehouse_id, zone_id, rack_id)?
            .level_mut(level_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Level, level_id.as_str()))
    }

    pub fn bin(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        bin_id: &BinId,
    ) -> Result<&Bin, DomainError> {
        self.level(warehouse_id, zone_id, rack_id, level_id)?
            .bin(bin_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Bin, bin_id.as_str()))
    }

    pub fn bin_mut(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        bin_id: &BinId,
    ) -> Result<&mut Bin, DomainError> {
        self.level_mut(warehouse_id, zone_id, rack_id, level_id)?
            .bin_mut(bin_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Bin, bin_id.as_str()))
    }

    /// Insert a warehouse at the end of the forest.
    pub fn push_warehouse(&mut self, warehouse: Warehouse) {
        self.warehouses.push(warehouse);
    }

    /// Remove a warehouse, returning it.
    pub fn remove_warehouse(&mut self, warehouse_id: &WarehouseId) -> Result<Warehouse, DomainError> {
        let index = self
            .warehouses
            .iter()
            .position(|w| &w.id == warehouse_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Warehouse, warehouse_id.as_str()))?;
        Ok(self.warehouses.remove(index))
    }
}

fn ensure_unique_siblings<'a, T: LocationNode + 'a>(
    siblings: impl IntoIterator<Item = &'a T>,
) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for node in siblings {
        if !seen.insert(node.node_id()) {
            return Err(DomainError::duplicate_id(T::LEVEL, node.node_id()));
        }
    }
    Ok(())
}

fn validate_forest(warehouses: &[Warehouse]) -> Result<(), DomainError> {
    ensure_unique_siblings(warehouses)?;
    for warehouse in warehouses {
        ensure_unique_siblings(&warehouse.zones)?;
        for zone in &warehouse.zones {
            ensure_unique_siblings(&zone.racks)?;
            for rack in &zone.racks {
                ensure_unique_siblings(&rack.levels)?;
                for level in &rack.levels {
                    ensure_unique_siblings(&level.bins)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Warehouse> {
        vec![Warehouse::new("WH1", "Main").with_id("w1").with_zone(
            Zone::new("Z-01", "Receiving")
                .with_id("z1")
                .with_rack(Rack::new("R-01", "Rack A").with_id("r1")),
        )]
    }

    #[test]
    fn init_accepts_well_formed_seed() {
        let tree = LocationTree::init(sample()).expect("valid seed");
        assert_eq!(tree.warehouses().len(), 1);
        assert!(tree.contains_id(HierarchyLevel::Rack, "r1"));
        assert!(!tree.contains_id(HierarchyLevel::Zone, "r1"));
    }

    #[test]
    fn init_rejects_duplicate_sibling_ids() {
        let mut seed = sample();
        seed[0].zones.push(Zone::new("Z-02", "Dup").with_id("z1"));
        let err = LocationTree::init(seed).expect_err("duplicate");
        assert_eq!(err, DomainError::duplicate_id(HierarchyLevel::Zone, "z1"));
    }

    #[test]
    fn replace_keeps_old_content_on_error() {
        let mut tree = LocationTree::init(sample()).expect("valid seed");
        let bad = vec![
            Warehouse::new("A", "A").with_id("same"),
            Warehouse::new("B", "B").with_id("same"),
        ];
        assert!(tree.replace(bad).is_err());
        assert_eq!(tree.warehouses()[0].code, "WH1");
    }

    #[test]
    fn lookup_reports_first_missing_link() {
        let tree = LocationTree::init(sample()).expect("valid seed");
        let err = tree
            .rack(&"w1".into(), &"nope".into(), &"r1".into())
            .expect_err("missing zone");
        assert_eq!(err, DomainError::not_found(HierarchyLevel::Zone, "nope"));

        let err = tree
            .level(&"w1".into(), &"z1".into(), &"r1".into(), &"l9".into())
            .expect_err("missing level");
        assert_eq!(err, DomainError::not_found(HierarchyLevel::Level, "l9"));
    }

    #[test]
    fn teardown_empties_tree() {
        let mut tree = LocationTree::init(sample()).expect("valid seed");
        tree.teardown();
        assert!(tree.is_empty());
    }
}
