//! Warehouse operations (roots of the forest).
//!
//! Warehouse codes are assigned by people, never generated, and must be unique
//! across the forest because they prefix every bin address.

use stockyard_domain::{
    delete_violation, warehouse_stats, DomainError, HierarchyLevel, LocationName, Warehouse,
    WarehouseId,
};

use super::{
    explicit_code, note_frozen_bin_codes, patched_code, HierarchyError, HierarchyService,
    LocationPatch, NewLocation,
};

impl HierarchyService {
    pub fn add_warehouse(&mut self, draft: NewLocation) -> Result<Warehouse, HierarchyError> {
        let code = explicit_code(draft.code.as_deref())
            .ok_or_else(|| DomainError::validation("Warehouse code is required"))?;
        if self.tree.warehouse_code_in_use(&code) {
            return Err(DomainError::duplicate_code(HierarchyLevel::Warehouse, code).into());
        }
        let name = LocationName::for_level(HierarchyLevel::Warehouse, draft.name)?;
        let id = self.fresh_id(HierarchyLevel::Warehouse)?;

        let warehouse = Warehouse::new(code, name).with_id(id);
        self.tree.push_warehouse(warehouse.clone());
        tracing::info!(warehouse_id = %warehouse.id, code = %warehouse.code, "Warehouse added");
        Ok(warehouse)
    }

    pub fn update_warehouse(
        &mut self,
        warehouse_id: &WarehouseId,
        patch: LocationPatch,
    ) -> Result<Warehouse, HierarchyError> {
        self.tree.warehouse(warehouse_id)?;
        let name = patch
            .name
            .map(|n| LocationName::for_level(HierarchyLevel::Warehouse, n))
            .transpose()?;
        let code = patched_code(HierarchyLevel::Warehouse, patch.code.as_deref())?;
        if let Some(code) = &code {
            let taken = self
                .tree
                .warehouses()
                .iter()
                .any(|w| &w.id != warehouse_id && &w.code == code);
            if taken {
                return Err(DomainError::duplicate_code(HierarchyLevel::Warehouse, code.clone()).into());
            }
        }

        let warehouse = self.tree.warehouse_mut(warehouse_id)?;
        if let Some(code) = code {
            if code != warehouse.code {
                note_frozen_bin_codes(
                    HierarchyLevel::Warehouse,
                    warehouse_id.as_str(),
                    &warehouse.code,
                    &code,
                    warehouse_stats(warehouse).bins,
                );
                warehouse.code = code;
            }
        }
        if let Some(name) = name {
            warehouse.name = name.into();
        }

        tracing::info!(warehouse_id = %warehouse_id, "Warehouse updated");
        Ok(warehouse.clone())
    }

    /// Remove an empty warehouse, returning it. Fails with `HasChildren` while
    /// it owns zones.
    pub fn delete_warehouse(
        &mut self,
        warehouse_id: &WarehouseId,
    ) -> Result<Warehouse, HierarchyError> {
        if let Some(violation) = delete_violation(self.tree.warehouse(warehouse_id)?) {
            tracing::warn!(warehouse_id = %warehouse_id, error = %violation, "Warehouse delete refused");
            return Err(violation.into());
        }

        let removed = self.tree.remove_warehouse(warehouse_id)?;
        tracing::info!(warehouse_id = %removed.id, code = %removed.code, "Warehouse deleted");
        Ok(removed)
    }
}
