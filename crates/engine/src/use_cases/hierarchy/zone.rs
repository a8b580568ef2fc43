//! Zone operations (children of a warehouse).

use stockyard_domain::{
    delete_violation, zone_stats, DomainError, HierarchyLevel, LocationCode, LocationName,
    WarehouseId, Zone, ZoneId,
};

use super::{
    explicit_code, note_frozen_bin_codes, patched_code, plan_code, prefix, AncestorChain,
    HierarchyError, HierarchyService, LocationPatch, NewLocation,
};

impl HierarchyService {
    /// Code the next generated zone under `warehouse_id` would receive.
    pub fn next_zone_code(&self, warehouse_id: &WarehouseId) -> Result<String, HierarchyError> {
        let warehouse = self.tree.warehouse(warehouse_id)?;
        let prefix = prefix(HierarchyLevel::Zone)?;
        let (_, code) = plan_code(
            self.sequence,
            warehouse.child_sequence,
            &warehouse.zones,
            |n| LocationCode::render(prefix, n),
        );
        Ok(code)
    }

    pub fn add_zone(
        &mut self,
        warehouse_id: &WarehouseId,
        draft: NewLocation,
    ) -> Result<Zone, HierarchyError> {
        self.tree.warehouse(warehouse_id)?;
        let name = LocationName::for_level(HierarchyLevel::Zone, draft.name)?;
        let id = self.fresh_id(HierarchyLevel::Zone)?;
        let sequence = self.sequence;

        let warehouse = self.tree.warehouse_mut(warehouse_id)?;
        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => {
                let prefix = prefix(HierarchyLevel::Zone)?;
                let (n, code) = plan_code(sequence, warehouse.child_sequence, &warehouse.zones, |n| {
                    LocationCode::render(prefix, n)
                });
                warehouse.child_sequence = warehouse.child_sequence.max(n);
                code
            }
        };

        let zone = Zone::new(code, name).with_id(id);
        warehouse.zones.push(zone.clone());
        tracing::info!(
            warehouse_id = %warehouse_id,
            zone_id = %zone.id,
            code = %zone.code,
            "Zone added"
        );
        Ok(zone)
    }

    /// Shallow merge of `patch` onto the zone. Sibling code uniqueness is not
    /// re-checked.
    pub fn update_zone(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        patch: LocationPatch,
    ) -> Result<Zone, HierarchyError> {
        self.tree.zone(warehouse_id, zone_id)?;
        let name = patch
            .name
            .map(|n| LocationName::for_level(HierarchyLevel::Zone, n))
            .transpose()?;
        let code = patched_code(HierarchyLevel::Zone, patch.code.as_deref())?;

        let zone = self.tree.zone_mut(warehouse_id, zone_id)?;
        if let Some(code) = code {
            if code != zone.code {
                note_frozen_bin_codes(
                    HierarchyLevel::Zone,
                    zone_id.as_str(),
                    &zone.code,
                    &code,
                    zone_stats(zone).bins,
                );
                zone.code = code;
            }
        }
        if let Some(name) = name {
            zone.name = name.into();
        }

        tracing::info!(warehouse_id = %warehouse_id, zone_id = %zone_id, "Zone updated");
        Ok(zone.clone())
    }

    /// Remove an empty zone. Fails with `HasChildren` while it owns racks.
    pub fn delete_zone(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
    ) -> Result<AncestorChain, HierarchyError> {
        let warehouse = self.tree.warehouse_mut(warehouse_id)?;
        let index = warehouse
            .zones
            .iter()
            .position(|z| &z.id == zone_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Zone, zone_id.as_str()))?;

        if let Some(violation) = delete_violation(&warehouse.zones[index]) {
            tracing::warn!(zone_id = %zone_id, error = %violation, "Zone delete refused");
            return Err(violation.into());
        }

        let removed = warehouse.zones.remove(index);
        tracing::info!(
            warehouse_id = %warehouse_id,
            zone_id = %removed.id,
            code = %removed.code,
            "Zone deleted"
        );
        Ok(AncestorChain::warehouse(warehouse))
    }
}
