//! Rack operations (children of a zone).

use stockyard_domain::{
    delete_violation, rack_stats, DomainError, HierarchyLevel, LocationCode, LocationName, Rack,
    RackId, WarehouseId, ZoneId,
};

use super::{
    explicit_code, note_frozen_bin_codes, patched_code, plan_code, prefix, AncestorChain,
    HierarchyError, HierarchyService, LocationPatch, NewLocation,
};

impl HierarchyService {
    /// Code the next generated rack under the zone would receive.
    pub fn next_rack_code(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
    ) -> Result<String, HierarchyError> {
        let zone = self.tree.zone(warehouse_id, zone_id)?;
        let prefix = prefix(HierarchyLevel::Rack)?;
        let (_, code) = plan_code(self.sequence, zone.child_sequence, &zone.racks, |n| {
            LocationCode::render(prefix, n)
        });
        Ok(code)
    }

    pub fn add_rack(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        draft: NewLocation,
    ) -> Result<Rack, HierarchyError> {
        self.tree.zone(warehouse_id, zone_id)?;
        let name = LocationName::for_level(HierarchyLevel::Rack, draft.name)?;
        let id = self.fresh_id(HierarchyLevel::Rack)?;
        let sequence = self.sequence;

        let zone = self.tree.zone_mut(warehouse_id, zone_id)?;
        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => {
                let prefix = prefix(HierarchyLevel::Rack)?;
                let (n, code) = plan_code(sequence, zone.child_sequence, &zone.racks, |n| {
                    LocationCode::render(prefix, n)
                });
                zone.child_sequence = zone.child_sequence.max(n);
                code
            }
        };

        let rack = Rack::new(code, name).with_id(id);
        zone.racks.push(rack.clone());
        tracing::info!(
            zone_id = %zone_id,
            rack_id = %rack.id,
            code = %rack.code,
            "Rack added"
        );
        Ok(rack)
    }

    pub fn update_rack(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        patch: LocationPatch,
    ) -> Result<Rack, HierarchyError> {
        self.tree.rack(warehouse_id, zone_id, rack_id)?;
        let name = patch
            .name
            .map(|n| LocationName::for_level(HierarchyLevel::Rack, n))
            .transpose()?;
        let code = patched_code(HierarchyLevel::Rack, patch.code.as_deref())?;

        let rack = self.tree.rack_mut(warehouse_id, zone_id, rack_id)?;
        if let Some(code) = code {
            if code != rack.code {
                note_frozen_bin_codes(
                    HierarchyLevel::Rack,
                    rack_id.as_str(),
                    &rack.code,
                    &code,
                    rack_stats(rack).bins,
                );
                rack.code = code;
            }
        }
        if let Some(name) = name {
            rack.name = name.into();
        }

        tracing::info!(zone_id = %zone_id, rack_id = %rack_id, "Rack updated");
        Ok(rack.clone())
    }

    /// Remove an empty rack. Fails with `HasChildren` while it owns levels.
    pub fn delete_rack(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
    ) -> Result<AncestorChain, HierarchyError> {
        let zone = self.tree.zone_mut(warehouse_id, zone_id)?;
        let index = zone
            .racks
            .iter()
            .position(|r| &r.id == rack_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Rack, rack_id.as_str()))?;

        if let Some(violation) = delete_violation(&zone.racks[index]) {
            tracing::warn!(rack_id = %rack_id, error = %violation, "Rack delete refused");
            return Err(violation.into());
        }

        let removed = zone.racks.remove(index);
        tracing::info!(
            zone_id = %zone_id,
            rack_id = %removed.id,
            code = %removed.code,
            "Rack deleted"
        );

        let zone = zone.clone();
        let mut chain = AncestorChain::warehouse(self.tree.warehouse(warehouse_id)?);
        chain.zone = Some(zone);
        Ok(chain)
    }
}
