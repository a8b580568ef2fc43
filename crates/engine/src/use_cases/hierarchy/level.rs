//! Level operations (shelves of a rack).

use stockyard_domain::{
    delete_violation, level_stats, DomainError, HierarchyLevel, Level, LevelId, LocationCode,
    LocationName, RackId, WarehouseId, ZoneId,
};

use super::{
    explicit_code, note_frozen_bin_codes, patched_code, plan_code, prefix, AncestorChain,
    HierarchyError, HierarchyService, LocationPatch, NewLocation,
};

impl HierarchyService {
    /// Code the next generated level in the rack would receive.
    pub fn next_level_code(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
    ) -> Result<String, HierarchyError> {
        let rack = self.tree.rack(warehouse_id, zone_id, rack_id)?;
        let prefix = prefix(HierarchyLevel::Level)?;
        let (_, code) = plan_code(self.sequence, rack.child_sequence, &rack.levels, |n| {
            LocationCode::render(prefix, n)
        });
        Ok(code)
    }

    pub fn add_level(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        draft: NewLocation,
    ) -> Result<Level, HierarchyError> {
        self.tree.rack(warehouse_id, zone_id, rack_id)?;
        let name = LocationName::for_level(HierarchyLevel::Level, draft.name)?;
        let id = self.fresh_id(HierarchyLevel::Level)?;
        let sequence = self.sequence;

        let rack = self.tree.rack_mut(warehouse_id, zone_id, rack_id)?;
        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => {
                let prefix = prefix(HierarchyLevel::Level)?;
                let (n, code) = plan_code(sequence, rack.child_sequence, &rack.levels, |n| {
                    LocationCode::render(prefix, n)
                });
                rack.child_sequence = rack.child_sequence.max(n);
                code
            }
        };

        let level = Level::new(code, name).with_id(id);
        rack.levels.push(level.clone());
        tracing::info!(
            rack_id = %rack_id,
            level_id = %level.id,
            code = %level.code,
            "Level added"
        );
        Ok(level)
    }

    pub fn update_level(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        patch: LocationPatch,
    ) -> Result<Level, HierarchyError> {
        self.tree.level(warehouse_id, zone_id, rack_id, level_id)?;
        let name = patch
            .name
            .map(|n| LocationName::for_level(HierarchyLevel::Level, n))
            .transpose()?;
        let code = patched_code(HierarchyLevel::Level, patch.code.as_deref())?;

        let level = self.tree.level_mut(warehouse_id, zone_id, rack_id, level_id)?;
        if let Some(code) = code {
            if code != level.code {
                note_frozen_bin_codes(
                    HierarchyLevel::Level,
                    level_id.as_str(),
                    &level.code,
                    &code,
                    level_stats(level).bins,
                );
                level.code = code;
            }
        }
        if let Some(name) = name {
            level.name = name.into();
        }

        tracing::info!(rack_id = %rack_id, level_id = %level_id, "Level updated");
        Ok(level.clone())
    }

    /// Remove an empty level. Fails with `HasChildren` while it owns bins.
    pub fn delete_level(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
    ) -> Result<AncestorChain, HierarchyError> {
        let rack = self.tree.rack_mut(warehouse_id, zone_id, rack_id)?;
        let index = rack
            .levels
            .iter()
            .position(|l| &l.id == level_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Level, level_id.as_str()))?;

        if let Some(violation) = delete_violation(&rack.levels[index]) {
            tracing::warn!(level_id = %level_id, error = %violation, "Level delete refused");
            return Err(violation.into());
        }

        let removed = rack.levels.remove(index);
        tracing::info!(
            rack_id = %rack_id,
            level_id = %removed.id,
            code = %removed.code,
            "Level deleted"
        );

        let rack = rack.clone();
        let mut chain = AncestorChain::warehouse(self.tree.warehouse(warehouse_id)?);
        chain.zone = Some(self.tree.zone(warehouse_id, zone_id)?.clone());
        chain.rack = Some(rack);
        Ok(chain)
    }
}
