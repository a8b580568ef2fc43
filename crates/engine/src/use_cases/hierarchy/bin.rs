//! Bin operations (slots on a level).
//!
//! A generated bin uses its full address as its code, `WH1-Z-01-R-01-L-01-B03`.
//! An explicit code becomes the last segment of the full address instead.

use stockyard_domain::{
    Bin, BinCode, BinId, Description, DomainError, HierarchyLevel, LevelId, LocationName, RackId,
    WarehouseId, ZoneId,
};

use super::{
    explicit_code, patched_code, plan_code, AncestorChain, BinPatch, HierarchyError,
    HierarchyService, NewBin,
};

/// Owned ancestor codes, read before the level is borrowed mutably.
struct AncestorCodes {
    warehouse: String,
    zone: String,
    rack: String,
    level: String,
}

impl AncestorCodes {
    fn bin_code(&self) -> BinCode<'_> {
        BinCode::new(&self.warehouse, &self.zone, &self.rack, &self.level)
    }
}

impl HierarchyService {
    fn ancestor_codes(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
    ) -> Result<AncestorCodes, DomainError> {
        let warehouse = self.tree.warehouse(warehouse_id)?;
        let zone = self.tree.zone(warehouse_id, zone_id)?;
        let rack = self.tree.rack(warehouse_id, zone_id, rack_id)?;
        let level = self.tree.level(warehouse_id, zone_id, rack_id, level_id)?;
        Ok(AncestorCodes {
            warehouse: warehouse.code.clone(),
            zone: zone.code.clone(),
            rack: rack.code.clone(),
            level: level.code.clone(),
        })
    }

    /// Code the next generated bin on the level would receive.
    pub fn next_bin_code(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
    ) -> Result<String, HierarchyError> {
        let codes = self.ancestor_codes(warehouse_id, zone_id, rack_id, level_id)?;
        let level = self.tree.level(warehouse_id, zone_id, rack_id, level_id)?;
        let composer = codes.bin_code();
        let (_, code) = plan_code(self.sequence, level.child_sequence, &level.bins, |n| {
            composer.generated(n)
        });
        Ok(code)
    }

    pub fn add_bin(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        draft: NewBin,
    ) -> Result<Bin, HierarchyError> {
        let codes = self.ancestor_codes(warehouse_id, zone_id, rack_id, level_id)?;
        let description = Description::new(draft.description.unwrap_or_default())?;
        let name = (!draft.name.trim().is_empty())
            .then(|| LocationName::for_level(HierarchyLevel::Bin, draft.name))
            .transpose()?;
        let id = self.fresh_id(HierarchyLevel::Bin)?;
        let created_at = self.clock.now();
        let sequence = self.sequence;

        let level = self.tree.level_mut(warehouse_id, zone_id, rack_id, level_id)?;
        let composer = codes.bin_code();
        let (code, full_code) = match explicit_code(draft.code.as_deref()) {
            Some(code) => {
                let full_code = composer.with_suffix(&code);
                (code, full_code)
            }
            None => {
                let (n, full_code) = plan_code(sequence, level.child_sequence, &level.bins, |n| {
                    composer.generated(n)
                });
                level.child_sequence = level.child_sequence.max(n);
                (full_code.clone(), full_code)
            }
        };
        let name = name.map_or_else(|| code.clone(), String::from);

        let mut bin = Bin::new(code, full_code, name, created_at)
            .with_id(id)
            .with_description(description)
            .with_quantity(draft.quantity);
        if draft.allow_mixed_items {
            bin = bin.allowing_mixed_items();
        }

        level.bins.push(bin.clone());
        tracing::info!(
            level_id = %level_id,
            bin_id = %bin.id,
            full_code = %bin.full_code,
            "Bin added"
        );
        Ok(bin)
    }

    /// Shallow merge of `patch` onto the bin. Changing the bin's own code
    /// recomposes its full code from the current ancestor codes.
    pub fn update_bin(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        bin_id: &BinId,
        patch: BinPatch,
    ) -> Result<Bin, HierarchyError> {
        let codes = self.ancestor_codes(warehouse_id, zone_id, rack_id, level_id)?;
        self.tree.bin(warehouse_id, zone_id, rack_id, level_id, bin_id)?;
        let name = patch
            .name
            .map(|n| LocationName::for_level(HierarchyLevel::Bin, n))
            .transpose()?;
        let description = patch.description.map(Description::new).transpose()?;
        let code = patched_code(HierarchyLevel::Bin, patch.code.as_deref())?;

        let bin = self
            .tree
            .bin_mut(warehouse_id, zone_id, rack_id, level_id, bin_id)?;
        if let Some(code) = code {
            if code != bin.code {
                // Generated codes already carry the full address.
                let address_prefix = codes.bin_code().with_suffix("");
                bin.full_code = if code.starts_with(&address_prefix) {
                    code.clone()
                } else {
                    codes.bin_code().with_suffix(&code)
                };
                bin.code = code;
            }
        }
        if let Some(name) = name {
            bin.name = name.into();
        }
        if let Some(description) = description {
            bin.description = description.into();
        }
        if let Some(quantity) = patch.quantity {
            bin.quantity = quantity;
        }
        if let Some(allow) = patch.allow_mixed_items {
            bin.allow_mixed_items = allow;
        }

        tracing::info!(level_id = %level_id, bin_id = %bin_id, "Bin updated");
        Ok(bin.clone())
    }

    /// Remove a bin. Bins have no children, so this never fails the cascade
    /// guard; stock checks are the caller's policy.
    pub fn delete_bin(
        &mut self,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        bin_id: &BinId,
    ) -> Result<AncestorChain, HierarchyError> {
        let level = self.tree.level_mut(warehouse_id, zone_id, rack_id, level_id)?;
        let index = level
            .bins
            .iter()
            .position(|b| &b.id == bin_id)
            .ok_or_else(|| DomainError::not_found(HierarchyLevel::Bin, bin_id.as_str()))?;

        let removed = level.bins.remove(index);
        tracing::info!(
            level_id = %level_id,
            bin_id = %removed.id,
            full_code = %removed.full_code,
            quantity = removed.quantity,
            "Bin deleted"
        );

        let level = level.clone();
        let mut chain = AncestorChain::warehouse(self.tree.warehouse(warehouse_id)?);
        chain.zone = Some(self.tree.zone(warehouse_id, zone_id)?.clone());
        chain.rack = Some(self.tree.rack(warehouse_id, zone_id, rack_id)?.clone());
        chain.level = Some(level);
        Ok(chain)
    }
}
