//! The current selection path and the view level derived from it.

use stockyard_domain::{
    breadcrumb_path, Breadcrumb, DomainError, HierarchyLevel, Level, NavigationTarget, Rack,
    Warehouse, Zone,
};

/// Selected warehouse, zone, rack and level.
///
/// Holds copies of the selected nodes so they can be rendered without another
/// lookup. A deeper selection is only ever set together with all of its
/// ancestors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub warehouse: Option<Warehouse>,
    pub zone: Option<Zone>,
    pub rack: Option<Rack>,
    pub level: Option<Level>,
}

impl Selection {
    /// Resolve `target` against `warehouses`.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` naming the first id that does not resolve.
    pub fn resolve(warehouses: &[Warehouse], target: &NavigationTarget) -> Result<Self, DomainError> {
        match Self::walk(warehouses, target) {
            (selection, None) => Ok(selection),
            (_, Some(missing)) => Err(missing),
        }
    }

    /// Longest resolvable prefix of `target`; unresolvable tiers are dropped.
    pub fn resolve_prefix(warehouses: &[Warehouse], target: &NavigationTarget) -> Self {
        Self::walk(warehouses, target).0
    }

    fn walk(warehouses: &[Warehouse], target: &NavigationTarget) -> (Self, Option<DomainError>) {
        let mut selection = Self::default();

        let Some(warehouse) = warehouses.iter().find(|w| w.id == target.warehouse_id) else {
            let missing =
                DomainError::not_found(HierarchyLevel::Warehouse, target.warehouse_id.as_str());
            return (selection, Some(missing));
        };
        selection.warehouse = Some(warehouse.clone());

        let Some(zone_id) = &target.zone_id else {
            return (selection, None);
        };
        let Some(zone) = warehouse.zone(zone_id) else {
            return (selection, Some(DomainError::not_found(HierarchyLevel::Zone, zone_id.as_str())));
        };
        selection.zone = Some(zone.clone());

        let Some(rack_id) = &target.rack_id else {
            return (selection, None);
        };
        let Some(rack) = zone.rack(rack_id) else {
            return (selection, Some(DomainError::not_found(HierarchyLevel::Rack, rack_id.as_str())));
        };
        selection.rack = Some(rack.clone());

        let Some(level_id) = &target.level_id else {
            return (selection, None);
        };
        let Some(level) = rack.level(level_id) else {
            let missing = DomainError::not_found(HierarchyLevel::Level, level_id.as_str());
            return (selection, Some(missing));
        };
        selection.level = Some(level.clone());
        (selection, None)
    }

    /// The tier whose children are on screen: one below the deepest selection.
    pub fn view_level(&self) -> HierarchyLevel {
        if self.level.is_some() {
            HierarchyLevel::Bin
        } else if self.rack.is_some() {
            HierarchyLevel::Level
        } else if self.zone.is_some() {
            HierarchyLevel::Rack
        } else if self.warehouse.is_some() {
            HierarchyLevel::Zone
        } else {
            HierarchyLevel::Warehouse
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warehouse.is_none()
    }

    /// The selection as ids, or `None` when nothing is selected.
    pub fn target(&self) -> Option<NavigationTarget> {
        let warehouse = self.warehouse.as_ref()?;
        let mut target = NavigationTarget::warehouse(warehouse.id.clone());
        if let Some(zone) = &self.zone {
            target = target.zone(zone.id.clone());
            if let Some(rack) = &self.rack {
                target = target.rack(rack.id.clone());
                if let Some(level) = &self.level {
                    target = target.level(level.id.clone());
                }
            }
        }
        Some(target)
    }

    /// Id of the selected node at `level`, if any.
    pub fn selected_id(&self, level: HierarchyLevel) -> Option<&str> {
        match level {
            HierarchyLevel::Warehouse => self.warehouse.as_ref().map(|w| w.id.as_str()),
            HierarchyLevel::Zone => self.zone.as_ref().map(|z| z.id.as_str()),
            HierarchyLevel::Rack => self.rack.as_ref().map(|r| r.id.as_str()),
            HierarchyLevel::Level => self.level.as_ref().map(|l| l.id.as_str()),
            HierarchyLevel::Bin => None,
        }
    }

    /// Clear the selection at `level` and everything below it.
    pub fn clear_from(&mut self, level: HierarchyLevel) {
        match level {
            HierarchyLevel::Warehouse => *self = Self::default(),
            HierarchyLevel::Zone => {
                self.zone = None;
                self.rack = None;
                self.level = None;
            }
            HierarchyLevel::Rack => {
                self.rack = None;
                self.level = None;
            }
            HierarchyLevel::Level => self.level = None,
            HierarchyLevel::Bin => {}
        }
    }

    /// Drop the deepest selection. Returns `false` when nothing was selected.
    pub fn pop(&mut self) -> bool {
        match self.view_level().parent() {
            Some(deepest) => {
                self.clear_from(deepest);
                true
            }
            None => false,
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumb_path(
            self.warehouse.as_ref(),
            self.zone.as_ref(),
            self.rack.as_ref(),
            self.level.as_ref(),
        )
    }
}
