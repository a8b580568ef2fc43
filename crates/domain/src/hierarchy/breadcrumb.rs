//! Breadcrumb path construction

use serde::{Deserialize, Serialize};

use crate::entities::{Level, Rack, Warehouse, Zone};
use crate::level::HierarchyLevel;
use crate::{LevelId, RackId, WarehouseId, ZoneId};

/// A selection path by id: warehouse plus optional zone, rack and level.
///
/// Trailing `None`s mean "not selected". A target never skips a level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub warehouse_id: WarehouseId,
    pub zone_id: Option<ZoneId>,
    pub rack_id: Option<RackId>,
    pub level_id: Option<LevelId>,
}

impl NavigationTarget {
    pub fn warehouse(warehouse_id: WarehouseId) -> Self {
        Self {
            warehouse_id,
            zone_id: None,
            rack_id: None,
            level_id: None,
        }
    }

    pub fn zone(mut self, zone_id: ZoneId) -> Self {
        self.zone_id = Some(zone_id);
        self
    }

    pub fn rack(mut self, rack_id: RackId) -> Self {
        self.rack_id = Some(rack_id);
        self
    }

    pub fn level(mut self, level_id: LevelId) -> Self {
        self.level_id = Some(level_id);
        self
    }

    /// Deepest tier named by this target.
    pub fn deepest(&self) -> HierarchyLevel {
        if self.level_id.is_some() {
            HierarchyLevel::Level
        } else if self.rack_id.is_some() {
            HierarchyLevel::Rack
        } else if self.zone_id.is_some() {
            HierarchyLevel::Zone
        } else {
            HierarchyLevel::Warehouse
        }
    }
}

/// One clickable segment of the breadcrumb path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// The segment's code, shown as its label
    pub label: String,
    pub level: HierarchyLevel,
    /// Selection prefix up to and including this segment
    pub target: NavigationTarget,
}

impl Breadcrumb {
    /// Re-run navigation with this segment's prefix.
    pub fn activate<R>(&self, navigate: impl FnOnce(NavigationTarget) -> R) -> R {
        navigate(self.target.clone())
    }
}

/// Build the breadcrumb path for the current selection.
///
/// One entry per selected tier, outermost first. The path stops at the first
/// unselected tier.
pub fn breadcrumb_path(
    warehouse: Option<&Warehouse>,
    zone: Option<&Zone>,
    rack: Option<&Rack>,
    level: Option<&Level>,
) -> Vec<Breadcrumb> {
    let mut path = Vec::with_capacity(4);
    let Some(warehouse) = warehouse else {
        return path;
    };
    let mut target = NavigationTarget::warehouse(warehouse.id.clone());
    path.push(Breadcrumb {
        label: warehouse.code.clone(),
        level: HierarchyLevel::Warehouse,
        target: target.clone(),
    });

    let Some(zone) = zone else {
        return path;
    };
    target = target.zone(zone.id.clone());
    path.push(Breadcrumb {
        label: zone.code.clone(),
        level: HierarchyLevel::Zone,
        target: target.clone(),
    });

    let Some(rack) = rack else {
        return path;
    };
    target = target.rack(rack.id.clone());
    path.push(Breadcrumb {
        label: rack.code.clone(),
        level: HierarchyLevel::Rack,
        target: target.clone(),
    });

    let Some(level) = level else {
        return path;
    };
    target = target.level(level.id.clone());
    path.push(Breadcrumb {
        label: level.code.clone(),
        level: HierarchyLevel::Level,
        target,
    });
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_has_one_entry_per_selection() {
        let w = Warehouse::new("W1", "Main").with_id("w1");
        let z = Zone::new("Z2", "Damaged").with_id("z2");
        let r = Rack::new("R1", "Rack").with_id("r1");

        let path = breadcrumb_path(Some(&w), Some(&z), Some(&r), None);
        let labels: Vec<&str> = path.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["W1", "Z2", "R1"]);

        let zone_prefix = path[1].activate(|target| target);
        assert_eq!(
            zone_prefix,
            NavigationTarget::warehouse("w1".into()).zone("z2".into())
        );
        assert_eq!(path[2].target.deepest(), HierarchyLevel::Rack);
    }

    #[test]
    fn empty_selection_has_no_path() {
        assert!(breadcrumb_path(None, None, None, None).is_empty());
    }
}
