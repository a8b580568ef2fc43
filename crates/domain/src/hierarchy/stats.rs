//! Descendant statistics for display badges
//!
//! Computed by full traversal on every call. Trees hold tens to a few hundred
//! nodes, so nothing is cached.

use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Level, LocationItem, Rack, Warehouse, Zone};

/// Counts of everything below one node. Tiers at or above the node stay 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescendantStats {
    pub zones: usize,
    pub racks: usize,
    pub levels: usize,
    pub bins: usize,
    /// Bins with `quantity > 0`
    pub occupied_bins: usize,
    pub total_quantity: u64,
}

impl DescendantStats {
    fn add_bin(&mut self, bin: &Bin) {
        self.bins += 1;
        if bin.is_occupied() {
            self.occupied_bins += 1;
        }
        self.total_quantity += u64::from(bin.quantity);
    }

    fn absorb(&mut self, other: DescendantStats) {
        self.zones += other.zones;
        self.racks += other.racks;
        self.levels += other.levels;
        self.bins += other.bins;
        self.occupied_bins += other.occupied_bins;
        self.total_quantity += other.total_quantity;
    }
}

pub fn level_stats(level: &Level) -> DescendantStats {
    let mut stats = DescendantStats::default();
    for bin in &level.bins {
        stats.add_bin(bin);
    }
    stats
}

pub fn rack_stats(rack: &Rack) -> DescendantStats {
    let mut stats = DescendantStats::default();
    for level in &rack.levels {
        stats.levels += 1;
        stats.absorb(level_stats(level));
    }
    stats
}

pub fn zone_stats(zone: &Zone) -> DescendantStats {
    let mut stats = DescendantStats::default();
    for rack in &zone.racks {
        stats.racks += 1;
        stats.absorb(rack_stats(rack));
    }
    stats
}

pub fn warehouse_stats(warehouse: &Warehouse) -> DescendantStats {
    let mut stats = DescendantStats::default();
    for zone in &warehouse.zones {
        stats.zones += 1;
        stats.absorb(zone_stats(zone));
    }
    stats
}

pub fn item_stats(item: &LocationItem) -> DescendantStats {
    match item {
        LocationItem::Warehouse(w) => warehouse_stats(w),
        LocationItem::Zone(z) => zone_stats(z),
        LocationItem::Rack(r) => rack_stats(r),
        LocationItem::Level(l) => level_stats(l),
        LocationItem::Bin(_) => DescendantStats::default(),
    }
}
