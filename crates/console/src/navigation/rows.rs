//! Row summaries for the hierarchy grid.

use stockyard_domain::{
    can_delete, filter_nodes, level_stats, rack_stats, warehouse_stats, zone_stats, Bin,
    DescendantStats, Level, LocationItem, LocationNode, Rack, Warehouse, Zone,
};

/// One child row of the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub item: LocationItem,
    /// Direct-children badge such as "3 racks"; `None` for bins
    pub children: Option<String>,
    pub stats: DescendantStats,
    pub can_delete: bool,
}

impl LocationRow {
    pub fn code(&self) -> &str {
        self.item.code()
    }

    pub fn name(&self) -> &str {
        self.item.name()
    }
}

/// Rows for `nodes` matching `query`, in sibling order.
pub(crate) fn rows_for<T>(nodes: &[T], query: &str) -> Vec<LocationRow>
where
    T: LocationNode + Clone + Into<LocationItem> + Summarized,
{
    filter_nodes(nodes, query)
        .into_iter()
        .map(|node| LocationRow {
            children: T::LEVEL.child().map(|c| c.count_label(node.child_count())),
            stats: node.stats(),
            can_delete: can_delete(node),
            item: node.clone().into(),
        })
        .collect()
}

/// Descendant statistics for one tier.
pub(crate) trait Summarized {
    fn stats(&self) -> DescendantStats;
}

impl Summarized for Warehouse {
    fn stats(&self) -> DescendantStats {
        warehouse_stats(self)
    }
}

impl Summarized for Zone {
    fn stats(&self) -> DescendantStats {
        zone_stats(self)
    }
}

impl Summarized for Rack {
    fn stats(&self) -> DescendantStats {
        rack_stats(self)
    }
}

impl Summarized for Level {
    fn stats(&self) -> DescendantStats {
        level_stats(self)
    }
}

impl Summarized for Bin {
    fn stats(&self) -> DescendantStats {
        DescendantStats {
            occupied_bins: usize::from(self.is_occupied()),
            total_quantity: u64::from(self.quantity),
            ..DescendantStats::default()
        }
    }
}
