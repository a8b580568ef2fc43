//! Plain-text rendering of controller state.

use std::fmt::Write as _;

use stockyard_domain::{warehouse_stats, Breadcrumb, DescendantStats, HierarchyLevel, Warehouse};

use crate::navigation::{LocationRow, NavigationController};

/// `WH1 / Z-01 / R-01`, or `(all warehouses)` at the top.
pub fn breadcrumbs(path: &[Breadcrumb]) -> String {
    if path.is_empty() {
        return "(all warehouses)".to_string();
    }
    path.iter()
        .map(|crumb| crumb.label.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Descendant badge, e.g. `2 racks, 3 levels, 4 bins (1 occupied, qty 24)`.
pub fn stats(level: HierarchyLevel, stats: &DescendantStats) -> String {
    let mut parts = Vec::new();
    let tiers = [
        (HierarchyLevel::Zone, stats.zones),
        (HierarchyLevel::Rack, stats.racks),
        (HierarchyLevel::Level, stats.levels),
        (HierarchyLevel::Bin, stats.bins),
    ];
    for (tier, count) in tiers {
        if tier.depth() > level.depth() {
            parts.push(tier.count_label(count));
        }
    }
    let mut out = parts.join(", ");
    if level != HierarchyLevel::Bin && stats.bins > 0 {
        let _ = write!(out, " ({} occupied, qty {})", stats.occupied_bins, stats.total_quantity);
    }
    out
}

pub fn row(row: &LocationRow) -> String {
    let level = row.item.level();
    let mut line = format!("{:<24} {:<24}", row.code(), row.name());
    match level {
        HierarchyLevel::Bin => {
            let _ = write!(line, " qty {}", row.stats.total_quantity);
        }
        _ => {
            let _ = write!(line, " {}", stats(level, &row.stats));
        }
    }
    if !row.can_delete {
        line.push_str(" [locked]");
    }
    line
}

/// Current view: breadcrumb header, then one line per visible child.
pub fn view(controller: &NavigationController, query: &str) -> String {
    let mut out = String::new();
    let level = controller.view_level();
    let _ = writeln!(out, "{}", breadcrumbs(&controller.breadcrumbs()));
    let rows = controller.rows(query);
    if rows.is_empty() {
        let _ = writeln!(out, "  no {}s", level.as_str());
    }
    for r in &rows {
        let _ = writeln!(out, "  {}", row(r));
    }
    out
}

/// Whole forest with per-warehouse totals.
pub fn tree(warehouses: &[Warehouse]) -> String {
    let mut out = String::new();
    for warehouse in warehouses {
        let _ = writeln!(
            out,
            "{} {} - {}",
            warehouse.code,
            warehouse.name,
            stats(HierarchyLevel::Warehouse, &warehouse_stats(warehouse))
        );
        for zone in &warehouse.zones {
            let _ = writeln!(out, "  {} {}", zone.code, zone.name);
            for rack in &zone.racks {
                let _ = writeln!(out, "    {} {}", rack.code, rack.name);
                for level in &rack.levels {
                    let _ = writeln!(out, "      {} {}", level.code, level.name);
                    for bin in &level.bins {
                        let _ = writeln!(out, "        {} qty {}", bin.full_code, bin.quantity);
                    }
                }
            }
        }
    }
    out
}
