//! Pure helpers over the location hierarchy
//!
//! Shared by the hierarchy service and the navigation controller:
//! - `breadcrumb` - ordered path of the current selection
//! - `eligibility` - cascade-guard checks
//! - `stats` - descendant counts for display badges
//! - `search` - sibling-list filtering

mod breadcrumb;
mod eligibility;
mod search;
mod stats;

pub use breadcrumb::{breadcrumb_path, Breadcrumb, NavigationTarget};
pub use eligibility::{can_delete, delete_violation, item_delete_violation};
pub use search::{filter_nodes, matches_query};
pub use stats::{item_stats, level_stats, rack_stats, warehouse_stats, zone_stats, DescendantStats};
