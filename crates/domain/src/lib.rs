pub mod aggregates;
pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod level;
pub mod value_objects;

pub use aggregates::LocationTree;

pub use entities::{Bin, LocationItem, LocationNode, Level, Rack, Warehouse, Zone};

pub use error::DomainError;

pub use hierarchy::{
    breadcrumb_path, can_delete, delete_violation, filter_nodes, item_delete_violation,
    item_stats, level_stats, matches_query, rack_stats, warehouse_stats, zone_stats, Breadcrumb,
    DescendantStats, NavigationTarget,
};

pub use ids::{BinId, LevelId, RackId, WarehouseId, ZoneId};

pub use level::HierarchyLevel;

pub use value_objects::{BinCode, CodeSequence, Description, LocationCode, LocationName};
