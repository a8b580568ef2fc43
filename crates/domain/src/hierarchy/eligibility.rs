//! Cascade-guard checks
//!
//! A zone, rack or level can only be deleted once it is empty. Bins are always
//! structurally deletable; blocking a bin that still holds stock is a caller
//! policy, not a tree invariant.

use crate::entities::{LocationItem, LocationNode};
use crate::error::DomainError;
use crate::level::HierarchyLevel;

fn violation(level: HierarchyLevel, child_count: usize) -> Option<DomainError> {
    if level == HierarchyLevel::Bin || child_count == 0 {
        None
    } else {
        Some(DomainError::has_children(level, child_count))
    }
}

/// Whether `node` may be deleted right now.
pub fn can_delete<T: LocationNode>(node: &T) -> bool {
    delete_violation(node).is_none()
}

/// The cascade-guard error deleting `node` would produce, if any.
pub fn delete_violation<T: LocationNode>(node: &T) -> Option<DomainError> {
    violation(T::LEVEL, node.child_count())
}

pub fn item_delete_violation(item: &LocationItem) -> Option<DomainError> {
    violation(item.level(), item.child_count())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::entities::{Bin, Level, Rack, Zone};

    #[test]
    fn empty_containers_can_be_deleted() {
        assert!(can_delete(&Zone::new("Z-01", "Empty")));
        assert!(can_delete(&Rack::new("R-01", "Empty")));
        assert!(can_delete(&Level::new("L-01", "Empty")));
    }

    #[test]
    fn non_empty_zone_reports_rack_count() {
        let zone = Zone::new("Z-01", "Full")
            .with_rack(Rack::new("R-01", "A"))
            .with_rack(Rack::new("R-02", "B"));
        assert!(!can_delete(&zone));
        let err = delete_violation(&zone).expect("blocked");
        assert_eq!(err.to_string(), "Cannot delete this zone because it contains 2 racks");
    }

    #[test]
    fn bins_are_always_deletable() {
        let bin = Bin::new("B01", "W-Z-R-L-B01", "Bin", Utc::now()).with_quantity(12);
        assert!(can_delete(&bin));
        assert!(item_delete_violation(&LocationItem::Bin(bin)).is_none());
    }

    #[test]
    fn item_check_matches_typed_check() {
        let level = Level::new("L-01", "Top").with_bin(Bin::new("B01", "", "", Utc::now()));
        let err = item_delete_violation(&LocationItem::Level(level)).expect("blocked");
        assert_eq!(err, DomainError::has_children(HierarchyLevel::Level, 1));
    }
}
