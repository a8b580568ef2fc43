use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stockyard_domain::{
    CodeSequence, DomainError, HierarchyLevel, Level, LevelId, LocationTree, Rack, RackId,
    Warehouse, WarehouseId, Zone, ZoneId,
};

use super::*;
use crate::infrastructure::clock::{FixedClock, SequentialIds};
use crate::infrastructure::ports::MockClockPort;

fn seed() -> Vec<Warehouse> {
    vec![Warehouse::new("WH1", "Main Warehouse").with_id("w1")]
}

fn service_with(seed: Vec<Warehouse>, sequence: CodeSequence) -> HierarchyService {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).single().expect("valid timestamp");
    HierarchyService::new(
        LocationTree::init(seed).expect("seed"),
        Arc::new(FixedClock(now)),
        Arc::new(SequentialIds::default()),
        sequence,
    )
}

fn service() -> HierarchyService {
    service_with(seed(), CodeSequence::Monotonic)
}

fn w1() -> WarehouseId {
    WarehouseId::from("w1")
}

/// Warehouse w1 with zone Z-01, rack R-01 and level L-01, returning their ids.
fn with_level(service: &mut HierarchyService) -> (ZoneId, RackId, LevelId) {
    let zone = service
        .add_zone(&w1(), NewLocation::named("Good Condition"))
        .expect("zone");
    let rack = service
        .add_rack(&w1(), &zone.id, NewLocation::named("Rack A"))
        .expect("rack");
    let level = service
        .add_level(&w1(), &zone.id, &rack.id, NewLocation::named("Floor"))
        .expect("level");
    (zone.id, rack.id, level.id)
}

#[test]
fn generates_zone_codes_in_order() {
    let mut service = service();

    let first = service
        .add_zone(&w1(), NewLocation::named("Good Condition"))
        .expect("first zone");
    let second = service
        .add_zone(&w1(), NewLocation::named("Damaged"))
        .expect("second zone");

    assert_eq!(first.code, "Z-01");
    assert_eq!(second.code, "Z-02");
    assert_ne!(first.id, second.id);
    let codes: Vec<_> = service.tree().warehouses()[0]
        .zones
        .iter()
        .map(|z| z.code.as_str())
        .collect();
    assert_eq!(codes, ["Z-01", "Z-02"]);
}

#[test]
fn keeps_explicit_codes_and_trims_names() {
    let mut service = service();

    let zone = service
        .add_zone(&w1(), NewLocation::named("  Returns  ").with_code(" RET "))
        .expect("zone");

    assert_eq!(zone.code, "RET");
    assert_eq!(zone.name, "Returns");
}

#[test]
fn preview_matches_the_generated_code() {
    let mut service = service();
    let (zone_id, _, _) = with_level(&mut service);

    let preview = service.next_rack_code(&w1(), &zone_id).expect("preview");
    let rack = service
        .add_rack(&w1(), &zone_id, NewLocation::named("Rack B"))
        .expect("rack");

    assert_eq!(preview, "R-02");
    assert_eq!(rack.code, preview);
}

#[test]
fn blank_name_is_rejected_without_mutation() {
    let mut service = service();

    let err = service
        .add_zone(&w1(), NewLocation::named("   "))
        .expect_err("blank name");

    assert!(matches!(err, HierarchyError::Domain(DomainError::Validation(_))));
    assert!(service.tree().warehouses()[0].zones.is_empty());
}

#[test]
fn missing_parent_is_reported_by_level() {
    let mut service = service();

    let err = service
        .add_rack(&w1(), &ZoneId::from("nope"), NewLocation::named("Rack"))
        .expect_err("missing zone");
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        DomainError::not_found(HierarchyLevel::Zone, "nope").to_string()
    );

    let err = service
        .add_zone(&WarehouseId::from("ghost"), NewLocation::named("Zone"))
        .expect_err("missing warehouse");
    assert!(err.is_not_found());
}

#[test]
fn zone_with_a_rack_cannot_be_deleted() {
    let mut service = service();
    let zone = service
        .add_zone(&w1(), NewLocation::named("Good Condition"))
        .expect("zone");
    service
        .add_rack(&w1(), &zone.id, NewLocation::named("Rack A"))
        .expect("rack");
    let before = service.snapshot();

    let err = service.delete_zone(&w1(), &zone.id).expect_err("has rack");

    assert_eq!(err.blocking_child_count(), Some(1));
    assert_eq!(err.to_string(), "Cannot delete this zone because it contains 1 rack");
    assert_eq!(service.snapshot(), before);
}

#[test]
fn deleting_returns_refreshed_ancestors() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);

    let chain = service
        .delete_level(&w1(), &zone_id, &rack_id, &level_id)
        .expect("empty level");

    assert_eq!(chain.warehouse.id, w1());
    assert_eq!(chain.zone.as_ref().map(|z| &z.id), Some(&zone_id));
    let rack = chain.rack.expect("rack");
    assert!(rack.levels.is_empty());
    assert!(chain.level.is_none());
    // The warehouse copy reflects the delete too.
    assert!(chain.warehouse.zones[0].racks[0].levels.is_empty());
}

#[test]
fn delete_of_unknown_child_is_not_found() {
    let mut service = service();
    let (zone_id, _, _) = with_level(&mut service);

    let err = service
        .delete_rack(&w1(), &zone_id, &RackId::from("nope"))
        .expect_err("missing rack");

    assert!(err.is_not_found());
}

#[test]
fn sibling_count_sequence_collides_after_delete() {
    let mut service = service_with(seed(), CodeSequence::SiblingCount);
    let first = service.add_zone(&w1(), NewLocation::named("A")).expect("Z-01");
    service.add_zone(&w1(), NewLocation::named("B")).expect("Z-02");
    service.delete_zone(&w1(), &first.id).expect("delete Z-01");

    let third = service.add_zone(&w1(), NewLocation::named("C")).expect("zone");

    assert_eq!(third.code, "Z-02");
    let zones = &service.tree().warehouses()[0].zones;
    assert_eq!(zones.iter().filter(|z| z.code == "Z-02").count(), 2);
}

#[test]
fn monotonic_sequence_never_reuses_codes() {
    let mut service = service();
    let first = service.add_zone(&w1(), NewLocation::named("A")).expect("Z-01");
    service.add_zone(&w1(), NewLocation::named("B")).expect("Z-02");
    service.delete_zone(&w1(), &first.id).expect("delete Z-01");

    let third = service.add_zone(&w1(), NewLocation::named("C")).expect("zone");

    assert_eq!(third.code, "Z-03");
    assert_eq!(service.tree().warehouses()[0].child_sequence, 3);
}

#[test]
fn update_merges_only_supplied_fields() {
    let mut service = service();
    let zone = service
        .add_zone(&w1(), NewLocation::named("Good Condition"))
        .expect("zone");

    let updated = service
        .update_zone(
            &w1(),
            &zone.id,
            LocationPatch {
                name: Some("Quarantine".into()),
                ..LocationPatch::default()
            },
        )
        .expect("update");

    assert_eq!(updated.name, "Quarantine");
    assert_eq!(updated.code, "Z-01");

    let err = service
        .update_zone(
            &w1(),
            &zone.id,
            LocationPatch {
                code: Some(" ".into()),
                ..LocationPatch::default()
            },
        )
        .expect_err("blank code");
    assert_eq!(err.to_string(), "Validation failed: Zone code cannot be empty");
}

#[test]
fn generated_bins_carry_the_full_address() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);

    let first = service
        .add_bin(&w1(), &zone_id, &rack_id, &level_id, NewBin::default())
        .expect("bin");
    let second = service
        .add_bin(
            &w1(),
            &zone_id,
            &rack_id,
            &level_id,
            NewBin {
                name: "Pallet slot".into(),
                quantity: 4,
                allow_mixed_items: true,
                ..NewBin::default()
            },
        )
        .expect("bin");

    assert_eq!(first.full_code, "WH1-Z-01-R-01-L-01-B01");
    assert_eq!(first.code, first.full_code);
    assert_eq!(first.name, first.code);
    assert_eq!(second.full_code, "WH1-Z-01-R-01-L-01-B02");
    assert_eq!(second.name, "Pallet slot");
    assert_eq!(second.quantity, 4);
    assert!(second.allow_mixed_items);
}

#[test]
fn explicit_bin_code_becomes_the_last_segment() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);

    let bin = service
        .add_bin(
            &w1(),
            &zone_id,
            &rack_id,
            &level_id,
            NewBin {
                code: Some("X9".into()),
                ..NewBin::default()
            },
        )
        .expect("bin");

    assert_eq!(bin.code, "X9");
    assert_eq!(bin.full_code, "WH1-Z-01-R-01-L-01-X9");
}

#[test]
fn bins_are_stamped_by_the_clock() {
    let stamp = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).single().expect("valid timestamp");
    let mut clock = MockClockPort::new();
    clock.expect_now().times(1).returning(move || stamp);

    let seed = vec![Warehouse::new("WH1", "Main").with_id("w1").with_zone(
        Zone::new("Z-01", "Bulk").with_id("z1").with_rack(
            Rack::new("R-01", "A")
                .with_id("r1")
                .with_level(Level::new("L-01", "Floor").with_id("l1")),
        ),
    )];
    let mut service = HierarchyService::new(
        LocationTree::init(seed).expect("seed"),
        Arc::new(clock),
        Arc::new(SequentialIds::default()),
        CodeSequence::Monotonic,
    );

    let bin = service
        .add_bin(
            &w1(),
            &"z1".into(),
            &"r1".into(),
            &"l1".into(),
            NewBin::default(),
        )
        .expect("bin");

    assert_eq!(bin.created_at, stamp);
}

#[test]
fn stocked_bin_is_still_structurally_deletable() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);
    let bin = service
        .add_bin(
            &w1(),
            &zone_id,
            &rack_id,
            &level_id,
            NewBin {
                quantity: 12,
                ..NewBin::default()
            },
        )
        .expect("bin");

    let chain = service
        .delete_bin(&w1(), &zone_id, &rack_id, &level_id, &bin.id)
        .expect("delete");

    assert!(chain.level.expect("level").bins.is_empty());
}

#[test]
fn bin_code_edit_recomposes_full_code() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);
    let bin = service
        .add_bin(&w1(), &zone_id, &rack_id, &level_id, NewBin::default())
        .expect("bin");

    let updated = service
        .update_bin(
            &w1(),
            &zone_id,
            &rack_id,
            &level_id,
            &bin.id,
            BinPatch {
                code: Some("TOP".into()),
                quantity: Some(7),
                ..BinPatch::default()
            },
        )
        .expect("update");

    assert_eq!(updated.code, "TOP");
    assert_eq!(updated.full_code, "WH1-Z-01-R-01-L-01-TOP");
    assert_eq!(updated.quantity, 7);
    assert_eq!(updated.name, bin.name);
}

#[test]
fn ancestor_code_edit_leaves_bin_addresses_alone() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);
    let bin = service
        .add_bin(&w1(), &zone_id, &rack_id, &level_id, NewBin::default())
        .expect("bin");

    service
        .update_zone(
            &w1(),
            &zone_id,
            LocationPatch {
                code: Some("Z-09".into()),
                ..LocationPatch::default()
            },
        )
        .expect("update");

    let stored = service
        .tree()
        .bin(&w1(), &zone_id, &rack_id, &level_id, &bin.id)
        .expect("bin");
    assert_eq!(stored.full_code, "WH1-Z-01-R-01-L-01-B01");
}

#[test]
fn warehouse_codes_must_be_unique() {
    let mut service = service();

    let err = service
        .add_warehouse(NewLocation::named("Overflow").with_code("WH1"))
        .expect_err("duplicate");
    assert!(matches!(
        err,
        HierarchyError::Domain(DomainError::DuplicateCode { .. })
    ));

    let err = service
        .add_warehouse(NewLocation::named("No code"))
        .expect_err("missing code");
    assert!(matches!(err, HierarchyError::Domain(DomainError::Validation(_))));

    let overflow = service
        .add_warehouse(NewLocation::named("Overflow").with_code("WH2"))
        .expect("warehouse");
    let err = service
        .update_warehouse(
            &overflow.id,
            LocationPatch {
                code: Some("WH1".into()),
                ..LocationPatch::default()
            },
        )
        .expect_err("taken");
    assert!(matches!(
        err,
        HierarchyError::Domain(DomainError::DuplicateCode { .. })
    ));
}

#[test]
fn warehouse_with_zones_cannot_be_deleted() {
    let mut service = service();
    service
        .add_zone(&w1(), NewLocation::named("Bulk"))
        .expect("zone");

    let err = service.delete_warehouse(&w1()).expect_err("has zone");
    assert_eq!(err.blocking_child_count(), Some(1));

    let empty = service
        .add_warehouse(NewLocation::named("Overflow").with_code("WH2"))
        .expect("warehouse");
    let removed = service.delete_warehouse(&empty.id).expect("empty");
    assert_eq!(removed.code, "WH2");
    assert_eq!(service.tree().warehouses().len(), 1);
}

#[test]
fn load_replaces_the_tree() {
    let mut service = service();
    service
        .add_zone(&w1(), NewLocation::named("Bulk"))
        .expect("zone");

    service
        .load(vec![Warehouse::new("WH9", "Remote").with_id("w9")])
        .expect("load");

    assert_eq!(service.snapshot().len(), 1);
    assert_eq!(service.snapshot()[0].code, "WH9");

    service.teardown();
    assert!(service.tree().is_empty());
}

#[test]
fn generated_ids_skip_ones_already_in_use() {
    let seed = vec![Warehouse::new("WH1", "Main")
        .with_id("w1")
        .with_zone(Zone::new("Z-01", "Taken").with_id("id-1"))];
    let mut service = service_with(seed, CodeSequence::Monotonic);

    let zone = service
        .add_zone(&w1(), NewLocation::named("Fresh"))
        .expect("zone");

    assert_eq!(zone.id.as_str(), "id-2");
    assert_eq!(zone.code, "Z-02");
}

#[test]
fn bin_stats_follow_adds() {
    let mut service = service();
    let (zone_id, rack_id, level_id) = with_level(&mut service);
    for quantity in [0, 5] {
        service
            .add_bin(
                &w1(),
                &zone_id,
                &rack_id,
                &level_id,
                NewBin {
                    quantity,
                    ..NewBin::default()
                },
            )
            .expect("bin");
    }

    let stats = stockyard_domain::warehouse_stats(&service.tree().warehouses()[0]);
    assert_eq!((stats.zones, stats.racks, stats.levels, stats.bins), (1, 1, 1, 2));
    assert_eq!(stats.occupied_bins, 1);
    assert_eq!(stats.total_quantity, 5);
}
