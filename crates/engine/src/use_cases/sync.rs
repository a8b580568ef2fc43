//! Remote-backed creates.
//!
//! With an inventory API configured, a create is sent to the backend and then
//! the whole tree is reloaded from it; the local tree is never patched
//! optimistically. Without one, creates go straight to the local service.
//! Remote failures are surfaced once, without retry.

use std::sync::Arc;

use stockyard_domain::{
    HierarchyLevel, LevelId, LocationItem, LocationName, RackId, Warehouse, WarehouseId, ZoneId,
};

use crate::infrastructure::ports::{CreateNodeRequest, InventoryApiPort};
use crate::use_cases::hierarchy::{
    explicit_code, HierarchyError, HierarchyService, NewBin, NewLocation,
};

/// What a create did to the local tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Offline: the node was added locally.
    Applied(LocationItem),
    /// Remote: the backend accepted the create and the tree was reloaded.
    Reloaded { warehouses: usize },
}

/// Routes creates either to the local service or to the inventory API.
#[derive(Clone, Default)]
pub struct HierarchySync {
    api: Option<Arc<dyn InventoryApiPort>>,
}

impl HierarchySync {
    pub fn new(api: Option<Arc<dyn InventoryApiPort>>) -> Self {
        Self { api }
    }

    pub fn offline() -> Self {
        Self::default()
    }

    pub fn is_remote(&self) -> bool {
        self.api.is_some()
    }

    /// Refuse a mutation the inventory API has no endpoint for. Always allowed
    /// offline.
    pub fn ensure_local(
        &self,
        level: HierarchyLevel,
        operation: &'static str,
    ) -> Result<(), HierarchyError> {
        if self.api.is_none() {
            return Ok(());
        }
        tracing::warn!(level = %level, operation, "Mutation refused in remote mode");
        Err(HierarchyError::RemoteUnsupported { level, operation })
    }

    /// Fetch the full snapshot and replace the local tree with it. A no-op when
    /// offline.
    pub async fn load(&self, service: &mut HierarchyService) -> Result<(), HierarchyError> {
        let Some(api) = &self.api else {
            return Ok(());
        };
        let snapshot = api.load_tree().await?;
        service.load(snapshot)?;
        Ok(())
    }

    pub async fn create_zone(
        &self,
        service: &mut HierarchyService,
        warehouse_id: &WarehouseId,
        draft: NewLocation,
    ) -> Result<CreateOutcome, HierarchyError> {
        let Some(api) = self.api.clone() else {
            let zone = service.add_zone(warehouse_id, draft)?;
            return Ok(CreateOutcome::Applied(zone.into()));
        };

        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => service.next_zone_code(warehouse_id)?,
        };
        let request = location_request(HierarchyLevel::Zone, warehouse_id.as_str(), code, draft.name)?;
        api.create_zone(&request).await?;
        self.reload(api.as_ref(), service, HierarchyLevel::Zone).await
    }

    pub async fn create_rack(
        &self,
        service: &mut HierarchyService,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        draft: NewLocation,
    ) -> Result<CreateOutcome, HierarchyError> {
        let Some(api) = self.api.clone() else {
            let rack = service.add_rack(warehouse_id, zone_id, draft)?;
            return Ok(CreateOutcome::Applied(rack.into()));
        };

        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => service.next_rack_code(warehouse_id, zone_id)?,
        };
        let request = location_request(HierarchyLevel::Rack, zone_id.as_str(), code, draft.name)?;
        api.create_rack(&request).await?;
        self.reload(api.as_ref(), service, HierarchyLevel::Rack).await
    }

    pub async fn create_level(
        &self,
        service: &mut HierarchyService,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        draft: NewLocation,
    ) -> Result<CreateOutcome, HierarchyError> {
        let Some(api) = self.api.clone() else {
            let level = service.add_level(warehouse_id, zone_id, rack_id, draft)?;
            return Ok(CreateOutcome::Applied(level.into()));
        };

        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => service.next_level_code(warehouse_id, zone_id, rack_id)?,
        };
        let request = location_request(HierarchyLevel::Level, rack_id.as_str(), code, draft.name)?;
        api.create_level(&request).await?;
        self.reload(api.as_ref(), service, HierarchyLevel::Level).await
    }

    pub async fn create_bin(
        &self,
        service: &mut HierarchyService,
        warehouse_id: &WarehouseId,
        zone_id: &ZoneId,
        rack_id: &RackId,
        level_id: &LevelId,
        draft: NewBin,
    ) -> Result<CreateOutcome, HierarchyError> {
        let Some(api) = self.api.clone() else {
            let bin = service.add_bin(warehouse_id, zone_id, rack_id, level_id, draft)?;
            return Ok(CreateOutcome::Applied(bin.into()));
        };

        let code = match explicit_code(draft.code.as_deref()) {
            Some(code) => code,
            None => service.next_bin_code(warehouse_id, zone_id, rack_id, level_id)?,
        };
        let name = if draft.name.trim().is_empty() {
            code.clone()
        } else {
            draft.name
        };
        let mut request = location_request(HierarchyLevel::Bin, level_id.as_str(), code, name)?;
        request.description = draft.description.filter(|d| !d.trim().is_empty());
        request.quantity = Some(draft.quantity);
        request.allow_mixed_items = Some(draft.allow_mixed_items);

        api.create_bin(&request).await?;
        self.reload(api.as_ref(), service, HierarchyLevel::Bin).await
    }

    async fn reload(
        &self,
        api: &dyn InventoryApiPort,
        service: &mut HierarchyService,
        level: HierarchyLevel,
    ) -> Result<CreateOutcome, HierarchyError> {
        let snapshot: Vec<Warehouse> = api.load_tree().await?;
        let warehouses = snapshot.len();
        service.load(snapshot)?;
        tracing::info!(level = %level, warehouses, "Remote create applied; tree reloaded");
        Ok(CreateOutcome::Reloaded { warehouses })
    }
}

fn location_request(
    level: HierarchyLevel,
    parent_id: &str,
    code: String,
    name: String,
) -> Result<CreateNodeRequest, HierarchyError> {
    let name = LocationName::for_level(level, name)?;
    Ok(CreateNodeRequest::new(parent_id, code, name))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use stockyard_domain::{CodeSequence, LocationTree, Zone};

    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialIds};
    use crate::infrastructure::ports::{ApiError, MockInventoryApiPort};

    fn service() -> HierarchyService {
        HierarchyService::new(
            LocationTree::init(vec![Warehouse::new("WH1", "Main").with_id("w1")]).expect("seed"),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialIds::default()),
            CodeSequence::Monotonic,
        )
    }

    fn remote_snapshot() -> Vec<Warehouse> {
        vec![Warehouse::new("WH1", "Main")
            .with_id("w1")
            .with_zone(Zone::new("Z-01", "Good Condition").with_id("42"))]
    }

    #[tokio::test]
    async fn offline_create_applies_locally() {
        let sync = HierarchySync::offline();
        let mut service = service();

        let outcome = sync
            .create_zone(&mut service, &"w1".into(), NewLocation::named("Bulk"))
            .await
            .expect("create");

        match outcome {
            CreateOutcome::Applied(item) => assert_eq!(item.code(), "Z-01"),
            other => panic!("expected local apply, got {other:?}"),
        }
        assert!(!sync.is_remote());
    }

    #[tokio::test]
    async fn remote_create_sends_planned_code_then_reloads() {
        let mut api = MockInventoryApiPort::new();
        api.expect_create_zone()
            .withf(|request| {
                request.parent_id == "w1" && request.code == "Z-01" && request.name == "Good Condition"
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_load_tree()
            .times(1)
            .returning(|| Ok(remote_snapshot()));

        let sync = HierarchySync::new(Some(Arc::new(api)));
        let mut service = service();

        let outcome = sync
            .create_zone(&mut service, &"w1".into(), NewLocation::named("Good Condition"))
            .await
            .expect("create");

        assert_eq!(outcome, CreateOutcome::Reloaded { warehouses: 1 });
        // The tree is the backend's, including its id.
        assert_eq!(service.snapshot()[0].zones[0].id.as_str(), "42");
    }

    #[tokio::test]
    async fn remote_failure_leaves_tree_untouched() {
        let mut api = MockInventoryApiPort::new();
        api.expect_create_rack()
            .times(1)
            .returning(|_| Err(ApiError::status("api/racks", 500, "boom")));
        api.expect_load_tree().times(0);

        let sync = HierarchySync::new(Some(Arc::new(api)));
        let mut service = service();
        service.load(remote_snapshot()).expect("seed");
        let before = service.snapshot();

        let err = sync
            .create_rack(
                &mut service,
                &"w1".into(),
                &"42".into(),
                NewLocation::named("Rack A"),
            )
            .await
            .expect_err("remote failure");

        assert!(matches!(err, HierarchyError::Remote(_)));
        assert_eq!(service.snapshot(), before);
    }

    #[tokio::test]
    async fn remote_create_validates_before_sending() {
        let mut api = MockInventoryApiPort::new();
        api.expect_create_zone().times(0);

        let sync = HierarchySync::new(Some(Arc::new(api)));
        let mut service = service();

        let err = sync
            .create_zone(&mut service, &"w1".into(), NewLocation::named(" "))
            .await
            .expect_err("blank name");

        assert!(matches!(err, HierarchyError::Domain(_)));
    }

    #[tokio::test]
    async fn remote_bin_request_carries_stock_fields() {
        let mut api = MockInventoryApiPort::new();
        api.expect_create_bin()
            .withf(|request| {
                request.code == "WH1-Z-01-R-01-L-01-B01"
                    && request.name == request.code
                    && request.quantity == Some(3)
                    && request.allow_mixed_items == Some(false)
                    && request.description.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_load_tree().returning(|| Ok(remote_snapshot()));

        let sync = HierarchySync::new(Some(Arc::new(api)));
        let mut service = service();
        let zone = service
            .add_zone(&"w1".into(), NewLocation::named("Z"))
            .expect("zone");
        let rack = service
            .add_rack(&"w1".into(), &zone.id, NewLocation::named("R"))
            .expect("rack");
        let level = service
            .add_level(&"w1".into(), &zone.id, &rack.id, NewLocation::named("L"))
            .expect("level");

        sync.create_bin(
            &mut service,
            &"w1".into(),
            &zone.id,
            &rack.id,
            &level.id,
            NewBin {
                quantity: 3,
                ..NewBin::default()
            },
        )
        .await
        .expect("create");
    }

    #[tokio::test]
    async fn load_replaces_tree_from_api() {
        let mut api = MockInventoryApiPort::new();
        api.expect_load_tree()
            .times(1)
            .returning(|| Ok(remote_snapshot()));

        let sync = HierarchySync::new(Some(Arc::new(api)));
        let mut service = service();
        sync.load(&mut service).await.expect("load");

        assert_eq!(service.snapshot()[0].zones.len(), 1);
    }

    #[test]
    fn edits_and_deletes_are_refused_in_remote_mode() {
        let mut api = MockInventoryApiPort::new();
        api.expect_load_tree().times(0);
        api.expect_create_zone().times(0);

        let remote = HierarchySync::new(Some(Arc::new(api)));
        let err = remote
            .ensure_local(HierarchyLevel::Zone, "Deleting")
            .expect_err("remote");
        assert!(matches!(
            err,
            HierarchyError::RemoteUnsupported {
                level: HierarchyLevel::Zone,
                operation: "Deleting"
            }
        ));
        assert_eq!(
            err.to_string(),
            "Deleting a zone is not supported while an inventory API is configured"
        );

        HierarchySync::offline()
            .ensure_local(HierarchyLevel::Warehouse, "Creating")
            .expect("offline allows local mutations");
    }
}
