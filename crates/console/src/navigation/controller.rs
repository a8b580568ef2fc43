//! Navigation controller
//!
//! Owns where the user is in the hierarchy and which dialog is in flight. All
//! mutations go through the hierarchy service; after each successful one the
//! cached forest is replaced with the service's snapshot and the selection is
//! re-pointed at the fresh nodes by id.

use stockyard_domain::{
    item_delete_violation, Breadcrumb, DomainError, HierarchyLevel, LocationItem,
    NavigationTarget, Warehouse,
};
use stockyard_engine::{
    App, BinPatch, HierarchyError, HierarchyService, HierarchySync, LocationPatch, NewBin,
    NewLocation,
};

use super::modal::{LocationForm, Modal, ModalMode};
use super::rows::{rows_for, LocationRow};
use super::selection::Selection;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Select a {} before adding a {}", .required.as_str(), .level.as_str())]
    MissingSelection {
        level: HierarchyLevel,
        required: HierarchyLevel,
    },

    /// Cascade guard evaluated before the confirmation dialog opens
    #[error("{0}")]
    DeleteBlocked(DomainError),

    #[error("Cannot delete bin {code} because it still holds {quantity} items")]
    BinOccupied { code: String, quantity: u32 },

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("No add or edit dialog is open")]
    NoOpenModal,

    #[error("Bins have no children to open")]
    LeafNode,

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl From<DomainError> for NavigationError {
    fn from(e: DomainError) -> Self {
        Self::Hierarchy(e.into())
    }
}

/// Browsing state machine over one hierarchy service.
pub struct NavigationController {
    hierarchy: HierarchyService,
    sync: HierarchySync,
    warehouses: Vec<Warehouse>,
    selection: Selection,
    modal: Option<Modal>,
    pending_delete: Option<LocationItem>,
}

impl NavigationController {
    pub fn new(hierarchy: HierarchyService, sync: HierarchySync) -> Self {
        let warehouses = hierarchy.snapshot();
        Self {
            hierarchy,
            sync,
            warehouses,
            selection: Selection::default(),
            modal: None,
            pending_delete: None,
        }
    }

    pub fn from_app(app: App) -> Self {
        Self::new(app.hierarchy, app.sync)
    }

    pub fn hierarchy(&self) -> &HierarchyService {
        &self.hierarchy
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view_level(&self) -> HierarchyLevel {
        self.selection.view_level()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&LocationItem> {
        self.pending_delete.as_ref()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Replace the whole selection with `target`. Tiers the target leaves out
    /// become unselected. On error the selection is unchanged.
    pub fn navigate(&mut self, target: NavigationTarget) -> Result<HierarchyLevel, NavigationError> {
        let selection = Selection::resolve(&self.warehouses, &target)?;
        self.selection = selection;
        let view = self.view_level();
        tracing::debug!(path = ?target, view = %view, "Navigated");
        Ok(view)
    }

    /// Open `item`, showing its children. Bins have none.
    pub fn drill_down(&mut self, item: &LocationItem) -> Result<HierarchyLevel, NavigationError> {
        let parent = self.parent_of(item);
        let missing = || NavigationError::from(DomainError::not_found(item.level(), item.id()));
        let target = match item {
            LocationItem::Warehouse(w) => NavigationTarget::warehouse(w.id.clone()),
            LocationItem::Zone(z) => parent.ok_or_else(missing)?.zone(z.id.clone()),
            LocationItem::Rack(r) => parent.ok_or_else(missing)?.rack(r.id.clone()),
            LocationItem::Level(l) => parent.ok_or_else(missing)?.level(l.id.clone()),
            LocationItem::Bin(_) => return Err(NavigationError::LeafNode),
        };
        self.navigate(target)
    }

    /// Clear the selection and show the warehouse list.
    pub fn navigate_home(&mut self) {
        self.selection = Selection::default();
        tracing::debug!("Navigated to warehouse list");
    }

    /// Drop the deepest selection. Returns `false` at the top already.
    pub fn navigate_up(&mut self) -> bool {
        let moved = self.selection.pop();
        if moved {
            tracing::debug!(view = %self.view_level(), "Navigated up");
        }
        moved
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.selection.breadcrumbs()
    }

    /// Jump to a breadcrumb segment.
    pub fn activate(&mut self, crumb: &Breadcrumb) -> Result<HierarchyLevel, NavigationError> {
        crumb.activate(|target| self.navigate(target))
    }

    /// Children of the current view matching `query`.
    pub fn rows(&self, query: &str) -> Vec<LocationRow> {
        let s = &self.selection;
        match self.view_level() {
            HierarchyLevel::Warehouse => rows_for(&self.warehouses, query),
            HierarchyLevel::Zone => s.warehouse.as_ref().map_or_else(Vec::new, |w| rows_for(&w.zones, query)),
            HierarchyLevel::Rack => s.zone.as_ref().map_or_else(Vec::new, |z| rows_for(&z.racks, query)),
            HierarchyLevel::Level => s.rack.as_ref().map_or_else(Vec::new, |r| rows_for(&r.levels, query)),
            HierarchyLevel::Bin => s.level.as_ref().map_or_else(Vec::new, |l| rows_for(&l.bins, query)),
        }
    }

    // =========================================================================
    // Add / edit modal
    // =========================================================================

    /// Open the create dialog for the current view level.
    pub fn open_add_modal(&mut self) -> Result<&Modal, NavigationError> {
        let level = self.view_level();
        if level != HierarchyLevel::Warehouse {
            self.parent_target(level)?;
        }
        tracing::debug!(level = %level, "Opened add dialog");
        Ok(&*self.modal.insert(Modal::create(level)))
    }

    /// Open the edit dialog preloaded with `item`.
    pub fn edit(&mut self, item: LocationItem) -> &Modal {
        tracing::debug!(level = %item.level(), id = item.id(), "Opened edit dialog");
        self.modal.insert(Modal::edit(item))
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Submit the open dialog. The dialog closes on success and stays open
    /// with the error returned on failure.
    pub async fn submit(&mut self, form: LocationForm) -> Result<(), NavigationError> {
        let modal = self.modal.clone().ok_or(NavigationError::NoOpenModal)?;
        let result = match modal.mode {
            ModalMode::Create => self.create(modal.level, form).await,
            ModalMode::Edit(item) => self.update(&item, form),
        };

        match result {
            Ok(()) => {
                self.modal = None;
                self.refresh();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(level = %modal.level, error = %e, "Dialog submit failed");
                Err(e)
            }
        }
    }

    async fn create(&mut self, level: HierarchyLevel, form: LocationForm) -> Result<(), NavigationError> {
        let code = form.sanitized_code();
        let draft = NewLocation {
            code: code.clone(),
            name: form.name.clone(),
        };

        let missing = |required| NavigationError::MissingSelection { level, required };
        match level {
            HierarchyLevel::Warehouse => {
                self.sync.ensure_local(level, "Creating")?;
                self.hierarchy.add_warehouse(draft)?;
            }
            HierarchyLevel::Zone => {
                let parent = self.parent_target(level)?;
                self.sync
                    .create_zone(&mut self.hierarchy, &parent.warehouse_id, draft)
                    .await?;
            }
            HierarchyLevel::Rack => {
                let parent = self.parent_target(level)?;
                let zone_id = parent.zone_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Zone))?;
                self.sync
                    .create_rack(&mut self.hierarchy, &parent.warehouse_id, zone_id, draft)
                    .await?;
            }
            HierarchyLevel::Level => {
                let parent = self.parent_target(level)?;
                let zone_id = parent.zone_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Zone))?;
                let rack_id = parent.rack_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Rack))?;
                self.sync
                    .create_level(&mut self.hierarchy, &parent.warehouse_id, zone_id, rack_id, draft)
                    .await?;
            }
            HierarchyLevel::Bin => {
                let parent = self.parent_target(level)?;
                let zone_id = parent.zone_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Zone))?;
                let rack_id = parent.rack_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Rack))?;
                let level_id = parent.level_id.as_ref().ok_or_else(|| missing(HierarchyLevel::Level))?;
                let bin = NewBin {
                    code,
                    name: form.name,
                    description: Some(form.description).filter(|d| !d.trim().is_empty()),
                    quantity: form.quantity,
                    allow_mixed_items: form.allow_mixed_items,
                };
                self.sync
                    .create_bin(&mut self.hierarchy, &parent.warehouse_id, zone_id, rack_id, level_id, bin)
                    .await?;
            }
        }
        Ok(())
    }

    /// Blank or untouched codes keep the current one.
    fn update(&mut self, item: &LocationItem, form: LocationForm) -> Result<(), NavigationError> {
        self.sync.ensure_local(item.level(), "Editing")?;
        let patch = LocationPatch {
            code: form.changed_code(item.code()),
            name: Some(form.name.clone()),
        };
        let parent = self.parent_of(item);
        let missing = || NavigationError::from(DomainError::not_found(item.level(), item.id()));

        match item {
            LocationItem::Warehouse(w) => {
                self.hierarchy.update_warehouse(&w.id, patch)?;
            }
            LocationItem::Zone(z) => {
                let p = parent.ok_or_else(missing)?;
                self.hierarchy.update_zone(&p.warehouse_id, &z.id, patch)?;
            }
            LocationItem::Rack(r) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                self.hierarchy.update_rack(&p.warehouse_id, zone_id, &r.id, patch)?;
            }
            LocationItem::Level(l) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                let rack_id = p.rack_id.as_ref().ok_or_else(missing)?;
                self.hierarchy
                    .update_level(&p.warehouse_id, zone_id, rack_id, &l.id, patch)?;
            }
            LocationItem::Bin(b) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                let rack_id = p.rack_id.as_ref().ok_or_else(missing)?;
                let level_id = p.level_id.as_ref().ok_or_else(missing)?;
                let bin_patch = BinPatch {
                    code: patch.code,
                    name: Some(form.name).filter(|n| !n.trim().is_empty()),
                    description: Some(form.description),
                    quantity: Some(form.quantity),
                    allow_mixed_items: Some(form.allow_mixed_items),
                };
                self.hierarchy
                    .update_bin(&p.warehouse_id, zone_id, rack_id, level_id, &b.id, bin_patch)?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    /// Stage `item` for deletion. Refused up front when the cascade guard
    /// would fail or a bin still holds stock.
    pub fn request_delete(&mut self, item: LocationItem) -> Result<(), NavigationError> {
        self.sync.ensure_local(item.level(), "Deleting")?;
        if let Some(violation) = item_delete_violation(&item) {
            tracing::warn!(level = %item.level(), id = item.id(), error = %violation, "Delete blocked");
            return Err(NavigationError::DeleteBlocked(violation));
        }
        if let LocationItem::Bin(bin) = &item {
            if bin.is_occupied() {
                return Err(NavigationError::BinOccupied {
                    code: bin.code.clone(),
                    quantity: bin.quantity,
                });
            }
        }

        tracing::debug!(level = %item.level(), id = item.id(), "Delete awaiting confirmation");
        self.pending_delete = Some(item);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the staged item. On success the selection at that tier and
    /// below is cleared if it pointed at the deleted node. On failure the
    /// staged item is dropped and the selection is left alone.
    pub fn confirm_delete(&mut self) -> Result<(), NavigationError> {
        let item = self
            .pending_delete
            .take()
            .ok_or(NavigationError::NoPendingDelete)?;

        let parent = self.parent_of(&item);
        self.delete_item(&item, parent.as_ref())?;

        let level = item.level();
        let selected = self.selection.selected_id(level) == Some(item.id())
            && parent.as_ref().map_or(true, |p| self.selection_under(p));
        if selected {
            self.selection.clear_from(level);
        }
        self.refresh();
        Ok(())
    }

    fn delete_item(
        &mut self,
        item: &LocationItem,
        parent: Option<&NavigationTarget>,
    ) -> Result<(), NavigationError> {
        self.sync.ensure_local(item.level(), "Deleting")?;
        let missing = || NavigationError::from(DomainError::not_found(item.level(), item.id()));

        match item {
            LocationItem::Warehouse(w) => {
                self.hierarchy.delete_warehouse(&w.id)?;
            }
            LocationItem::Zone(z) => {
                let p = parent.ok_or_else(missing)?;
                self.hierarchy.delete_zone(&p.warehouse_id, &z.id)?;
            }
            LocationItem::Rack(r) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                self.hierarchy.delete_rack(&p.warehouse_id, zone_id, &r.id)?;
            }
            LocationItem::Level(l) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                let rack_id = p.rack_id.as_ref().ok_or_else(missing)?;
                self.hierarchy
                    .delete_level(&p.warehouse_id, zone_id, rack_id, &l.id)?;
            }
            LocationItem::Bin(b) => {
                let p = parent.ok_or_else(missing)?;
                let zone_id = p.zone_id.as_ref().ok_or_else(missing)?;
                let rack_id = p.rack_id.as_ref().ok_or_else(missing)?;
                let level_id = p.level_id.as_ref().ok_or_else(missing)?;
                self.hierarchy
                    .delete_bin(&p.warehouse_id, zone_id, rack_id, level_id, &b.id)?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Snapshot handling
    // =========================================================================

    /// Replace the tree with `snapshot` and re-point the selection.
    pub fn reload(&mut self, snapshot: Vec<Warehouse>) -> Result<(), NavigationError> {
        self.hierarchy.load(snapshot)?;
        self.refresh();
        Ok(())
    }

    /// Re-fetch the tree from the inventory API, when one is configured.
    pub async fn pull(&mut self) -> Result<(), NavigationError> {
        self.sync.load(&mut self.hierarchy).await?;
        self.refresh();
        Ok(())
    }

    /// Take the service's latest snapshot. Selected nodes that no longer exist
    /// are dropped together with their descendants.
    fn refresh(&mut self) {
        self.warehouses = self.hierarchy.snapshot();
        if let Some(target) = self.selection.target() {
            self.selection = Selection::resolve_prefix(&self.warehouses, &target);
        }
    }

    /// Whether the selection runs through every id in `parent`.
    fn selection_under(&self, parent: &NavigationTarget) -> bool {
        let s = &self.selection;
        let on_path = |level, id: Option<&str>| id.map_or(true, |id| s.selected_id(level) == Some(id));
        on_path(HierarchyLevel::Warehouse, Some(parent.warehouse_id.as_str()))
            && on_path(HierarchyLevel::Zone, parent.zone_id.as_ref().map(|id| id.as_str()))
            && on_path(HierarchyLevel::Rack, parent.rack_id.as_ref().map(|id| id.as_str()))
            && on_path(HierarchyLevel::Level, parent.level_id.as_ref().map(|id| id.as_str()))
    }

    /// Selection ids required to add at `level`.
    fn parent_target(&self, level: HierarchyLevel) -> Result<NavigationTarget, NavigationError> {
        for required in HierarchyLevel::ALL {
            if required.depth() >= level.depth() {
                break;
            }
            if self.selection.selected_id(required).is_none() {
                return Err(NavigationError::MissingSelection { level, required });
            }
        }
        self.selection
            .target()
            .ok_or(NavigationError::MissingSelection {
                level,
                required: HierarchyLevel::Warehouse,
            })
    }

    /// Ids of the ancestors of `item`, outermost first.
    ///
    /// Rows of the current view are children of the selection; anything else
    /// is looked up in the forest.
    fn parent_of(&self, item: &LocationItem) -> Option<NavigationTarget> {
        if item.level() == self.view_level() && item.level() != HierarchyLevel::Warehouse {
            if let Some(target) = self.selection.target() {
                return Some(target);
            }
        }
        locate_parent(&self.warehouses, item)
    }
}

/// Ids are only unique among siblings, so an exact match on the node wins
/// over an id-only match.
fn locate_parent(warehouses: &[Warehouse], item: &LocationItem) -> Option<NavigationTarget> {
    find_parent(warehouses, item, true).or_else(|| find_parent(warehouses, item, false))
}

fn find_parent(warehouses: &[Warehouse], item: &LocationItem, exact: bool) -> Option<NavigationTarget> {
    for warehouse in warehouses {
        let at_warehouse = NavigationTarget::warehouse(warehouse.id.clone());
        if let LocationItem::Zone(zone) = item {
            if warehouse.zones.iter().any(|z| z.id == zone.id && (!exact || z == zone)) {
                return Some(at_warehouse);
            }
        }
        for zone in &warehouse.zones {
            let at_zone = at_warehouse.clone().zone(zone.id.clone());
            if let LocationItem::Rack(rack) = item {
                if zone.racks.iter().any(|r| r.id == rack.id && (!exact || r == rack)) {
                    return Some(at_zone);
                }
            }
            for rack in &zone.racks {
                let at_rack = at_zone.clone().rack(rack.id.clone());
                if let LocationItem::Level(level) = item {
                    if rack.levels.iter().any(|l| l.id == level.id && (!exact || l == level)) {
                        return Some(at_rack);
                    }
                }
                if let LocationItem::Bin(bin) = item {
                    for shelf in &rack.levels {
                        if shelf.bins.iter().any(|b| b.id == bin.id && (!exact || b == bin)) {
                            return Some(at_rack.clone().level(shelf.id.clone()));
                        }
                    }
                }
            }
        }
    }
    None
}
