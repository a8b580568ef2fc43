//! Add/edit modal state and the form it submits.

use serde::{Deserialize, Serialize};
use stockyard_domain::{HierarchyLevel, LocationCode, LocationItem};

/// Whether the modal creates a new node or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode {
    Create,
    Edit(LocationItem),
}

/// The open add/edit dialog. At most one is open at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub level: HierarchyLevel,
    pub mode: ModalMode,
}

impl Modal {
    pub fn create(level: HierarchyLevel) -> Self {
        Self {
            level,
            mode: ModalMode::Create,
        }
    }

    pub fn edit(item: LocationItem) -> Self {
        Self {
            level: item.level(),
            mode: ModalMode::Edit(item),
        }
    }

    pub fn editing(&self) -> Option<&LocationItem> {
        match &self.mode {
            ModalMode::Create => None,
            ModalMode::Edit(item) => Some(item),
        }
    }

    /// Dialog title, e.g. "Add Zone" or "Edit Bin".
    pub fn title(&self) -> String {
        let verb = match self.mode {
            ModalMode::Create => "Add",
            ModalMode::Edit(_) => "Edit",
        };
        format!("{} {}", verb, self.level.title())
    }
}

/// Raw form input, as typed.
///
/// Bin-only fields are ignored at other tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    pub code: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub allow_mixed_items: bool,
}

impl LocationForm {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Form preloaded with an existing node, for edit mode.
    pub fn prefilled(item: &LocationItem) -> Self {
        let mut form = Self::named(item.name()).with_code(item.code());
        if let LocationItem::Bin(bin) = item {
            form.description = bin.description.clone();
            form.quantity = bin.quantity;
            form.allow_mixed_items = bin.allow_mixed_items;
        }
        form
    }

    /// The code reduced to `[A-Z0-9]`, or `None` when nothing usable was typed.
    pub fn sanitized_code(&self) -> Option<String> {
        LocationCode::sanitize(&self.code).map(LocationCode::into_inner)
    }

    /// Sanitized code for an edit, or `None` when the field still holds
    /// `current` or is blank.
    pub fn changed_code(&self, current: &str) -> Option<String> {
        if self.code.trim() == current {
            return None;
        }
        self.sanitized_code()
    }
}
