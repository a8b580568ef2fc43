//! Inventory API port - the remote system of record for locations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stockyard_domain::Warehouse;

use super::error::ApiError;

/// Body of a create request at any level below the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Id of the owning warehouse, zone, rack or level
    pub parent_id: String,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_mixed_items: Option<bool>,
}

impl CreateNodeRequest {
    pub fn new(parent_id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            code: code.into(),
            name: name.into(),
            description: None,
            quantity: None,
            allow_mixed_items: None,
        }
    }
}

/// Remote persistence collaborator.
///
/// Every create resolves exactly once; callers reload the full tree afterwards
/// instead of trusting local state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryApiPort: Send + Sync {
    /// Full snapshot of every warehouse and its descendants.
    async fn load_tree(&self) -> Result<Vec<Warehouse>, ApiError>;

    async fn create_zone(&self, request: &CreateNodeRequest) -> Result<(), ApiError>;
    async fn create_rack(&self, request: &CreateNodeRequest) -> Result<(), ApiError>;
    async fn create_level(&self, request: &CreateNodeRequest) -> Result<(), ApiError>;
    async fn create_bin(&self, request: &CreateNodeRequest) -> Result<(), ApiError>;
}
