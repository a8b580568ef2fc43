//! Inventory REST API client
//!
//! Talks JSON to the backend that owns location data. Paths follow the
//! backend's conventions: `GET /api/locations/tree` for the snapshot and one
//! `POST` collection per level for creates.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use stockyard_domain::Warehouse;
use url::Url;

use crate::infrastructure::ports::{ApiError, CreateNodeRequest, InventoryApiPort};

/// Default request timeout for inventory API calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const TREE_PATH: &str = "api/locations/tree";
const ZONES_PATH: &str = "api/zones";
const RACKS_PATH: &str = "api/racks";
const LEVELS_PATH: &str = "api/levels";
const BINS_PATH: &str = "api/bins";

/// Client for the inventory REST API
#[derive(Clone)]
pub struct HttpInventoryApi {
    client: Client,
    base_url: Url,
}

impl HttpInventoryApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: Url, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::request(path, e))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(url.as_str(), status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::decode(url.as_str(), e))
    }

    async fn post(&self, path: &str, body: &CreateNodeRequest) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(endpoint = %url, parent_id = %body.parent_id, code = %body.code, "POST inventory API");

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(url.as_str(), status.as_u16(), body));
        }
        Ok(())
    }
}

/// `Url::join` replaces the last segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl InventoryApiPort for HttpInventoryApi {
    async fn load_tree(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.get_json(TREE_PATH).await
    }

    async fn create_zone(&self, request: &CreateNodeRequest) -> Result<(), ApiError> {
        self.post(ZONES_PATH, request).await
    }

    async fn create_rack(&self, request: &CreateNodeRequest) -> Result<(), ApiError> {
        self.post(RACKS_PATH, request).await
    }

    async fn create_level(&self, request: &CreateNodeRequest) -> Result<(), ApiError> {
        self.post(LEVELS_PATH, request).await
    }

    async fn create_bin(&self, request: &CreateNodeRequest) -> Result<(), ApiError> {
        self.post(BINS_PATH, request).await
    }
}
