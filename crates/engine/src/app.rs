//! Application state and composition.

use std::sync::Arc;

use stockyard_domain::LocationTree;

use crate::infrastructure::{
    clock::{SystemClock, UuidIds},
    config::{AppConfig, ConfigError},
    inventory_api::HttpInventoryApi,
    ports::{ApiError, ClockPort, IdPort, InventoryApiPort},
    seed::{demo_seed, load_seed, SeedError},
};
use crate::use_cases::{HierarchyError, HierarchyService, HierarchySync};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("Initial load from the inventory API failed: {0}")]
    Api(#[from] ApiError),
}

/// Main application state.
///
/// Holds the hierarchy service and the sync use case that decides whether
/// creates go local or remote.
pub struct App {
    pub hierarchy: HierarchyService,
    pub sync: HierarchySync,
}

impl App {
    pub fn new(hierarchy: HierarchyService, sync: HierarchySync) -> Self {
        Self { hierarchy, sync }
    }

    /// Wire the application from configuration.
    ///
    /// Online: the tree is fetched from the inventory API. Offline: it comes
    /// from the seed file, or the built-in demo tree when none is configured.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let ids: Arc<dyn IdPort> = Arc::new(UuidIds::new());

        let api: Option<Arc<dyn InventoryApiPort>> = config.api_base_url.as_ref().map(|url| {
            tracing::info!(base_url = %url, "Using inventory API");
            Arc::new(HttpInventoryApi::with_timeout(url.clone(), config.request_timeout_secs))
                as Arc<dyn InventoryApiPort>
        });

        let snapshot = match (&api, &config.seed_path) {
            (Some(api), _) => api.load_tree().await?,
            (None, Some(path)) => load_seed(path)?,
            (None, None) => {
                tracing::info!("No inventory API or seed file configured; using demo tree");
                demo_seed(clock.now())
            }
        };

        let tree = LocationTree::init(snapshot).map_err(HierarchyError::from)?;
        let hierarchy = HierarchyService::new(tree, clock, ids, config.code_sequence);
        Ok(Self::new(hierarchy, HierarchySync::new(api)))
    }
}
