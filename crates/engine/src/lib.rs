//! Stockyard engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - the hierarchy service and remote-backed creates
//! - `infrastructure/` - external dependency implementations (ports + adapters)
//! - `app` - application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, AppError};
pub use infrastructure::config::{AppConfig, ConfigError};
pub use infrastructure::ports::{ApiError, ClockPort, IdPort, InventoryApiPort};
pub use use_cases::{
    AncestorChain, BinPatch, CreateOutcome, HierarchyError, HierarchyService, HierarchySync,
    LocationPatch, NewBin, NewLocation,
};
