//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The remote inventory API (could swap the REST backend for another source)
//! - Clock/Id generation (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{CreateNodeRequest, InventoryApiPort};

#[cfg(test)]
pub use external::MockInventoryApiPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, IdPort};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::ApiError;
