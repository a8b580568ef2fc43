//! Testability ports for injecting time and identity.

use chrono::{DateTime, Utc};

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdPort: Send + Sync {
    /// A fresh opaque id. Collisions are checked by the caller.
    fn gen_id(&self) -> String;
}
