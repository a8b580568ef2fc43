//! Clock and id implementations.

use crate::infrastructure::ports::{ClockPort, IdPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random UUID v4 ids.
pub struct UuidIds;

impl UuidIds {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdPort for UuidIds {
    fn gen_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Predictable ids (`id-1`, `id-2`, ...) for testing.
#[cfg(test)]
#[derive(Default)]
pub struct SequentialIds(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl IdPort for SequentialIds {
    fn gen_id(&self) -> String {
        let n = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
        format!("id-{}", n)
    }
}
