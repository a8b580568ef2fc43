//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies, plus
//! configuration and seed loading.

pub mod clock;
pub mod config;
pub mod inventory_api;
pub mod ports;
pub mod seed;
