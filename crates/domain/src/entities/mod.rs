//! Domain entities - the five tiers of the location hierarchy
//!
//! Each parent exclusively owns its children in insertion order; the order is
//! the canonical display order.

mod bin;
mod item;
mod level;
mod rack;
mod warehouse;
mod zone;

pub use bin::Bin;
pub use item::{LocationItem, LocationNode};
pub use level::Level;
pub use rack::Rack;
pub use warehouse::Warehouse;
pub use zone::Zone;
