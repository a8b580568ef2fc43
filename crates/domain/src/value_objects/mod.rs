//! Value objects - Immutable objects defined by their attributes

mod code;
mod names;

pub use code::{BinCode, CodeSequence, LocationCode};
pub use names::{Description, LocationName};
