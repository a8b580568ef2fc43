//! Use cases - user story orchestration.
//!
//! `hierarchy` owns every mutation of the location tree; `sync` routes creates
//! through the inventory API when one is configured.

pub mod hierarchy;
pub mod sync;

pub use hierarchy::{
    AncestorChain, BinPatch, HierarchyError, HierarchyService, LocationPatch, NewBin, NewLocation,
};
pub use sync::{CreateOutcome, HierarchySync};
