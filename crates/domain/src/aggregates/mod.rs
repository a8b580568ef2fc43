//! Aggregate roots - domain objects that own their related data
//!
//! `LocationTree` owns the whole warehouse forest. Parents own their children
//! by value, so the borrow checker enforces exclusive ownership.

pub mod location_tree;

pub use location_tree::LocationTree;
