//! Stockyard console library.
//!
//! The navigation controller is the browsing state machine over the location
//! hierarchy: current selection, view level, add/edit modal and pending delete.
//! `render` turns controller state into text and `shell` parses the line
//! commands the binary reads.

pub mod navigation;
pub mod render;
pub mod shell;

pub use navigation::{
    LocationForm, LocationRow, Modal, ModalMode, NavigationController, NavigationError, Selection,
};
