//! Navigation state for browsing the hierarchy.

mod controller;
mod modal;
mod rows;
mod selection;

pub use controller::{NavigationController, NavigationError};
pub use modal::{LocationForm, Modal, ModalMode};
pub use rows::LocationRow;
pub use selection::Selection;
