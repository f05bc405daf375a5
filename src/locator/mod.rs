//! Declarative locator resolution
//!
//! Symbolic element names map to executable lookup strategies through
//! externally defined, cached per-page locator sets.

pub mod model;
pub mod source;
pub mod store;

pub use model::{LocatorDefinition, PageLocatorSet, Strategy};
pub use source::{FileLocatorSource, LocatorSource};
pub use store::LocatorStore;
