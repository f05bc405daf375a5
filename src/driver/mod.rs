//! Browser-control handle abstraction
//!
//! The core treats the underlying driver as opaque: element lookups and
//! actions go through [`DriverHandle`]/[`ElementHandle`], and handle
//! creation is delegated to a [`DriverFactory`] collaborator.

pub mod mock;
pub mod profile;
pub mod traits;

pub use profile::{BrowserKind, BrowserProfile};
pub use traits::{DriverFactory, DriverHandle, ElementHandle};
