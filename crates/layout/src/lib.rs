//! Component tree model and layout validation.
//!
//! The layout is the declared component tree the client renderer will mount.
//! Within the callback engine it is consumed read-only, through two surfaces:
//! * `Component`: the capability interface any concrete component exposes
//! * `LayoutIndex`: O(1) membership and property-capability lookups by id,
//!   built by a single validating traversal of the tree

#![warn(missing_docs)]

mod component;
mod element;
mod error;
mod index;


pub use component::Component;
pub use element::{Element, PropValue};
pub use error::LayoutError;
pub use index::{ComponentCaps, LayoutIndex};
