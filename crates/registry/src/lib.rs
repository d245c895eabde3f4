//! Callback registry and registration validation.
//!
//! The registry is the central table of the reactive engine: it maps a
//! canonical [`CallbackId`](ripple_primitives::CallbackId) to the declared
//! Output/Input/State lists, the handler (or clientside function reference),
//! and registration metadata. Entries are validated structurally at
//! registration time and published as immutable snapshots, so concurrent
//! dispatch reads are lock-free while late registration stays linearizable.

#![warn(missing_docs)]

mod entry;
mod error;
mod handler;
mod listing;
mod registry;
mod validate;


pub use entry::{CallbackEntry, Declaration, OutputsDecl};
pub use error::RegistrationError;
pub use handler::{
	CallbackArgs, CallbackError, CallbackKind, CallbackValue, ClientsideFunction, ServerHandler,
};
pub use listing::{DependencySpec, OutputSpec, PropertyRef};
pub use registry::CallbackRegistry;
