//! Update dispatch and return-value normalization.
//!
//! The transport layer parses an update request off the wire and hands it to
//! [`dispatch`]; everything after that — registry lookup, positional argument
//! marshaling, handler invocation, and normalization of the return value into
//! the client's response shape — happens here. The result is a sum type:
//! an update response, a distinguished no-op, or a typed error.

#![warn(missing_docs)]

mod dispatcher;
mod error;
mod normalize;
mod wire;

#[cfg(test)]
mod tests;

pub use dispatcher::dispatch;
pub use error::{DispatchError, ReturnError};
pub use normalize::{Normalized, normalize};
pub use wire::{Outcome, OutputsSpec, RequestItem, SpecSlot, UpdateRequest, UpdateResponse};
