use thiserror::Error;

use ripple_primitives::{CallbackId, DependencyRole, PropId};

/// Return-value validation failures, reported with enough structure to be
/// actionable.
#[derive(Debug, Clone, Error)]
pub enum ReturnError {
	/// A multi-output callback returned a single value instead of a group.
	#[error("callback `{callback}` is multi-output; expected a list of values, got {found}")]
	ExpectedList {
		/// The callback whose return was malformed.
		callback: CallbackId,
		/// Short description of what was returned instead.
		found: &'static str,
	},

	/// The return group's length does not match the declared output arity.
	#[error("invalid number of output values for `{callback}`: expected {expected}, got {actual}")]
	ArityMismatch {
		/// The callback whose return was malformed.
		callback: CallbackId,
		/// Declared output arity.
		expected: usize,
		/// Number of values actually returned.
		actual: usize,
	},

	/// A grouped output expected a same-length list of values.
	#[error("grouped output at `{path}` expects a list of {expected} values, got {found}")]
	GroupShapeMismatch {
		/// Position of the grouped output in the return tree.
		path: String,
		/// Number of concrete targets in the group.
		expected: usize,
		/// What was returned instead (a count, or a kind description).
		found: String,
	},

	/// A value of a kind that cannot be applied to an output position.
	#[error("value at `{path}` is not a valid output value: {kind}")]
	InvalidLeaf {
		/// Path locating the offending leaf in the return tree.
		path: String,
		/// The offending kind.
		kind: &'static str,
	},
}

/// Per-request dispatch failures.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
	/// The output id resolves to no registered callback — a client/server
	/// skew such as a stale client bundle.
	#[error("no callback registered for output `{0}`")]
	CallbackNotFound(CallbackId),

	/// The request did not carry a value for a declared dependency.
	#[error("missing {role} value `{target}` for callback `{callback}`")]
	MissingArgument {
		/// The callback being dispatched.
		callback: CallbackId,
		/// Role of the missing dependency.
		role: DependencyRole,
		/// The `(id, property)` pair no request item matched.
		target: PropId,
	},

	/// The entry is clientside; its function runs in the browser, not here.
	#[error("callback `{0}` is clientside and cannot be dispatched on the server")]
	ClientsideCallback(CallbackId),

	/// The handler failed. Propagated to the transport for translation into
	/// an HTTP-level failure; never swallowed.
	#[error("callback `{callback}` failed: {message}")]
	Handler {
		/// The callback that failed.
		callback: CallbackId,
		/// The handler's error message.
		message: String,
	},

	/// The handler returned a value that failed normalization.
	#[error(transparent)]
	Return(#[from] ReturnError),
}
