use thiserror::Error;

use ripple_primitives::{DependencyRole, PropId};

/// Errors raised synchronously from callback registration.
///
/// All of these are structural defects in the application's callback graph
/// and are fatal to start-up; none are retried.
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
	/// A dependency was passed in a position that expects a different role.
	#[error("expected a {expected} dependency, got {found}: `{target}`")]
	InvalidShape {
		/// Role required by the argument position.
		expected: DependencyRole,
		/// Role the dependency was declared with.
		found: DependencyRole,
		/// The offending `(id, property)` target.
		target: PropId,
	},

	/// A callback must declare at least one output.
	#[error("a callback must declare at least one output")]
	MissingOutputs,

	/// The same `(id, property)` pair appears as both an output and an input.
	#[error("same output and input: `{0}`")]
	SameInputOutput(PropId),

	/// A component id or property contains the reserved `.` separator.
	#[error("`{0}` contains the reserved `.` separator in its id or property")]
	InvalidComponentId(PropId),

	/// Validation requires a layout, and none has been assigned.
	#[error(
		"cannot validate callbacks before a layout is assigned; \
		 assign the layout first or enable `suppress_callback_exceptions`"
	)]
	LayoutNotAssigned,

	/// An input/state references a component id missing from the layout.
	#[error("no component with id `{id}` exists in the layout (known ids: {known:?})")]
	NonexistentId {
		/// The unknown component id.
		id: String,
		/// Ids present in the layout, sorted.
		known: Vec<String>,
	},

	/// An input/state references a property the component does not declare.
	#[error("component `{id}` has no property `{property}` (available: {available:?})")]
	NonexistentProperty {
		/// The referenced component id.
		id: String,
		/// The undeclared property.
		property: String,
		/// Properties the component does declare, sorted.
		available: Vec<String>,
	},

	/// State without inputs: the callback could never fire.
	#[error("callback declares {state} state dependencies but no inputs, so it can never fire")]
	MissingInputs {
		/// Number of state dependencies declared.
		state: usize,
	},

	/// One or more outputs are already claimed, by this declaration itself or
	/// by a previously registered callback.
	#[error("output already claimed by a callback: {0:?}")]
	DuplicateCallbackOutput(Vec<PropId>),
}
