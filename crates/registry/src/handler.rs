use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use ripple_layout::Element;
use ripple_primitives::PropId;

/// A callback's return value.
///
/// Multi-output callbacks return a [`CallbackValue::Group`] with one element
/// per declared output, in declaration order. [`CallbackValue::NoUpdate`] at
/// the top level cancels the whole update; per-output it skips that output.
#[derive(Debug, Clone)]
pub enum CallbackValue {
	/// Leave the target (or, at the top level, everything) unchanged.
	NoUpdate,
	/// A plain JSON value.
	Json(Value),
	/// A component to be mounted at the target property.
	Node(Element),
	/// A sequence of components.
	Nodes(Vec<Element>),
	/// Positional values for a multi-output callback or a grouped output.
	Group(Vec<CallbackValue>),
}

impl CallbackValue {
	/// Convenience constructor for JSON-valued returns.
	pub fn json(value: impl Into<Value>) -> Self {
		Self::Json(value.into())
	}
}

impl From<Value> for CallbackValue {
	fn from(value: Value) -> Self {
		Self::Json(value)
	}
}

impl From<Element> for CallbackValue {
	fn from(node: Element) -> Self {
		Self::Node(node)
	}
}

/// Error surface of a server-side callback handler.
#[derive(Debug, Clone, Error)]
pub enum CallbackError {
	/// Voluntary early exit; converted to a no-op outcome by the dispatcher,
	/// never surfaced as a failure.
	#[error("update prevented")]
	PreventUpdate,

	/// Genuine handler failure; propagates to the transport layer.
	#[error("{0}")]
	Failed(String),
}

/// Positional arguments marshaled for one handler invocation.
///
/// Input values come first, in declaration order, then state values. The
/// triggered set carries the prop ids the client reported as changed.
#[derive(Debug, Clone)]
pub struct CallbackArgs {
	inputs: Vec<Value>,
	state: Vec<Value>,
	triggered: Vec<PropId>,
}

impl CallbackArgs {
	/// Assembles the argument pack; called by the dispatcher.
	pub fn new(inputs: Vec<Value>, state: Vec<Value>, triggered: Vec<PropId>) -> Self {
		Self { inputs, state, triggered }
	}

	/// Input values in declaration order.
	pub fn inputs(&self) -> &[Value] {
		&self.inputs
	}

	/// State values in declaration order.
	pub fn state(&self) -> &[Value] {
		&self.state
	}

	/// The `i`-th input value.
	pub fn input(&self, i: usize) -> &Value {
		&self.inputs[i]
	}

	/// The `i`-th state value.
	pub fn state_value(&self, i: usize) -> &Value {
		&self.state[i]
	}

	/// Prop ids the client reported as having triggered this update.
	pub fn triggered(&self) -> &[PropId] {
		&self.triggered
	}
}

/// Server-side handler: marshaled arguments in, callback value out.
pub type ServerHandler = Arc<dyn Fn(&CallbackArgs) -> Result<CallbackValue, CallbackError> + Send + Sync>;

/// Reference to a browser-side function registered for a callback.
///
/// The engine stores and publishes the reference; execution happens in the
/// client renderer (`window[namespace][function_name]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsideFunction {
	/// Namespace object on `window`.
	pub namespace: String,
	/// Function name within the namespace.
	pub function_name: String,
}

impl ClientsideFunction {
	/// Creates a clientside function reference.
	pub fn new(namespace: impl Into<String>, function_name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			function_name: function_name.into(),
		}
	}
}

/// What runs when a callback fires.
#[derive(Clone)]
pub enum CallbackKind {
	/// A server-side handler invoked by the dispatcher.
	Server(ServerHandler),
	/// A clientside function executed by the browser renderer.
	Clientside(ClientsideFunction),
}

impl fmt::Debug for CallbackKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CallbackKind::Server(_) => f.write_str("CallbackKind::Server(..)"),
			CallbackKind::Clientside(cf) => f.debug_tuple("CallbackKind::Clientside").field(cf).finish(),
		}
	}
}
