use ripple_primitives::{CallbackId, Dependency};

use crate::handler::{CallbackKind, ClientsideFunction, ServerHandler};

/// The outputs half of a callback declaration.
///
/// The declared shape is preserved: a one-element list is still a
/// multi-output declaration, with positional (length-1) return semantics and
/// a group-encoded identity.
#[derive(Debug, Clone)]
pub enum OutputsDecl {
	/// A single output target.
	Single(Dependency),
	/// An ordered list of output targets.
	Multi(Vec<Dependency>),
}

impl OutputsDecl {
	/// The declared targets, in order.
	pub fn as_slice(&self) -> &[Dependency] {
		match self {
			OutputsDecl::Single(dep) => std::slice::from_ref(dep),
			OutputsDecl::Multi(deps) => deps,
		}
	}

	/// True iff declared as a list.
	pub fn is_multi(&self) -> bool {
		matches!(self, OutputsDecl::Multi(_))
	}

	/// The canonical identity derived from this declaration.
	pub fn callback_id(&self) -> CallbackId {
		match self {
			OutputsDecl::Single(dep) => CallbackId::single(dep),
			OutputsDecl::Multi(deps) => CallbackId::multi(deps),
		}
	}
}

impl From<Dependency> for OutputsDecl {
	fn from(dep: Dependency) -> Self {
		OutputsDecl::Single(dep)
	}
}

impl From<Vec<Dependency>> for OutputsDecl {
	fn from(deps: Vec<Dependency>) -> Self {
		OutputsDecl::Multi(deps)
	}
}

/// A proposed callback registration, before validation.
#[derive(Debug, Clone)]
pub struct Declaration {
	/// Output targets.
	pub outputs: OutputsDecl,
	/// Triggering dependencies, in argument order.
	pub inputs: Vec<Dependency>,
	/// Non-triggering dependencies, appended after inputs in argument order.
	pub state: Vec<Dependency>,
	/// Suppresses the automatic initial-load firing on the client.
	pub prevent_initial_call: bool,
}

impl Declaration {
	/// Declaration with the default initial-call behavior.
	pub fn new(outputs: impl Into<OutputsDecl>, inputs: Vec<Dependency>, state: Vec<Dependency>) -> Self {
		Self {
			outputs: outputs.into(),
			inputs,
			state,
			prevent_initial_call: false,
		}
	}
}

/// One registered unit of reactive behavior.
///
/// Created exactly once per registration, immutable afterwards, and shared
/// by reference with concurrent dispatch through registry snapshots.
#[derive(Debug)]
pub struct CallbackEntry {
	id: CallbackId,
	outputs: OutputsDecl,
	inputs: Vec<Dependency>,
	state: Vec<Dependency>,
	kind: CallbackKind,
	prevent_initial_call: bool,
}

impl CallbackEntry {
	pub(crate) fn new(decl: Declaration, id: CallbackId, kind: CallbackKind) -> Self {
		Self {
			id,
			outputs: decl.outputs,
			inputs: decl.inputs,
			state: decl.state,
			kind,
			prevent_initial_call: decl.prevent_initial_call,
		}
	}

	/// The canonical callback identity.
	pub fn id(&self) -> &CallbackId {
		&self.id
	}

	/// Declared outputs.
	pub fn outputs(&self) -> &OutputsDecl {
		&self.outputs
	}

	/// Declared inputs, in argument order.
	pub fn inputs(&self) -> &[Dependency] {
		&self.inputs
	}

	/// Declared state, in argument order.
	pub fn state(&self) -> &[Dependency] {
		&self.state
	}

	/// True iff the outputs were declared as a list.
	pub fn is_multi(&self) -> bool {
		self.outputs.is_multi()
	}

	/// Whether the client should skip the initial-load firing.
	pub fn prevent_initial_call(&self) -> bool {
		self.prevent_initial_call
	}

	/// The server handler, if this is a server-side entry.
	pub fn server_handler(&self) -> Option<&ServerHandler> {
		match &self.kind {
			CallbackKind::Server(handler) => Some(handler),
			CallbackKind::Clientside(_) => None,
		}
	}

	/// The clientside function reference, if this is a clientside entry.
	pub fn clientside_function(&self) -> Option<&ClientsideFunction> {
		match &self.kind {
			CallbackKind::Server(_) => None,
			CallbackKind::Clientside(cf) => Some(cf),
		}
	}
}
