use serde::{Deserialize, Serialize};

use ripple_primitives::Dependency;

use crate::entry::{CallbackEntry, OutputsDecl};
use crate::handler::ClientsideFunction;

/// An `{id, property}` pair in the client wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
	/// Component id.
	pub id: String,
	/// Property name.
	pub property: String,
}

impl From<&Dependency> for PropertyRef {
	fn from(dep: &Dependency) -> Self {
		Self {
			id: dep.component_id().to_owned(),
			property: dep.property().to_owned(),
		}
	}
}

/// Output shape as the client renderer expects it: a flat prop-id string for
/// a single output, a structured list for a multi-output declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputSpec {
	/// `"{id}.{property}"`.
	Single(String),
	/// One `{id, property}` record per declared output, in order.
	Multi(Vec<PropertyRef>),
}

/// One record of the public callback graph served to the client renderer.
#[derive(Debug, Clone, Serialize)]
pub struct DependencySpec {
	/// The output target(s).
	pub output: OutputSpec,
	/// Triggering dependencies, in argument order.
	pub inputs: Vec<PropertyRef>,
	/// Non-triggering dependencies, in argument order.
	pub state: Vec<PropertyRef>,
	/// The clientside function reference, or null for server callbacks.
	pub clientside_function: Option<ClientsideFunction>,
	/// Whether the client should skip the initial-load firing.
	pub prevent_initial_call: bool,
}

impl DependencySpec {
	/// Builds the public record for one registered entry.
	pub fn from_entry(entry: &CallbackEntry) -> Self {
		let output = match entry.outputs() {
			OutputsDecl::Single(dep) => OutputSpec::Single(dep.prop_id().as_str().to_owned()),
			OutputsDecl::Multi(deps) => OutputSpec::Multi(deps.iter().map(PropertyRef::from).collect()),
		};
		Self {
			output,
			inputs: entry.inputs().iter().map(PropertyRef::from).collect(),
			state: entry.state().iter().map(PropertyRef::from).collect(),
			clientside_function: entry.clientside_function().cloned(),
			prevent_initial_call: entry.prevent_initial_call(),
		}
	}
}
