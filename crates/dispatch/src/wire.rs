use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ripple_registry::PropertyRef;

/// One input/state item of an update request: a target plus its current
/// value. A target reported without a value marshals as JSON null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestItem {
	/// Component id.
	pub id: String,
	/// Property name.
	pub property: String,
	/// Current property value.
	#[serde(default)]
	pub value: Value,
}

impl RequestItem {
	/// Builds an item for tests and embedded transports.
	pub fn new(id: impl Into<String>, property: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			id: id.into(),
			property: property.into(),
			value: value.into(),
		}
	}
}

/// One slot of a multi-output spec: a concrete target, or a group of
/// concrete targets expanded from a pattern-matching output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecSlot {
	/// A single concrete target.
	Target(PropertyRef),
	/// Concrete targets a grouped output expands to.
	Group(Vec<PropertyRef>),
}

/// The output shape of an update request, used to reconstruct the client's
/// targets when normalizing the return value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputsSpec {
	/// A single-output callback's target.
	Single(PropertyRef),
	/// One slot per declared output, in declaration order.
	Multi(Vec<SpecSlot>),
}

/// A parsed update request, as delivered by the transport layer.
///
/// Request data is per-call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
	/// The callback id string identifying the registered entry.
	pub output: String,
	/// The output shape for response reconstruction.
	pub outputs: OutputsSpec,
	/// Current input values.
	#[serde(default)]
	pub inputs: Vec<RequestItem>,
	/// Current state values.
	#[serde(default)]
	pub state: Vec<RequestItem>,
	/// Prop ids the client reports as having changed.
	#[serde(default, rename = "changedPropIds")]
	pub changed_prop_ids: Vec<String>,
}

/// The applies-updates wire response:
/// `{"response": {<id>: {<property>: <value>, ...}, ...}, "multi": true}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateResponse {
	/// Updates per component id, per property.
	pub response: IndexMap<String, IndexMap<String, Value>>,
	/// Always true; the response shape is uniform across arities.
	pub multi: bool,
}

impl UpdateResponse {
	pub(crate) fn new(response: IndexMap<String, IndexMap<String, Value>>) -> Self {
		Self { response, multi: true }
	}
}

/// Result of a dispatched update.
#[derive(Debug, Clone)]
pub enum Outcome {
	/// Updates to apply to the DOM.
	Updated(UpdateResponse),
	/// The callback opted out of updating; the transport should answer with
	/// an empty success response.
	NoUpdate,
}
