use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::Value;

use crate::component::Component;

/// One property value inside a component's property bag.
///
/// Children are ordinary properties; component-valued and list-of-component
/// values keep their structure so the tree stays traversable and serializes
/// into the nested client shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropValue {
	/// A plain JSON value.
	Json(Value),
	/// A single nested component.
	Node(Box<Element>),
	/// A flat sequence of components.
	Nodes(Vec<Element>),
}

/// Generic property-bag component.
///
/// Mirrors the generated-component model of the client renderer: a namespace,
/// a type name, and an ordered property map. The declared-property set and
/// wildcard prefixes drive callback validation; they are construction-time
/// metadata and are not serialized.
///
/// Serializes to `{"namespace": ..., "type": ..., "props": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
	namespace: String,
	#[serde(rename = "type")]
	component_type: String,
	props: IndexMap<String, PropValue>,
	#[serde(skip)]
	declared: FxHashSet<String>,
	#[serde(skip)]
	wildcards: Vec<String>,
}

impl Element {
	/// Creates an element with an empty property bag.
	///
	/// `id` and `children` are always declared; further properties come from
	/// [`Element::declare`] or are declared implicitly when set.
	pub fn new(namespace: impl Into<String>, component_type: impl Into<String>) -> Self {
		let mut declared = FxHashSet::default();
		declared.insert("id".to_owned());
		declared.insert("children".to_owned());
		Self {
			namespace: namespace.into(),
			component_type: component_type.into(),
			props: IndexMap::new(),
			declared,
			wildcards: Vec::new(),
		}
	}

	/// Declares additional valid property names without setting them.
	#[must_use]
	pub fn declare<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.declared.extend(names.into_iter().map(Into::into));
		self
	}

	/// Declares a wildcard property prefix (e.g. `data-`).
	#[must_use]
	pub fn wildcard(mut self, prefix: impl Into<String>) -> Self {
		self.wildcards.push(prefix.into());
		self
	}

	/// Sets the component id.
	#[must_use]
	pub fn with_id(self, id: impl Into<String>) -> Self {
		self.set("id", Value::String(id.into()))
	}

	/// Sets a JSON-valued property. Setting a property declares it.
	#[must_use]
	pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		let name = name.into();
		self.declared.insert(name.clone());
		self.props.insert(name, PropValue::Json(value.into()));
		self
	}

	/// Appends a child component.
	#[must_use]
	pub fn child(mut self, child: Element) -> Self {
		match self.props.get_mut("children") {
			Some(PropValue::Nodes(nodes)) => nodes.push(child),
			Some(existing) => {
				let first = std::mem::replace(existing, PropValue::Nodes(Vec::new()));
				let mut nodes = match first {
					PropValue::Node(node) => vec![*node],
					PropValue::Nodes(nodes) => nodes,
					// A primitive child is kept only while it is the sole child.
					PropValue::Json(_) => Vec::new(),
				};
				nodes.push(child);
				self.props.insert("children".to_owned(), PropValue::Nodes(nodes));
			}
			None => {
				self.props.insert("children".to_owned(), PropValue::Node(Box::new(child)));
			}
		}
		self
	}

	/// Sets the children to a flat sequence of components.
	#[must_use]
	pub fn children(mut self, children: Vec<Element>) -> Self {
		self.props.insert("children".to_owned(), PropValue::Nodes(children));
		self
	}

	/// Sets the children to a primitive value (e.g. a text node).
	#[must_use]
	pub fn text(mut self, value: impl Into<Value>) -> Self {
		self.props.insert("children".to_owned(), PropValue::Json(value.into()));
		self
	}

	/// The component's namespace.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// The component's type name.
	pub fn component_type(&self) -> &str {
		&self.component_type
	}

	/// A property value, if set.
	pub fn prop(&self, name: &str) -> Option<&PropValue> {
		self.props.get(name)
	}
}

impl Component for Element {
	fn id(&self) -> Option<&str> {
		match self.props.get("id") {
			Some(PropValue::Json(Value::String(id))) if !id.is_empty() => Some(id.as_str()),
			_ => None,
		}
	}

	fn declared_properties(&self) -> Box<dyn Iterator<Item = &str> + '_> {
		Box::new(self.declared.iter().map(String::as_str))
	}

	fn wildcard_prefixes(&self) -> Box<dyn Iterator<Item = &str> + '_> {
		Box::new(self.wildcards.iter().map(String::as_str))
	}

	fn children(&self) -> Box<dyn Iterator<Item = &dyn Component> + '_> {
		match self.props.get("children") {
			Some(PropValue::Node(node)) => Box::new(std::iter::once(node.as_ref() as &dyn Component)),
			Some(PropValue::Nodes(nodes)) => Box::new(nodes.iter().map(|n| n as &dyn Component)),
			_ => Box::new(std::iter::empty()),
		}
	}
}
