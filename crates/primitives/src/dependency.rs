use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between component id and property in canonical prop ids.
///
/// Component ids and property names must not contain this character; the
/// registration validator rejects declarations that do.
pub const ID_SEPARATOR: char = '.';

/// The role a dependency plays in a callback declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyRole {
	/// Written by the callback.
	Output,
	/// Read by the callback; a change triggers it.
	Input,
	/// Read by the callback; never triggers it.
	State,
}

impl fmt::Display for DependencyRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DependencyRole::Output => f.write_str("Output"),
			DependencyRole::Input => f.write_str("Input"),
			DependencyRole::State => f.write_str("State"),
		}
	}
}

/// A role-tagged reference to a component property.
///
/// Created by application code when declaring a callback and held immutably
/// inside the registered entry afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
	component_id: String,
	property: String,
	role: DependencyRole,
}

impl Dependency {
	/// Creates an `Output` dependency.
	pub fn output(component_id: impl Into<String>, property: impl Into<String>) -> Self {
		Self::new(component_id, property, DependencyRole::Output)
	}

	/// Creates an `Input` dependency.
	pub fn input(component_id: impl Into<String>, property: impl Into<String>) -> Self {
		Self::new(component_id, property, DependencyRole::Input)
	}

	/// Creates a `State` dependency.
	pub fn state(component_id: impl Into<String>, property: impl Into<String>) -> Self {
		Self::new(component_id, property, DependencyRole::State)
	}

	fn new(component_id: impl Into<String>, property: impl Into<String>, role: DependencyRole) -> Self {
		Self {
			component_id: component_id.into(),
			property: property.into(),
			role,
		}
	}

	/// The referenced component id.
	pub fn component_id(&self) -> &str {
		&self.component_id
	}

	/// The referenced property name.
	pub fn property(&self) -> &str {
		&self.property
	}

	/// The role this dependency was declared with.
	pub fn role(&self) -> DependencyRole {
		self.role
	}

	/// Returns true if `other` names the same `(component id, property)` pair,
	/// regardless of role.
	pub fn same_target(&self, other: &Dependency) -> bool {
		self.component_id == other.component_id && self.property == other.property
	}

	/// Returns true if the component id or property contains the reserved
	/// [`ID_SEPARATOR`] character.
	pub fn contains_reserved_separator(&self) -> bool {
		self.component_id.contains(ID_SEPARATOR) || self.property.contains(ID_SEPARATOR)
	}

	/// The canonical `"{id}.{property}"` rendering of this target.
	pub fn prop_id(&self) -> PropId {
		PropId::new(&self.component_id, &self.property)
	}
}

impl fmt::Display for Dependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.component_id, self.property)
	}
}

/// Canonical `"{component_id}.{property}"` identity of a single target.
///
/// This is the unit the callback identity scheme composes, and the key the
/// collision check operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropId(String);

impl PropId {
	/// Builds a prop id from a component id and property name.
	pub fn new(component_id: &str, property: &str) -> Self {
		Self(format!("{component_id}{ID_SEPARATOR}{property}"))
	}

	/// Wraps an already-rendered `"{id}.{property}"` string.
	pub fn from_rendered(rendered: impl Into<String>) -> Self {
		Self(rendered.into())
	}

	/// The rendered form.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Splits back into `(component_id, property)`.
	///
	/// The property is everything after the last separator, mirroring how the
	/// id was rendered from separator-free parts.
	pub fn split(&self) -> Option<(&str, &str)> {
		self.0.rsplit_once(ID_SEPARATOR)
	}
}

impl fmt::Display for PropId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for PropId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
