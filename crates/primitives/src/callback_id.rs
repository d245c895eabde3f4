use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dependency::{Dependency, PropId};

/// Separator between constituent prop ids inside a multi-output callback id.
pub const GROUP_SEPARATOR: &str = "...";

/// Bracket marker wrapping a multi-output callback id at both ends.
pub const GROUP_WRAP: &str = "..";

/// Deterministic identity of a registered callback, derived from its ordered
/// outputs list.
///
/// A single-output callback is identified by its output's prop id. A
/// multi-output callback concatenates each constituent prop id with
/// [`GROUP_SEPARATOR`] and wraps the whole group in [`GROUP_WRAP`] markers:
/// `..a.x...b.y..`. The id is order-dependent, and [`CallbackId::decompose`]
/// recovers the constituent prop ids for collision checking.
///
/// Both encodings are unambiguous because component ids and property names
/// are rejected at registration time if they contain the separator character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
	/// Identity of a callback declared with a single output.
	pub fn single(output: &Dependency) -> Self {
		Self(output.prop_id().as_str().to_owned())
	}

	/// Identity of a callback declared with an outputs list.
	pub fn multi(outputs: &[Dependency]) -> Self {
		let joined = outputs
			.iter()
			.map(|o| o.prop_id().as_str().to_owned())
			.collect::<Vec<_>>()
			.join(GROUP_SEPARATOR);
		Self(format!("{GROUP_WRAP}{joined}{GROUP_WRAP}"))
	}

	/// Wraps a callback id received on the wire.
	///
	/// No structural validation happens here; an id that was never registered
	/// simply fails the registry lookup.
	pub fn from_wire(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	/// Returns true if this id encodes a multi-output group.
	pub fn is_multi(&self) -> bool {
		self.0.starts_with(GROUP_WRAP) && self.0.len() > 2 * GROUP_WRAP.len()
	}

	/// Decomposes into the constituent single-output prop ids.
	///
	/// Single ids decompose to themselves; group ids are unwrapped and split
	/// on the group separator.
	pub fn decompose(&self) -> Vec<PropId> {
		if self.is_multi() {
			let inner = &self.0[GROUP_WRAP.len()..self.0.len() - GROUP_WRAP.len()];
			inner.split(GROUP_SEPARATOR).map(PropId::from_rendered).collect()
		} else {
			vec![PropId::from_rendered(self.0.clone())]
		}
	}

	/// The rendered form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CallbackId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CallbackId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
