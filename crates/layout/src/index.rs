use rustc_hash::{FxHashMap, FxHashSet};

use crate::component::Component;
use crate::error::LayoutError;

/// Property capabilities of one component in the layout.
#[derive(Debug, Clone, Default)]
pub struct ComponentCaps {
	properties: FxHashSet<String>,
	wildcards: Vec<String>,
}

impl ComponentCaps {
	/// Returns true if `property` is declared, or matches a wildcard prefix.
	pub fn supports(&self, property: &str) -> bool {
		self.properties.contains(property) || self.wildcards.iter().any(|w| property.starts_with(w.as_str()))
	}

	/// Declared property names, sorted for stable error messages.
	pub fn properties(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.properties.iter().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

/// Read-only view over the declared component tree.
///
/// Built once per layout assignment by a validating traversal; consulted by
/// the registration validator for id membership and property checks.
#[derive(Debug, Clone, Default)]
pub struct LayoutIndex {
	components: FxHashMap<String, ComponentCaps>,
}

impl LayoutIndex {
	/// Traverses the tree, checking id uniqueness and recording per-id
	/// property capabilities.
	///
	/// The first repeated non-empty id aborts with
	/// [`LayoutError::DuplicateId`]. Components form a tree by construction;
	/// a structure that leads the traversal back to a visited node is
	/// rejected rather than looped on.
	pub fn build(root: &dyn Component) -> Result<Self, LayoutError> {
		let mut components: FxHashMap<String, ComponentCaps> = FxHashMap::default();
		let mut visited: FxHashSet<*const ()> = FxHashSet::default();
		let mut stack: Vec<&dyn Component> = vec![root];

		while let Some(node) = stack.pop() {
			let addr = (node as *const dyn Component).cast::<()>();
			if !visited.insert(addr) {
				let id = node.id().unwrap_or("<anonymous>").to_owned();
				return Err(LayoutError::CyclicLayout(id));
			}

			if let Some(id) = node.id() {
				if components.contains_key(id) {
					return Err(LayoutError::DuplicateId(id.to_owned()));
				}
				components.insert(
					id.to_owned(),
					ComponentCaps {
						properties: node.declared_properties().map(str::to_owned).collect(),
						wildcards: node.wildcard_prefixes().map(str::to_owned).collect(),
					},
				);
			}

			stack.extend(node.children());
		}

		tracing::debug!(components = components.len(), "layout index built");
		Ok(Self { components })
	}

	/// Returns true if a component with this id exists in the layout.
	pub fn contains_id(&self, id: &str) -> bool {
		self.components.contains_key(id)
	}

	/// The capabilities recorded for `id`, if present.
	pub fn component(&self, id: &str) -> Option<&ComponentCaps> {
		self.components.get(id)
	}

	/// All component ids, sorted for stable error messages.
	pub fn ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.components.keys().map(String::as_str).collect();
		ids.sort_unstable();
		ids
	}

	/// Number of identified components.
	pub fn len(&self) -> usize {
		self.components.len()
	}

	/// Returns true if no identified components were recorded.
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}
