use thiserror::Error;

/// Errors raised while validating an assigned layout.
#[derive(Debug, Clone, Error)]
pub enum LayoutError {
	/// The same non-empty component id appears on two nodes.
	#[error("duplicate component id in layout: `{0}`")]
	DuplicateId(String),

	/// The traversal revisited a node; the structure is not a tree.
	#[error("layout is not a tree: component `{0}` reachable through itself")]
	CyclicLayout(String),
}
