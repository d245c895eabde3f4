/// Capability interface over a concrete component representation.
///
/// The engine never inspects component internals; it only needs the id, the
/// set of declared property names, the wildcard-property prefixes, and the
/// child components. Any component representation can implement this without
/// reflection.
pub trait Component {
	/// The component's id, if it has a non-empty one.
	fn id(&self) -> Option<&str>;

	/// Property names this component declares.
	fn declared_properties(&self) -> Box<dyn Iterator<Item = &str> + '_>;

	/// Property-name prefixes accepting arbitrary suffixes (e.g. `data-`).
	fn wildcard_prefixes(&self) -> Box<dyn Iterator<Item = &str> + '_>;

	/// Child components, in declaration order.
	fn children(&self) -> Box<dyn Iterator<Item = &dyn Component> + '_>;
}
