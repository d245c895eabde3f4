//! Pure structural checks run once per registration, in declaration order.
//!
//! Fail fast: the first violated check wins. The collision check against
//! already-registered entries lives with the registry snapshot; everything
//! here depends only on the proposed declaration and the layout index.

use rustc_hash::FxHashSet;

use ripple_layout::LayoutIndex;
use ripple_primitives::{Dependency, DependencyRole, PropId};

use crate::entry::Declaration;
use crate::error::RegistrationError;

/// Shape check: outputs non-empty, every argument carries the role its
/// position requires.
pub(crate) fn validate_shape(decl: &Declaration) -> Result<(), RegistrationError> {
	let outputs = decl.outputs.as_slice();
	if outputs.is_empty() {
		return Err(RegistrationError::MissingOutputs);
	}
	check_roles(outputs, DependencyRole::Output)?;
	check_roles(&decl.inputs, DependencyRole::Input)?;
	check_roles(&decl.state, DependencyRole::State)?;
	Ok(())
}

fn check_roles(deps: &[Dependency], expected: DependencyRole) -> Result<(), RegistrationError> {
	for dep in deps {
		if dep.role() != expected {
			return Err(RegistrationError::InvalidShape {
				expected,
				found: dep.role(),
				target: dep.prop_id(),
			});
		}
	}
	Ok(())
}

/// No output target may also appear as an input of the same callback.
pub(crate) fn validate_no_self_reference(decl: &Declaration) -> Result<(), RegistrationError> {
	for input in &decl.inputs {
		for output in decl.outputs.as_slice() {
			if output.same_target(input) {
				return Err(RegistrationError::SameInputOutput(output.prop_id()));
			}
		}
	}
	Ok(())
}

/// Component ids and property names must be free of the id separator, or the
/// derived callback id would not decompose.
pub(crate) fn validate_reserved_characters(decl: &Declaration) -> Result<(), RegistrationError> {
	let all = decl.outputs.as_slice().iter().chain(&decl.inputs).chain(&decl.state);
	for dep in all {
		if dep.contains_reserved_separator() {
			return Err(RegistrationError::InvalidComponentId(dep.prop_id()));
		}
	}
	Ok(())
}

/// Inputs and state must reference components and properties present in the
/// assigned layout, unless suppressed by configuration.
///
/// Registering without a layout, without suppression, is itself an error: the
/// ids could never be checked.
pub(crate) fn validate_layout_membership(
	decl: &Declaration,
	layout: Option<&LayoutIndex>,
	suppress: bool,
) -> Result<(), RegistrationError> {
	if suppress {
		return Ok(());
	}
	let Some(index) = layout else {
		return Err(RegistrationError::LayoutNotAssigned);
	};

	for dep in decl.inputs.iter().chain(&decl.state) {
		let Some(caps) = index.component(dep.component_id()) else {
			return Err(RegistrationError::NonexistentId {
				id: dep.component_id().to_owned(),
				known: index.ids().into_iter().map(str::to_owned).collect(),
			});
		};
		if !caps.supports(dep.property()) {
			return Err(RegistrationError::NonexistentProperty {
				id: dep.component_id().to_owned(),
				property: dep.property().to_owned(),
				available: caps.properties().into_iter().map(str::to_owned).collect(),
			});
		}
	}
	Ok(())
}

/// A callback with state but no inputs can never fire.
pub(crate) fn validate_state_has_inputs(decl: &Declaration) -> Result<(), RegistrationError> {
	if !decl.state.is_empty() && decl.inputs.is_empty() {
		return Err(RegistrationError::MissingInputs { state: decl.state.len() });
	}
	Ok(())
}

/// The candidate's constituent prop ids, rejecting a declaration that targets
/// the same output twice within itself.
pub(crate) fn candidate_prop_ids(decl: &Declaration) -> Result<Vec<PropId>, RegistrationError> {
	let ids: Vec<PropId> = decl.outputs.as_slice().iter().map(Dependency::prop_id).collect();
	let mut seen = FxHashSet::default();
	let duplicates: Vec<PropId> = ids.iter().filter(|id| !seen.insert(*id)).cloned().collect();
	if !duplicates.is_empty() {
		return Err(RegistrationError::DuplicateCallbackOutput(duplicates));
	}
	Ok(ids)
}
