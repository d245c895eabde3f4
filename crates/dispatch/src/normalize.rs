//! Return-value normalization.
//!
//! # Role
//!
//! Validates that a callback's return conforms to the declared output arity
//! and produces the `component id -> property -> value` update map, with
//! partial no-update semantics: per-output sentinels are skipped, and a
//! return in which nothing updates collapses to a whole-callback no-op.
//!
//! Single-output returns are wrapped to length one and processed through the
//! same path as multi-output returns.

use indexmap::IndexMap;
use serde_json::Value;

use ripple_layout::Element;
use ripple_primitives::CallbackId;
use ripple_registry::{CallbackValue, PropertyRef};

use crate::error::ReturnError;
use crate::wire::{OutputsSpec, SpecSlot};

/// A normalized callback result.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
	/// No output produced a real update.
	NoUpdate,
	/// Updates per component id, per property, in output order.
	Updates(IndexMap<String, IndexMap<String, Value>>),
}

enum SlotRef<'a> {
	Target(&'a PropertyRef),
	Group(&'a [PropertyRef]),
}

/// Normalizes `raw` against the request's output spec.
///
/// `is_multi` is the registered declaration shape: a one-element outputs
/// list is still positional and must return a one-element group.
pub fn normalize(
	raw: CallbackValue,
	spec: &OutputsSpec,
	is_multi: bool,
	callback: &CallbackId,
) -> Result<Normalized, ReturnError> {
	if matches!(raw, CallbackValue::NoUpdate) {
		return Ok(Normalized::NoUpdate);
	}

	let slots: Vec<SlotRef<'_>> = match spec {
		OutputsSpec::Single(target) => vec![SlotRef::Target(target)],
		OutputsSpec::Multi(slots) => slots
			.iter()
			.map(|slot| match slot {
				SpecSlot::Target(target) => SlotRef::Target(target),
				SpecSlot::Group(targets) => SlotRef::Group(targets),
			})
			.collect(),
	};

	let values: Vec<CallbackValue> = if is_multi {
		match into_group(raw) {
			Ok(values) => values,
			Err(other) => {
				return Err(ReturnError::ExpectedList {
					callback: callback.clone(),
					found: kind_name(&other),
				});
			}
		}
	} else {
		vec![raw]
	};

	if values.len() != slots.len() {
		return Err(ReturnError::ArityMismatch {
			callback: callback.clone(),
			expected: slots.len(),
			actual: values.len(),
		});
	}

	let mut updates: IndexMap<String, IndexMap<String, Value>> = IndexMap::new();
	let mut has_update = false;

	for (i, (value, slot)) in values.into_iter().zip(&slots).enumerate() {
		let path = format!("output[{i}]");
		match slot {
			SlotRef::Target(target) => {
				apply(value, target, &path, &mut updates, &mut has_update)?;
			}
			SlotRef::Group(targets) => {
				let group = match into_group(value) {
					Ok(group) => group,
					Err(other) => {
						return Err(ReturnError::GroupShapeMismatch {
							path,
							expected: targets.len(),
							found: kind_name(&other).to_owned(),
						});
					}
				};
				if group.len() != targets.len() {
					return Err(ReturnError::GroupShapeMismatch {
						path,
						expected: targets.len(),
						found: format!("{} values", group.len()),
					});
				}
				for (j, (value, target)) in group.into_iter().zip(targets.iter()).enumerate() {
					apply(value, target, &format!("{path}[{j}]"), &mut updates, &mut has_update)?;
				}
			}
		}
	}

	if has_update {
		Ok(Normalized::Updates(updates))
	} else {
		Ok(Normalized::NoUpdate)
	}
}

/// Records one elementary `(value, target)` pair, skipping sentinels.
fn apply(
	value: CallbackValue,
	target: &PropertyRef,
	path: &str,
	updates: &mut IndexMap<String, IndexMap<String, Value>>,
	has_update: &mut bool,
) -> Result<(), ReturnError> {
	let serialized = match value {
		CallbackValue::NoUpdate => return Ok(()),
		CallbackValue::Json(value) => value,
		CallbackValue::Node(element) => serialize_element(&element, path)?,
		CallbackValue::Nodes(elements) => Value::Array(
			elements
				.iter()
				.enumerate()
				.map(|(i, e)| serialize_element(e, &format!("{path}[{i}]")))
				.collect::<Result<_, _>>()?,
		),
		CallbackValue::Group(_) => {
			return Err(ReturnError::InvalidLeaf {
				path: path.to_owned(),
				kind: "positional value group below an output position",
			});
		}
	};
	updates
		.entry(target.id.clone())
		.or_default()
		.insert(target.property.clone(), serialized);
	*has_update = true;
	Ok(())
}

/// Positional group extraction: an explicit group, or a bare JSON array
/// returned where positional values are expected.
fn into_group(value: CallbackValue) -> Result<Vec<CallbackValue>, CallbackValue> {
	match value {
		CallbackValue::Group(values) => Ok(values),
		CallbackValue::Json(Value::Array(values)) => Ok(values.into_iter().map(CallbackValue::Json).collect()),
		other => Err(other),
	}
}

fn serialize_element(element: &Element, path: &str) -> Result<Value, ReturnError> {
	serde_json::to_value(element).map_err(|_| ReturnError::InvalidLeaf {
		path: path.to_owned(),
		kind: "component tree is not JSON-serializable",
	})
}

fn kind_name(value: &CallbackValue) -> &'static str {
	match value {
		CallbackValue::NoUpdate => "the no-update sentinel",
		CallbackValue::Json(_) => "a single JSON value",
		CallbackValue::Node(_) => "a single component",
		CallbackValue::Nodes(_) => "a component list",
		CallbackValue::Group(_) => "a value group",
	}
}
