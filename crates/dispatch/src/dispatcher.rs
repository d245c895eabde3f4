use serde_json::Value;

use ripple_primitives::{CallbackId, Dependency, PropId};
use ripple_registry::{CallbackArgs, CallbackError, CallbackRegistry};

use crate::error::DispatchError;
use crate::normalize::{Normalized, normalize};
use crate::wire::{Outcome, RequestItem, UpdateRequest, UpdateResponse};

/// Dispatches one update request against the registry.
///
/// Looks up the registered entry, marshals positional arguments from the
/// request (inputs in declared order, then state), invokes the handler, and
/// normalizes the return value into the wire response. A handler that raises
/// the prevent-update signal short-circuits to [`Outcome::NoUpdate`] without
/// being treated as a failure; every other handler error propagates.
pub fn dispatch(registry: &CallbackRegistry, request: &UpdateRequest) -> Result<Outcome, DispatchError> {
	let id = CallbackId::from_wire(request.output.clone());
	let Some(entry) = registry.get(&id) else {
		tracing::warn!(callback = %id, "update request for unknown callback");
		return Err(DispatchError::CallbackNotFound(id));
	};
	let Some(handler) = entry.server_handler() else {
		return Err(DispatchError::ClientsideCallback(id));
	};

	let inputs = marshal(&id, entry.inputs(), &request.inputs)?;
	let state = marshal(&id, entry.state(), &request.state)?;
	let triggered: Vec<PropId> = request.changed_prop_ids.iter().cloned().map(PropId::from_rendered).collect();
	let args = CallbackArgs::new(inputs, state, triggered);

	tracing::trace!(callback = %id, "invoking callback handler");
	let raw = match (**handler)(&args) {
		Ok(raw) => raw,
		Err(CallbackError::PreventUpdate) => {
			tracing::trace!(callback = %id, "callback prevented its update");
			return Ok(Outcome::NoUpdate);
		}
		Err(CallbackError::Failed(message)) => {
			return Err(DispatchError::Handler { callback: id, message });
		}
	};

	match normalize(raw, &request.outputs, entry.is_multi(), &id)? {
		Normalized::NoUpdate => Ok(Outcome::NoUpdate),
		Normalized::Updates(updates) => Ok(Outcome::Updated(UpdateResponse::new(updates))),
	}
}

/// Extracts values for the declared dependencies, in declaration order.
fn marshal(
	callback: &CallbackId,
	declared: &[Dependency],
	provided: &[RequestItem],
) -> Result<Vec<Value>, DispatchError> {
	declared
		.iter()
		.map(|dep| {
			provided
				.iter()
				.find(|item| item.id == dep.component_id() && item.property == dep.property())
				.map(|item| item.value.clone())
				.ok_or_else(|| DispatchError::MissingArgument {
					callback: callback.clone(),
					role: dep.role(),
					target: dep.prop_id(),
				})
		})
		.collect()
}
