//! Snapshot-published callback table.
//!
//! # Role
//!
//! Thread-safe entrypoint for registering and resolving callbacks. Dispatch
//! reads load the current snapshot without locking; registration clones the
//! snapshot, re-checks collisions against it, and publishes the successor
//! with compare-and-swap, retrying on contention. Registration is expected
//! during single-threaded start-up, but late registration stays safe against
//! concurrent dispatch.
//!
//! # Invariants
//!
//! - Keys are unique; a colliding insert is a hard error, never an overwrite.
//! - The claimed set is the union of every entry's constituent prop ids, so
//!   single/multi overlap is one uniform check.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::{FxHashMap, FxHashSet};

use ripple_layout::LayoutIndex;
use ripple_primitives::{CallbackId, PropId};

use crate::entry::{CallbackEntry, Declaration};
use crate::error::RegistrationError;
use crate::handler::CallbackKind;
use crate::listing::DependencySpec;
use crate::validate;

#[derive(Default)]
struct Snapshot {
	entries: FxHashMap<CallbackId, Arc<CallbackEntry>>,
	claimed: FxHashSet<PropId>,
	order: Vec<CallbackId>,
}

/// The process-wide callback table, owned by the application instance.
#[derive(Default)]
pub struct CallbackRegistry {
	snap: ArcSwap<Snapshot>,
}

impl CallbackRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates a declaration and inserts the resulting entry.
	///
	/// Runs the structural checks in declaration order (shape, self-reference,
	/// reserved characters, layout membership, orphan state), then the
	/// collision check against the live snapshot, and publishes on success.
	pub fn register(
		&self,
		decl: Declaration,
		kind: CallbackKind,
		layout: Option<&LayoutIndex>,
		suppress_layout_checks: bool,
	) -> Result<CallbackId, RegistrationError> {
		validate::validate_shape(&decl)?;
		validate::validate_no_self_reference(&decl)?;
		validate::validate_reserved_characters(&decl)?;
		validate::validate_layout_membership(&decl, layout, suppress_layout_checks)?;
		validate::validate_state_has_inputs(&decl)?;
		let candidate = validate::candidate_prop_ids(&decl)?;

		let id = decl.outputs.callback_id();
		let is_multi = decl.outputs.is_multi();
		let clientside = matches!(kind, CallbackKind::Clientside(_));
		let entry = Arc::new(CallbackEntry::new(decl, id.clone(), kind));

		loop {
			let old = self.snap.load_full();

			let clashes: Vec<PropId> = candidate.iter().filter(|p| old.claimed.contains(*p)).cloned().collect();
			if !clashes.is_empty() {
				return Err(RegistrationError::DuplicateCallbackOutput(clashes));
			}

			let mut entries = old.entries.clone();
			entries.insert(id.clone(), Arc::clone(&entry));
			let mut claimed = old.claimed.clone();
			claimed.extend(candidate.iter().cloned());
			let mut order = old.order.clone();
			order.push(id.clone());

			let new = Arc::new(Snapshot { entries, claimed, order });
			let prev = self.snap.compare_and_swap(&old, new);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(callback = %id, multi = is_multi, clientside, "callback registered");
				return Ok(id);
			}
			// Lost the race; retry against the fresh snapshot.
		}
	}

	/// Resolves a callback id to its registered entry.
	pub fn get(&self, id: &CallbackId) -> Option<Arc<CallbackEntry>> {
		self.snap.load().entries.get(id).cloned()
	}

	/// All entries in registration order.
	pub fn entries(&self) -> Vec<Arc<CallbackEntry>> {
		let snap = self.snap.load();
		snap.order.iter().filter_map(|id| snap.entries.get(id).cloned()).collect()
	}

	/// The public dependency listing served to the client renderer.
	pub fn dependencies(&self) -> Vec<DependencySpec> {
		self.entries().iter().map(|e| DependencySpec::from_entry(e)).collect()
	}

	/// Number of registered callbacks.
	pub fn len(&self) -> usize {
		self.snap.load().entries.len()
	}

	/// Returns true if no callbacks are registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
