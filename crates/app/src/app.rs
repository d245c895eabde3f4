use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde_json::Value;

use ripple_dispatch::{DispatchError, Outcome, UpdateRequest, dispatch};
use ripple_layout::{Element, LayoutError, LayoutIndex};
use ripple_primitives::{CallbackId, Dependency};
use ripple_registry::{
	CallbackArgs, CallbackError, CallbackKind, CallbackRegistry, CallbackValue, ClientsideFunction,
	Declaration, DependencySpec, OutputsDecl, RegistrationError,
};

use crate::config::AppConfig;

struct LayoutState {
	root: Element,
	index: LayoutIndex,
}

/// One application instance: configuration, the assigned layout, and the
/// callback registry.
///
/// Registration normally happens during single-threaded start-up, but every
/// surface here is safe against concurrent dispatch; the registry publishes
/// immutable snapshots and the layout slot swaps atomically.
#[derive(Default)]
pub struct App {
	config: AppConfig,
	registry: CallbackRegistry,
	layout: ArcSwapOption<LayoutState>,
}

impl App {
	/// Creates an application with default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an application with the given configuration.
	pub fn with_config(config: AppConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	/// The active configuration.
	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	/// Assigns the component tree the client will render.
	///
	/// Validates id uniqueness and builds the layout index consumed by
	/// callback validation. Assigning a new layout replaces the previous one
	/// wholesale.
	pub fn set_layout(&self, root: Element) -> Result<(), LayoutError> {
		let index = LayoutIndex::build(&root)?;
		tracing::debug!(components = index.len(), "layout assigned");
		self.layout.store(Some(Arc::new(LayoutState { root, index })));
		Ok(())
	}

	/// Starts a server-side callback registration.
	pub fn callback(
		&self,
		outputs: impl Into<OutputsDecl>,
		inputs: Vec<Dependency>,
		state: Vec<Dependency>,
	) -> CallbackBuilder<'_> {
		let mut decl = Declaration::new(outputs, inputs, state);
		decl.prevent_initial_call = self.config.prevent_initial_call;
		CallbackBuilder { app: self, decl }
	}

	/// Registers a clientside callback through the same validation path as
	/// server callbacks. The function itself executes in the browser.
	pub fn clientside_callback(
		&self,
		function: ClientsideFunction,
		outputs: impl Into<OutputsDecl>,
		inputs: Vec<Dependency>,
		state: Vec<Dependency>,
	) -> Result<CallbackId, RegistrationError> {
		let mut decl = Declaration::new(outputs, inputs, state);
		decl.prevent_initial_call = self.config.prevent_initial_call;
		self.register(decl, CallbackKind::Clientside(function))
	}

	fn register(&self, decl: Declaration, kind: CallbackKind) -> Result<CallbackId, RegistrationError> {
		let guard = self.layout.load();
		let index = guard.as_ref().map(|state| &state.index);
		self.registry
			.register(decl, kind, index, self.config.suppress_callback_exceptions)
	}

	/// The public callback graph, in registration order, for the client
	/// renderer.
	pub fn dependencies(&self) -> Vec<DependencySpec> {
		self.registry.dependencies()
	}

	/// The serialized layout, or `None` if no layout has been assigned.
	pub fn layout_json(&self) -> Option<Value> {
		let guard = self.layout.load();
		let state = guard.as_ref()?;
		match serde_json::to_value(&state.root) {
			Ok(value) => Some(value),
			Err(err) => {
				tracing::error!(%err, "layout serialization failed");
				None
			}
		}
	}

	/// Dispatches one parsed update request.
	pub fn update(&self, request: &UpdateRequest) -> Result<Outcome, DispatchError> {
		dispatch(&self.registry, request)
	}

	/// Direct access to the registry, for transports that need entry
	/// metadata beyond the dependency listing.
	pub fn registry(&self) -> &CallbackRegistry {
		&self.registry
	}
}

/// In-flight server callback registration.
///
/// Completes when a handler is attached; the registration is validated and
/// inserted at that point, returning the canonical callback id.
#[must_use = "a callback is not registered until a handler is attached"]
pub struct CallbackBuilder<'a> {
	app: &'a App,
	decl: Declaration,
}

impl CallbackBuilder<'_> {
	/// Overrides the initial-load firing behavior for this callback.
	pub fn prevent_initial_call(mut self, prevent: bool) -> Self {
		self.decl.prevent_initial_call = prevent;
		self
	}

	/// Attaches the handler and registers the callback.
	pub fn handler<F>(self, handler: F) -> Result<CallbackId, RegistrationError>
	where
		F: Fn(&CallbackArgs) -> Result<CallbackValue, CallbackError> + Send + Sync + 'static,
	{
		self.app.register(self.decl, CallbackKind::Server(Arc::new(handler)))
	}
}
