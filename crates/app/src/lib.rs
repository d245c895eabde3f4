//! Application facade for the reactive callback engine.
//!
//! This crate ties the pieces together the way a transport layer consumes
//! them: an [`App`] owns the callback registry and the assigned layout, and
//! exposes the registration surface, the public dependency listing, the
//! serialized layout, and the update dispatch entry point.
//!
//! ```
//! use ripple_app::{App, CallbackValue, Dependency, Element};
//!
//! let app = App::new();
//! app.set_layout(
//! 	Element::new("ripple_html", "Div").with_id("root").children(vec![
//! 		Element::new("ripple_core", "Input").with_id("in").declare(["value"]),
//! 		Element::new("ripple_html", "Div").with_id("out"),
//! 	]),
//! )
//! .unwrap();
//!
//! app.callback(
//! 	Dependency::output("out", "children"),
//! 	vec![Dependency::input("in", "value")],
//! 	vec![],
//! )
//! .handler(|args| Ok(CallbackValue::Json(args.input(0).clone())))
//! .unwrap();
//! ```

#![warn(missing_docs)]

mod app;
mod config;

pub use app::{App, CallbackBuilder};
pub use config::AppConfig;

pub use ripple_dispatch::{
	DispatchError, Outcome, OutputsSpec, RequestItem, ReturnError, SpecSlot, UpdateRequest,
	UpdateResponse,
};
pub use ripple_layout::{Component, Element, LayoutError, LayoutIndex, PropValue};
pub use ripple_primitives::{CallbackId, Dependency, DependencyRole, PropId};
pub use ripple_registry::{
	CallbackArgs, CallbackError, CallbackValue, ClientsideFunction, DependencySpec, OutputSpec,
	OutputsDecl, PropertyRef, RegistrationError,
};
