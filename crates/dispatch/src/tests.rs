use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use ripple_layout::Element;
use ripple_primitives::{CallbackId, Dependency};
use ripple_registry::{
	CallbackError, CallbackKind, CallbackRegistry, CallbackValue, ClientsideFunction, Declaration,
	PropertyRef,
};

use crate::normalize::{Normalized, normalize};
use crate::{DispatchError, Outcome, OutputsSpec, RequestItem, ReturnError, SpecSlot, UpdateRequest, dispatch};

fn target(id: &str, property: &str) -> PropertyRef {
	PropertyRef {
		id: id.to_owned(),
		property: property.to_owned(),
	}
}

fn single_spec(id: &str, property: &str) -> OutputsSpec {
	OutputsSpec::Single(target(id, property))
}

fn cb_id(raw: &str) -> CallbackId {
	CallbackId::from_wire(raw)
}

/// A single-output value lands under its component id and property.
#[test]
fn test_normalize_single_value() {
	let result = normalize(
		CallbackValue::json("hello"),
		&single_spec("out", "children"),
		false,
		&cb_id("out.children"),
	)
	.expect("normalizes");
	match result {
		Normalized::Updates(map) => assert_eq!(map["out"]["children"], json!("hello")),
		other => panic!("expected updates, got {other:?}"),
	}
}

/// The top-level sentinel is a whole-callback no-op for any arity.
#[test]
fn test_normalize_top_level_no_update() {
	let single = normalize(
		CallbackValue::NoUpdate,
		&single_spec("out", "children"),
		false,
		&cb_id("out.children"),
	)
	.expect("normalizes");
	assert_eq!(single, Normalized::NoUpdate);

	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
	]);
	let multi = normalize(CallbackValue::NoUpdate, &spec, true, &cb_id("..a.x...b.y..")).expect("normalizes");
	assert_eq!(multi, Normalized::NoUpdate);
}

/// A multi return of all sentinels collapses to the same no-op outcome.
#[test]
fn test_normalize_all_sentinels_collapse() {
	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
	]);
	let result = normalize(
		CallbackValue::Group(vec![CallbackValue::NoUpdate, CallbackValue::NoUpdate]),
		&spec,
		true,
		&cb_id("..a.x...b.y.."),
	)
	.expect("normalizes");
	assert_eq!(result, Normalized::NoUpdate);
}

/// Sentinel slots are skipped; only real values reach the update map.
#[test]
fn test_normalize_partial_cancellation() {
	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
		SpecSlot::Target(target("c", "z")),
	]);
	let result = normalize(
		CallbackValue::Group(vec![
			CallbackValue::NoUpdate,
			CallbackValue::json(5),
			CallbackValue::NoUpdate,
		]),
		&spec,
		true,
		&cb_id("..a.x...b.y...c.z.."),
	)
	.expect("normalizes");
	match result {
		Normalized::Updates(map) => {
			assert_eq!(map.len(), 1);
			assert_eq!(map["b"]["y"], json!(5));
		}
		other => panic!("expected updates, got {other:?}"),
	}
}

/// Returning the wrong number of values names both counts.
#[test]
fn test_normalize_arity_mismatch() {
	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
	]);
	let err = normalize(
		CallbackValue::Group(vec![CallbackValue::json(1)]),
		&spec,
		true,
		&cb_id("..a.x...b.y.."),
	)
	.expect_err("short return must fail");
	match err {
		ReturnError::ArityMismatch { expected, actual, .. } => {
			assert_eq!((expected, actual), (2, 1));
		}
		other => panic!("unexpected error: {other}"),
	}

	let err = normalize(
		CallbackValue::Group(vec![
			CallbackValue::json(1),
			CallbackValue::json(2),
			CallbackValue::json(3),
		]),
		&spec,
		true,
		&cb_id("..a.x...b.y.."),
	)
	.expect_err("long return must fail");
	assert!(matches!(err, ReturnError::ArityMismatch { expected: 2, actual: 3, .. }));
}

/// A multi-output callback returning a bare scalar is told a list was
/// expected.
#[test]
fn test_normalize_expected_list() {
	let spec = OutputsSpec::Multi(vec![SpecSlot::Target(target("a", "x"))]);
	let err = normalize(CallbackValue::json(5), &spec, true, &cb_id("..a.x..")).expect_err("scalar must fail");
	assert!(matches!(err, ReturnError::ExpectedList { .. }));
}

/// A bare JSON array is accepted positionally for a multi-output return.
#[test]
fn test_normalize_json_array_as_group() {
	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
	]);
	let result = normalize(
		CallbackValue::Json(json!([1, "two"])),
		&spec,
		true,
		&cb_id("..a.x...b.y.."),
	)
	.expect("normalizes");
	match result {
		Normalized::Updates(map) => {
			assert_eq!(map["a"]["x"], json!(1));
			assert_eq!(map["b"]["y"], json!("two"));
		}
		other => panic!("expected updates, got {other:?}"),
	}
}

/// Grouped outputs zip elementwise and reject shape mismatches with a path.
#[test]
fn test_normalize_grouped_output() {
	let spec = OutputsSpec::Multi(vec![SpecSlot::Group(vec![
		target("row-1", "children"),
		target("row-2", "children"),
	])]);

	let result = normalize(
		CallbackValue::Group(vec![CallbackValue::Group(vec![
			CallbackValue::json("first"),
			CallbackValue::NoUpdate,
		])]),
		&spec,
		true,
		&cb_id("grouped"),
	)
	.expect("normalizes");
	match result {
		Normalized::Updates(map) => {
			assert_eq!(map["row-1"]["children"], json!("first"));
			assert!(!map.contains_key("row-2"));
		}
		other => panic!("expected updates, got {other:?}"),
	}

	let err = normalize(
		CallbackValue::Group(vec![CallbackValue::Group(vec![CallbackValue::json("only")])]),
		&spec,
		true,
		&cb_id("grouped"),
	)
	.expect_err("short group must fail");
	match err {
		ReturnError::GroupShapeMismatch { path, expected, found } => {
			assert_eq!(path, "output[0]");
			assert_eq!(expected, 2);
			assert_eq!(found, "1 values");
		}
		other => panic!("unexpected error: {other}"),
	}
}

/// A value group nested below an output position is invalid, with a path.
#[test]
fn test_normalize_nested_group_rejected() {
	let spec = OutputsSpec::Multi(vec![
		SpecSlot::Target(target("a", "x")),
		SpecSlot::Target(target("b", "y")),
	]);
	let err = normalize(
		CallbackValue::Group(vec![
			CallbackValue::json(1),
			CallbackValue::Group(vec![CallbackValue::json(2)]),
		]),
		&spec,
		true,
		&cb_id("..a.x...b.y.."),
	)
	.expect_err("nested group must fail");
	match err {
		ReturnError::InvalidLeaf { path, .. } => assert_eq!(path, "output[1]"),
		other => panic!("unexpected error: {other}"),
	}
}

/// Component-valued returns serialize into the nested client shape.
#[test]
fn test_normalize_component_value() {
	let node = Element::new("ripple_html", "Span").with_id("badge").text("ok");
	let result = normalize(
		CallbackValue::Node(node),
		&single_spec("out", "children"),
		false,
		&cb_id("out.children"),
	)
	.expect("normalizes");
	match result {
		Normalized::Updates(map) => {
			assert_eq!(map["out"]["children"]["type"], json!("Span"));
			assert_eq!(map["out"]["children"]["props"]["children"], json!("ok"));
		}
		other => panic!("expected updates, got {other:?}"),
	}
}

fn register_echo(registry: &CallbackRegistry) {
	registry
		.register(
			Declaration::new(
				Dependency::output("out", "children"),
				vec![Dependency::input("in", "value")],
				vec![],
			),
			CallbackKind::Server(Arc::new(|args| Ok(CallbackValue::Json(args.input(0).clone())))),
			None,
			true,
		)
		.expect("registration succeeds");
}

fn echo_request(value: serde_json::Value) -> UpdateRequest {
	UpdateRequest {
		output: "out.children".to_owned(),
		outputs: single_spec("out", "children"),
		inputs: vec![RequestItem::new("in", "value", value)],
		state: vec![],
		changed_prop_ids: vec!["in.value".to_owned()],
	}
}

/// Full round trip: dispatch an input change, get the uniform wire response.
#[test]
fn test_dispatch_round_trip() {
	let registry = CallbackRegistry::new();
	register_echo(&registry);

	let outcome = dispatch(&registry, &echo_request(json!("hello"))).expect("dispatch succeeds");
	match outcome {
		Outcome::Updated(response) => {
			assert!(response.multi);
			assert_eq!(
				serde_json::to_value(&response).expect("serializes"),
				json!({"response": {"out": {"children": "hello"}}, "multi": true})
			);
		}
		Outcome::NoUpdate => panic!("expected an update"),
	}
}

/// An id that was never registered is a distinct lookup failure.
#[test]
fn test_dispatch_unknown_callback() {
	let registry = CallbackRegistry::new();
	let mut request = echo_request(json!(1));
	request.output = "ghost.children".to_owned();

	let err = dispatch(&registry, &request).expect_err("unknown callback must fail");
	match err {
		DispatchError::CallbackNotFound(id) => assert_eq!(id.as_str(), "ghost.children"),
		other => panic!("unexpected error: {other}"),
	}
}

/// A request without a declared input's value is a marshaling error.
#[test]
fn test_dispatch_missing_argument() {
	let registry = CallbackRegistry::new();
	register_echo(&registry);

	let mut request = echo_request(json!(1));
	request.inputs.clear();

	let err = dispatch(&registry, &request).expect_err("missing value must fail");
	match err {
		DispatchError::MissingArgument { target, .. } => assert_eq!(target.as_str(), "in.value"),
		other => panic!("unexpected error: {other}"),
	}
}

/// State values are appended after inputs, each in declared order.
#[test]
fn test_dispatch_marshals_state_in_order() {
	let registry = CallbackRegistry::new();
	registry
		.register(
			Declaration::new(
				Dependency::output("out", "children"),
				vec![Dependency::input("in", "value"), Dependency::input("in2", "value")],
				vec![Dependency::state("store", "data")],
			),
			CallbackKind::Server(Arc::new(|args| {
				Ok(CallbackValue::Json(json!([
					args.input(0),
					args.input(1),
					args.state_value(0),
				])))
			})),
			None,
			true,
		)
		.expect("registration succeeds");

	let request = UpdateRequest {
		output: "out.children".to_owned(),
		outputs: single_spec("out", "children"),
		// Request order differs from declaration order; marshaling realigns.
		inputs: vec![
			RequestItem::new("in2", "value", json!("second")),
			RequestItem::new("in", "value", json!("first")),
		],
		state: vec![RequestItem::new("store", "data", json!({"n": 3}))],
		changed_prop_ids: vec!["in.value".to_owned()],
	};

	let outcome = dispatch(&registry, &request).expect("dispatch succeeds");
	match outcome {
		Outcome::Updated(response) => {
			assert_eq!(response.response["out"]["children"], json!(["first", "second", {"n": 3}]));
		}
		Outcome::NoUpdate => panic!("expected an update"),
	}
}

/// The prevent-update signal is control flow, not a failure.
#[test]
fn test_dispatch_prevent_update() {
	let registry = CallbackRegistry::new();
	registry
		.register(
			Declaration::new(
				Dependency::output("out", "children"),
				vec![Dependency::input("in", "value")],
				vec![],
			),
			CallbackKind::Server(Arc::new(|_| Err(CallbackError::PreventUpdate))),
			None,
			true,
		)
		.expect("registration succeeds");

	let outcome = dispatch(&registry, &echo_request(json!(1))).expect("prevent update is not an error");
	assert!(matches!(outcome, Outcome::NoUpdate));
}

/// Genuine handler failures propagate with the callback named.
#[test]
fn test_dispatch_handler_failure() {
	let registry = CallbackRegistry::new();
	registry
		.register(
			Declaration::new(
				Dependency::output("out", "children"),
				vec![Dependency::input("in", "value")],
				vec![],
			),
			CallbackKind::Server(Arc::new(|_| Err(CallbackError::Failed("division by zero".to_owned())))),
			None,
			true,
		)
		.expect("registration succeeds");

	let err = dispatch(&registry, &echo_request(json!(1))).expect_err("handler failure must propagate");
	match err {
		DispatchError::Handler { callback, message } => {
			assert_eq!(callback.as_str(), "out.children");
			assert_eq!(message, "division by zero");
		}
		other => panic!("unexpected error: {other}"),
	}
}

/// Clientside entries cannot be dispatched on the server.
#[test]
fn test_dispatch_clientside_rejected() {
	let registry = CallbackRegistry::new();
	registry
		.register(
			Declaration::new(
				Dependency::output("out", "children"),
				vec![Dependency::input("in", "value")],
				vec![],
			),
			CallbackKind::Clientside(ClientsideFunction::new("ns", "echo")),
			None,
			true,
		)
		.expect("registration succeeds");

	let err = dispatch(&registry, &echo_request(json!(1))).expect_err("clientside dispatch must fail");
	assert!(matches!(err, DispatchError::ClientsideCallback(_)));
}

/// A multi-output response carries every updated target, positionally
/// reconstructed from the outputs spec.
#[test]
fn test_dispatch_multi_output() {
	let registry = CallbackRegistry::new();
	registry
		.register(
			Declaration::new(
				vec![Dependency::output("a", "x"), Dependency::output("b", "y")],
				vec![Dependency::input("in", "value")],
				vec![],
			),
			CallbackKind::Server(Arc::new(|args| {
				let n = args.input(0).as_i64().unwrap_or(0);
				Ok(CallbackValue::Group(vec![
					CallbackValue::json(n + 1),
					CallbackValue::json(n * 2),
				]))
			})),
			None,
			true,
		)
		.expect("registration succeeds");

	let request = UpdateRequest {
		output: "..a.x...b.y..".to_owned(),
		outputs: OutputsSpec::Multi(vec![
			SpecSlot::Target(target("a", "x")),
			SpecSlot::Target(target("b", "y")),
		]),
		inputs: vec![RequestItem::new("in", "value", json!(10))],
		state: vec![],
		changed_prop_ids: vec![],
	};

	let outcome = dispatch(&registry, &request).expect("dispatch succeeds");
	match outcome {
		Outcome::Updated(response) => {
			assert_eq!(
				serde_json::to_value(&response).expect("serializes"),
				json!({"response": {"a": {"x": 11}, "b": {"y": 20}}, "multi": true})
			);
		}
		Outcome::NoUpdate => panic!("expected an update"),
	}
}

/// Requests deserialize from the client wire shape, including camel-cased
/// changed prop ids and absent values.
#[test]
fn test_request_wire_shape() {
	let request: UpdateRequest = serde_json::from_value(json!({
		"output": "out.children",
		"outputs": {"id": "out", "property": "children"},
		"inputs": [{"id": "in", "property": "value"}],
		"changedPropIds": ["in.value"]
	}))
	.expect("request deserializes");

	assert_eq!(request.output, "out.children");
	assert_eq!(request.inputs[0].value, serde_json::Value::Null);
	assert_eq!(request.changed_prop_ids, vec!["in.value".to_owned()]);
	assert!(request.state.is_empty());
}
