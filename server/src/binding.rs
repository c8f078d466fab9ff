//! Turns a raw request into the named arguments the guard inspects

use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use guard::{ArgumentSet, ModelState, Value};
use mime::Mime;
use tracing::trace;

/// Argument name a JSON body is bound to
pub const BODY_ARGUMENT: &str = "body";

/// Bind query string and body.
///
/// Query pairs and urlencoded form fields become string arguments, a JSON
/// body becomes the single `body` argument. Anything that fails to decode
/// marks the model state invalid. Bodies of other content types are left to
/// the handler.
pub fn bind(parts: &Parts, body: &[u8]) -> (ArgumentSet, ModelState) {
	let mut arguments = ArgumentSet::new();
	let mut model_state = ModelState::Valid;

	if let Some(query) = parts.uri.query() {
		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => pairs.into_iter().for_each(|(name, value)| arguments.append(name, value)),
			Err(err) => model_state.invalidate(format!("query: {err}")),
		}
	}

	if body.is_empty() {
		return (arguments, model_state);
	}

	match content_type(parts) {
		Some(media) if is_json(&media) => match serde_json::from_slice::<serde_json::Value>(body) {
			Ok(json) => arguments.append(BODY_ARGUMENT, Value::from(json)),
			Err(err) => model_state.invalidate(format!("body: {err}")),
		},
		Some(media) if is_form(&media) => match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
			Ok(pairs) => pairs.into_iter().for_each(|(name, value)| arguments.append(name, value)),
			Err(err) => model_state.invalidate(format!("form: {err}")),
		},
		other => trace!("body of type {:?} not bound", other),
	}

	(arguments, model_state)
}

fn content_type(parts: &Parts) -> Option<Mime> {
	parts
		.headers
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.parse::<Mime>().ok())
}

fn is_json(media: &Mime) -> bool {
	media.type_() == mime::APPLICATION
		&& (media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON))
}

fn is_form(media: &Mime) -> bool {
	media.type_() == mime::APPLICATION && media.subtype() == mime::WWW_FORM_URLENCODED
}

#[cfg(test)]
mod tests {
	use axum::http::Request;
	use serde_json::json;
	use super::*;

	fn parts(uri: &str, content_type: Option<&str>) -> Parts {
		let mut builder = Request::builder().uri(uri);
		if let Some(content_type) = content_type {
			builder = builder.header(CONTENT_TYPE, content_type);
		}
		builder.body(()).unwrap().into_parts().0
	}

	#[test]
	fn query_pairs_become_string_arguments() {
		let (arguments, state) = bind(&parts("/search?q=rust&tag=a&tag=b%3B", None), b"");
		assert!(state.is_valid());
		assert_eq!(arguments.get("q"), Some(&Value::from("rust")));
		assert_eq!(arguments.get("tag"), Some(&Value::from(vec!["a", "b;"])));
	}

	#[test]
	fn json_body_is_one_argument() {
		let body = json!({"name": "Alice", "age": 30}).to_string();
		let (arguments, state) = bind(&parts("/echo", Some("application/json; charset=utf-8")), body.as_bytes());
		assert!(state.is_valid());
		assert_eq!(arguments.len(), 1);
		let Some(Value::Composite(model)) = arguments.get(BODY_ARGUMENT) else {
			panic!("expected a composite body");
		};
		assert_eq!(model.get("age"), Some(Value::Integer(30)));
	}

	#[test]
	fn malformed_json_invalidates_model_state() {
		let (_, state) = bind(&parts("/echo", Some("application/json")), br#"{"age": "#);
		assert!(!state.is_valid());
	}

	#[test]
	fn form_fields_become_arguments() {
		let (arguments, state) =
			bind(&parts("/echo", Some("application/x-www-form-urlencoded")), b"comment=%3Cscript%3E&n=1");
		assert!(state.is_valid());
		assert_eq!(arguments.get("comment"), Some(&Value::from("<script>")));
		assert_eq!(arguments.get("n"), Some(&Value::from("1")));
	}

	#[test]
	fn other_bodies_are_not_bound() {
		let (arguments, state) = bind(&parts("/echo", Some("text/plain")), b"<b>;");
		assert!(state.is_valid());
		assert!(arguments.is_empty());
	}
}
