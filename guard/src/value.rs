use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::report::Reason;

/// Dynamically kinded datum handed to the validator
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Timestamp(DateTime<Utc>),
	Sequence(Vec<Value>),
	Composite(Composite),
}

impl Value {
	/// Short kind name, used in logs
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Integer(_) => "integer",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Timestamp(_) => "timestamp",
			Value::Sequence(_) => "sequence",
			Value::Composite(_) => "composite",
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

/// Named bag of values, shared by handle.
///
/// Cloning a `Composite` clones the handle, not the fields, so a composite can
/// hold a reference to itself (directly or through other composites).
#[derive(Clone, Default)]
pub struct Composite(Arc<RwLock<Vec<(String, Value)>>>);

impl Composite {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_fields<I, K, V>(fields: I) -> Self
		where
			I: IntoIterator<Item=(K, V)>,
			K: Into<String>,
			V: Into<Value>,
	{
		let composite = Self::new();
		for (name, value) in fields {
			composite.insert(name, value);
		}
		composite
	}

	/// Set a field, replacing any field with the same name in place
	pub fn insert(&self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		let mut fields = match self.0.write() {
			Ok(fields) => fields,
			Err(poisoned) => poisoned.into_inner(),
		};
		match fields.iter_mut().find(|(key, _)| *key == name) {
			Some((_, slot)) => *slot = value,
			None => fields.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<Value> {
		self.fields()
			.ok()?
			.into_iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value)
	}

	/// Copy of the fields in insertion order.
	///
	/// The lock is released before returning so callers can walk back into
	/// this same composite.
	pub fn fields(&self) -> Result<Vec<(String, Value)>, Reason> {
		let fields = self.0.read().map_err(|_| Reason::Unreadable)?;
		Ok(fields.clone())
	}

	pub fn len(&self) -> usize {
		self.fields().map(|fields| fields.len()).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn ptr_eq(&self, other: &Composite) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	#[cfg(test)]
	pub(crate) fn poison(&self) {
		let handle = self.clone();
		let _ = std::thread::spawn(move || {
			let _fields = handle.0.write();
			panic!("composite poisoned on purpose");
		})
		.join();
	}
}

impl PartialEq for Composite {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

// Field values are left out: a cyclic composite would never finish printing.
impl fmt::Debug for Composite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.fields() {
			Ok(fields) => f
				.debug_struct("Composite")
				.field("fields", &fields.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>())
				.finish(),
			Err(_) => f.write_str("Composite(<poisoned>)"),
		}
	}
}

impl From<JsonValue> for Value {
	fn from(value: JsonValue) -> Self {
		match value {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(b) => Value::Bool(b),
			JsonValue::Number(n) => match n.as_i64() {
				Some(i) => Value::Integer(i),
				None => n.as_f64().map_or(Value::Null, Value::Float),
			},
			JsonValue::String(s) => Value::String(s),
			JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
			JsonValue::Object(map) => Value::Composite(Composite::with_fields(map)),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Integer(value as i64)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::Timestamp(value)
	}
}

impl From<Composite> for Value {
	fn from(value: Composite) -> Self {
		Value::Composite(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::Sequence(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use super::*;

	#[test]
	fn json_numbers_keep_their_kind() {
		assert_eq!(Value::from(json!(30)), Value::Integer(30));
		assert_eq!(Value::from(json!(4.5)), Value::Float(4.5));
		assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
	}

	#[test]
	fn json_object_becomes_composite() {
		let value = Value::from(json!({"name": "Alice", "age": 30, "tags": ["a", null]}));
		let Value::Composite(composite) = value else {
			panic!("expected a composite");
		};
		let names = composite.fields().unwrap().into_iter().map(|(name, _)| name).collect::<Vec<_>>();
		assert_eq!(names.len(), 3);
		assert_eq!(composite.get("age"), Some(Value::Integer(30)));
		assert_eq!(
			composite.get("tags"),
			Some(Value::Sequence(vec![Value::String("a".into()), Value::Null]))
		);
	}

	#[test]
	fn insert_replaces_existing_field() {
		let composite = Composite::with_fields([("comment", "first")]);
		composite.insert("comment", "second");
		assert_eq!(composite.len(), 1);
		assert_eq!(composite.get("comment"), Some(Value::from("second")));
	}

	#[test]
	fn self_reference_debug_terminates() {
		let composite = Composite::new();
		composite.insert("me", composite.clone());
		assert_eq!(format!("{:?}", composite), r#"Composite { fields: ["me"] }"#);
		assert!(composite.get("me").map_or(false, |me| me == Value::Composite(composite.clone())));
	}

	#[test]
	fn poisoned_composite_reports_unreadable() {
		let composite = Composite::with_fields([("a", 1)]);
		composite.poison();
		assert_eq!(composite.fields().unwrap_err(), Reason::Unreadable);
		assert!(composite.is_empty());
	}
}
