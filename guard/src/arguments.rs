use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use crate::value::Value;

/// Named argument values of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSet {
	values: BTreeMap<String, Value>,
	/// Names whose sequence was built by `append` from repeated values
	repeated: BTreeSet<String>,
}

impl ArgumentSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an argument. The first repeat of a name wraps both values in a new
	/// sequence and later repeats extend that sequence, the way repeated query
	/// keys are. A value that was already a sequence is kept as one element.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		match self.values.entry(name.clone()) {
			Entry::Vacant(slot) => {
				slot.insert(value);
			}
			Entry::Occupied(mut slot) => match slot.get_mut() {
				Value::Sequence(items) if self.repeated.contains(&name) => items.push(value),
				existing => {
					let first = std::mem::replace(existing, Value::Null);
					*existing = Value::Sequence(vec![first, value]);
					self.repeated.insert(name);
				}
			},
		}
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn iter(&self) -> impl Iterator<Item=(&str, &Value)> {
		self.values.iter().map(|(name, value)| (name.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ArgumentSet {
	fn from_iter<T: IntoIterator<Item=(K, V)>>(iter: T) -> Self {
		let mut arguments = Self::new();
		for (name, value) in iter {
			arguments.append(name, value);
		}
		arguments
	}
}

impl From<serde_json::Map<String, serde_json::Value>> for ArgumentSet {
	fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
		map.into_iter().collect()
	}
}

/// What binding made of the request before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelState {
	#[default]
	Valid,
	Invalid(String),
}

impl ModelState {
	pub fn is_valid(&self) -> bool {
		matches!(self, ModelState::Valid)
	}

	/// Keep the first binding error
	pub fn invalidate(&mut self, reason: impl Into<String>) {
		if self.is_valid() {
			*self = ModelState::Invalid(reason.into());
		}
	}
}
