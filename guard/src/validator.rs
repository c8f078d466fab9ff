//! Recursive structural validation of argument values

use tracing::{trace, warn};

use crate::config::ValidatorConfig;
use crate::report::{Reason, Rejection, Segment, Verdict};
use crate::value::{Composite, Value};

/// Walks a value and judges every leaf it reaches.
///
/// Stateless apart from its configuration, so one instance can be shared by
/// every in-flight request.
#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
	config: ValidatorConfig,
}

impl StructuralValidator {
	pub fn new(config: ValidatorConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ValidatorConfig {
		&self.config
	}

	/// Judge `value`, which sits `depth` levels below its argument
	pub fn validate(&self, value: &Value, depth: usize) -> Verdict {
		self.check(value, depth).into()
	}

	/// Like `validate` from the top of an argument, but keeps the first failure
	pub fn inspect(&self, value: &Value) -> Result<(), Rejection> {
		self.check(value, 0)
	}

	fn check(&self, value: &Value, depth: usize) -> Result<(), Rejection> {
		if depth > self.config.max_depth {
			warn!("value nested deeper than {} levels, rejecting", self.config.max_depth);
			return Err(Rejection::new(Reason::DepthExceeded(self.config.max_depth)));
		}

		match value {
			Value::Integer(number) => check_integer(*number),
			Value::Float(number) => check_float(*number),
			Value::String(text) => self.check_string(text),
			Value::Sequence(items) => self.check_sequence(items, depth),
			Value::Composite(composite) => self.check_composite(composite, depth),
			Value::Null | Value::Bool(_) | Value::Timestamp(_) => Ok(()),
		}
		.map_err(|rejection| {
			trace!("{} at depth {} rejected: {}", value.kind(), depth, rejection);
			rejection
		})
	}

	fn check_string(&self, text: &str) -> Result<(), Rejection> {
		match text.chars().find(|c| self.config.forbidden.contains(c)) {
			Some(c) => Err(Rejection::new(Reason::ForbiddenCharacter(c))),
			None => Ok(()),
		}
	}

	fn check_sequence(&self, items: &[Value], depth: usize) -> Result<(), Rejection> {
		for (index, item) in items.iter().enumerate() {
			self.check(item, depth + 1)
				.map_err(|rejection| rejection.within(Segment::Index(index)))?;
		}
		Ok(())
	}

	fn check_composite(&self, composite: &Composite, depth: usize) -> Result<(), Rejection> {
		let fields = composite.fields().map_err(Rejection::new)?;
		for (name, field) in &fields {
			self.check(field, depth + 1)
				.map_err(|rejection| rejection.within(Segment::Field(name.clone())))?;
		}
		Ok(())
	}
}

fn check_integer(number: i64) -> Result<(), Rejection> {
	number
		.to_string()
		.parse::<i64>()
		.map(|_| ())
		.map_err(|_| Rejection::new(Reason::MalformedNumber))
}

fn check_float(number: f64) -> Result<(), Rejection> {
	number
		.to_string()
		.parse::<f64>()
		.map(|_| ())
		.map_err(|_| Rejection::new(Reason::MalformedNumber))
}
