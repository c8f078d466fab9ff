use tracing::{debug, info};

use crate::arguments::{ArgumentSet, ModelState};
use crate::report::{Rejection, Segment};
use crate::validator::StructuralValidator;

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
	Proceed,
	Reject(Refusal),
}

impl Decision {
	pub fn is_proceed(&self) -> bool {
		matches!(self, Decision::Proceed)
	}
}

/// Why a call was refused. Only ever logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Refusal {
	/// Binding had already failed
	ModelState(String),
	/// An argument held an invalid value
	Argument(Rejection),
}

/// Point where a call's arguments are checked before the handler runs
pub trait ArgumentInterceptor {
	fn intercept(&self, arguments: &ArgumentSet, model_state: &ModelState) -> Decision;
}

/// Rejects a call when binding failed or any argument fails structural validation
#[derive(Debug, Clone, Default)]
pub struct ParameterFilter {
	validator: StructuralValidator,
}

impl ParameterFilter {
	pub fn new(validator: StructuralValidator) -> Self {
		Self { validator }
	}

	pub fn validator(&self) -> &StructuralValidator {
		&self.validator
	}
}

impl ArgumentInterceptor for ParameterFilter {
	fn intercept(&self, arguments: &ArgumentSet, model_state: &ModelState) -> Decision {
		if let ModelState::Invalid(reason) = model_state {
			info!("rejecting call, binding failed: {}", reason);
			return Decision::Reject(Refusal::ModelState(reason.clone()));
		}

		for (name, value) in arguments.iter() {
			if let Err(rejection) = self.validator.inspect(value) {
				let rejection = rejection.within(Segment::Field(name.to_owned()));
				info!("rejecting call, invalid argument {}", rejection);
				return Decision::Reject(Refusal::Argument(rejection));
			}
		}

		debug!("{} argument(s) accepted", arguments.len());
		Decision::Proceed
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use crate::report::Reason;
	use crate::value::{Composite, Value};
	use super::*;

	fn intercept(arguments: ArgumentSet) -> Decision {
		ParameterFilter::default().intercept(&arguments, &ModelState::Valid)
	}

	#[test]
	fn clean_arguments_proceed() {
		let arguments = ArgumentSet::from_iter([
			("person", Value::from(json!({"name": "Alice", "age": 30}))),
			("nested", Value::from(json!({"nested": {"tags": ["a", "b"], "score": 4.5}}))),
			("absent", Value::Null),
		]);
		assert!(intercept(arguments).is_proceed());
		assert!(intercept(ArgumentSet::new()).is_proceed());
	}

	#[test]
	fn any_invalid_argument_rejects_the_call() {
		let arguments = ArgumentSet::from_iter([
			("first", Value::from("fine")),
			("list", Value::from(vec!["ok", "bad;value"])),
		]);
		let Decision::Reject(Refusal::Argument(rejection)) = intercept(arguments) else {
			panic!("expected an argument refusal");
		};
		assert_eq!(rejection.path.to_string(), "list[1]");
		assert_eq!(rejection.reason, Reason::ForbiddenCharacter(';'));
	}

	#[test]
	fn script_in_composite_rejects() {
		let arguments = ArgumentSet::from_iter([("model", json!({"comment": "<script>"}))]);
		let Decision::Reject(Refusal::Argument(rejection)) = intercept(arguments) else {
			panic!("expected an argument refusal");
		};
		assert_eq!(rejection.to_string(), "model.comment: forbidden character '<'");
	}

	#[test]
	fn invalid_model_state_rejects_clean_arguments() {
		let arguments = ArgumentSet::from_iter([("name", "Alice")]);
		let state = ModelState::Invalid("age: invalid digit found in string".into());
		assert_eq!(
			ParameterFilter::default().intercept(&arguments, &state),
			Decision::Reject(Refusal::ModelState("age: invalid digit found in string".into()))
		);
	}

	#[test]
	fn cyclic_argument_rejects() {
		let composite = Composite::new();
		composite.insert("me", composite.clone());
		let arguments = ArgumentSet::from_iter([("loop", composite)]);
		assert!(!intercept(arguments).is_proceed());
	}
}
