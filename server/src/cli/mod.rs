use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use guard::{ArgumentInterceptor, ArgumentSet, Decision, ModelState, ParameterFilter, Refusal};
use tracing::error;
use utility::app_error;
use utility::env::Variables;
use utility::errors::{AppResult, AppErrorCode, AppError};
use crate::binding::BODY_ARGUMENT;
use crate::util::ConfigState;

#[derive(Parser)]
#[clap(
name = crate::APP_NAME,
version = clap::crate_version ! (),
author = clap::crate_authors ! (),
)]
struct Cli {
	#[clap(subcommand)]
	commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Start server
	#[clap(about = "Start server", long_about = None)]
	Serve,

	/// Check a JSON document of arguments
	#[clap(about = "Check a JSON object of named arguments", long_about = None)]
	Check {
		/// JSON file, keys are argument names
		file: PathBuf,
	},
}

pub async fn start() -> AppResult<()> {
	let args = Cli::parse();
	match &args.commands {
		Commands::Serve => crate::server::serve().await,
		Commands::Check { file } => check(file),
	}
}

fn check(file: &Path) -> AppResult<()> {
	let settings = Variables::from_env()?;
	let filter = ConfigState::from(settings).filter;
	let document = std::fs::read_to_string(file)?;

	match check_document(&document, &filter) {
		Decision::Proceed => {
			println!("valid");
			Ok(())
		}
		Decision::Reject(refusal) => {
			match refusal {
				Refusal::ModelState(reason) => println!("invalid: {reason}"),
				Refusal::Argument(rejection) => println!("invalid: {rejection}"),
			}
			Err(app_error!(AppErrorCode::InvalidParameters))
		}
	}
}

/// Bind a JSON document the way a request body is bound: an object supplies
/// one argument per key, anything else is the `body` argument
fn check_document(document: &str, filter: &ParameterFilter) -> Decision {
	let (arguments, model_state) = match serde_json::from_str::<serde_json::Value>(document) {
		Ok(serde_json::Value::Object(map)) => (ArgumentSet::from(map), ModelState::Valid),
		Ok(other) => (ArgumentSet::from_iter([(BODY_ARGUMENT, other)]), ModelState::Valid),
		Err(err) => {
			error!("document is not JSON - {}", err);
			(ArgumentSet::new(), ModelState::Invalid(err.to_string()))
		}
	};
	filter.intercept(&arguments, &model_state)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clean_document_is_valid() {
		let filter = ParameterFilter::default();
		let document = r#"{"name": "Alice", "age": 30, "nested": {"tags": ["a", "b"], "score": 4.5}}"#;
		assert!(check_document(document, &filter).is_proceed());
	}

	#[test]
	fn rejection_names_the_field() {
		let filter = ParameterFilter::default();
		let Decision::Reject(Refusal::Argument(rejection)) = check_document(r#"{"user": {"bio": "a;b"}}"#, &filter) else {
			panic!("expected an argument refusal");
		};
		assert_eq!(rejection.path.to_string(), "user.bio");
	}

	#[test]
	fn non_object_document_is_the_body() {
		let filter = ParameterFilter::default();
		let Decision::Reject(Refusal::Argument(rejection)) = check_document(r#"["ok", "<b>"]"#, &filter) else {
			panic!("expected an argument refusal");
		};
		assert_eq!(rejection.path.to_string(), "body[1]");
	}

	#[test]
	fn broken_document_is_refused() {
		let filter = ParameterFilter::default();
		assert!(matches!(check_document("{", &filter), Decision::Reject(Refusal::ModelState(_))));
	}

	#[test]
	fn cli_parses_check() {
		let cli = Cli::try_parse_from(["paramguard", "check", "args.json"]).unwrap();
		assert!(matches!(cli.commands, Commands::Check { ref file } if file == Path::new("args.json")));
	}
}
