use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::AppResult;

/// Represents configuration structure
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Variables {
	/// Environment: `development` or `production`
	pub environment: String,

	/// Log filter used by the app, tower-http, etc.
	pub rust_log: String,

	/// Path and file name prefix of log files
	pub log_path: String,
	pub log_file: String,

	/// Listening address
	pub server_url: String,
	pub server_port: u16,

	/// Seconds before a request times out
	pub request_timeout: u64,

	/// Largest request body read by the parameter guard
	pub max_body_bytes: usize,

	/// CORS
	pub cors_allow_origin: String,

	/// Parameter validation
	pub validator_max_depth: usize,
	pub validator_forbidden_chars: String,
}

impl Default for Variables {
	fn default() -> Self {
		Self {
			environment: "production".to_string(),
			rust_log: "info,tower_http=warn".to_string(),
			log_path: "./paramguard-log".to_string(),
			log_file: "paramguard.log".to_string(),
			server_url: "127.0.0.1".to_string(),
			server_port: 8080,
			request_timeout: 30,
			max_body_bytes: 2 * 1024 * 1024,
			cors_allow_origin: "*".to_string(),
			validator_max_depth: 64,
			validator_forbidden_chars: "<>;".to_string(),
		}
	}
}

impl Variables {
	/// from_env loads configuration from environment variables, falling back
	/// to `Variables::default()` for anything unset
	pub fn from_env() -> AppResult<Variables> {
		dotenvy::dotenv().ok();
		let defaults = config::Config::try_from(&Variables::default())?;
		match config::Config::builder()
			.add_source(defaults)
			.add_source(config::Environment::default().try_parsing(true))
			.build() {
			Ok(cfg) => {
				Ok(cfg.try_deserialize()?)
			}
			Err(err) => {
				error!("config error - {:?}",err);
				Ok(Variables::default())
			}
		}
	}

	pub fn is_development(&self) -> bool {
		self.environment == "development"
	}
}

impl ToString for Variables {
	fn to_string(&self) -> String {
		serde_json::to_string(self).unwrap_or_default()
	}
}
