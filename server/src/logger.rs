use tracing_subscriber::{EnvFilter, fmt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utility::env::Variables;
use utility::errors::{AppError, AppResult};

/// Install the global subscriber.
///
/// Development logs pretty lines to stdout. Otherwise JSON lines go to a daily
/// rolling file under `log_path` and compact lines to stdout.
pub fn init(settings: &Variables) -> AppResult<()> {
	let filter = EnvFilter::try_new(&settings.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));
	let registry = tracing_subscriber::registry().with(filter);

	let result = if settings.is_development() {
		registry.with(fmt::layer().pretty()).try_init()
	} else {
		let appender = tracing_appender::rolling::daily(&settings.log_path, &settings.log_file);
		registry
			.with(fmt::layer().json().with_writer(appender))
			.with(fmt::layer().compact())
			.try_init()
	};

	result.map_err(|err| AppError::ConfigError { message: format!("logger init - {err}") })
}
