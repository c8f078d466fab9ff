use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use axum::error_handling::HandleErrorLayer;
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::ServiceBuilderExt;
use tracing::info;
use utility::env::Variables;
use utility::errors::AppResult;
use crate::{handlers, routes};
use crate::setup::shutdown_signal;
use crate::state::{SharedState, State};
use crate::util::MakeRequestUuid;

pub async fn serve() -> AppResult<()> {
	color_eyre::install()?;

	let settings = Variables::from_env()?;

	// Tracing
	// -------
	crate::logger::init(&settings)?;

	let app = app(settings.clone());

	// Start server
	// ------------
	let addr = format!("{}:{}", settings.server_url, settings.server_port);
	info!("starting server on {}...", &addr);

	let server =
		axum::Server::bind(&addr.parse()?)
			.serve(app.into_make_service_with_connect_info::<SocketAddr>());
	Ok(server.with_graceful_shutdown(shutdown_signal()).await?)
}

/// Full application: routes, parameter guard and the common layers
pub fn app(settings: Variables) -> Router {
	// CORS
	// ----
	let cors = crate::util::cors(&settings);

	// Layers
	// ------
	let layers = ServiceBuilder::new()
		.set_x_request_id(MakeRequestUuid)
		.layer(crate::layers::logger::LoggerLayer)
		.layer(HandleErrorLayer::new(handlers::timeout_error))
		.timeout(Duration::from_secs(settings.request_timeout))
		.propagate_x_request_id();

	let state: SharedState = Arc::new(State::init(settings));

	// Routing - API
	// -------------
	Router::new()
		.merge(routes::api(state.clone()).layer(cors))
		.layer(middleware::from_fn(crate::util::override_http_errors))
		.layer(layers)
		.with_state(state)
}
