use axum::Router;
use axum::routing::{get, post};
use crate::controller;
use crate::layers::guard::GuardLayer;
use crate::state::SharedState;

/// Return API routes list
pub fn api(state: SharedState) -> Router<SharedState> {
	Router::new()
		.route("/health-check", get(controller::web::health_check))
		// Routes taking parameters
		.merge(guarded(state))
}

fn guarded(state: SharedState) -> Router<SharedState> {
	Router::new()
		.route("/search", get(controller::web::search))
		.route("/echo", post(controller::web::echo))
		.layer(GuardLayer::new(state.config.filter.clone(), state.config.max_body_bytes))
}
