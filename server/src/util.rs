use std::str::from_utf8;
use std::sync::Arc;

use axum::body::Full;
use axum::http::{
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
	HeaderValue,
	Method, Request,
};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use guard::{ParameterFilter, StructuralValidator, ValidatorConfig};
use hyper::body::to_bytes;
use hyper::StatusCode;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::error;
use uuid::Uuid;
use utility::app_error;
use utility::errors::{AppErrorCode, AppError};
use utility::env::Variables;

/// Request ID middleware
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
	fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
		let id = Uuid::new_v4().to_string().parse();
		match id {
			Ok(id) => Some(RequestId::new(id)),
			_ => None,
		}
	}
}

// =============== Utils ================

/// Convert `HeaderValue` to `&str`
pub fn header_value_to_str(value: Option<&HeaderValue>) -> &str {
	match value {
		Some(value) => from_utf8(value.as_bytes()).unwrap_or_default(),
		None => "",
	}
}

// ================ CORS ================

/// CORS layer
pub fn cors(config: &Variables) -> CorsLayer {
	let allow_origin = config.cors_allow_origin.clone();

	let layer = CorsLayer::new()
		.allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
		.allow_headers([AUTHORIZATION, ACCEPT, ORIGIN, CONTENT_TYPE]);

	if allow_origin == "*" {
		layer.allow_origin(Any)
	} else {
		let origins = allow_origin
			.split(',')
			.filter(|url| *url != "*" && !url.is_empty())
			.filter_map(|url| url.parse().ok())
			.collect::<Vec<HeaderValue>>();

		if origins.is_empty() {
			layer.allow_origin(Any)
		} else {
			layer
				.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
					origins.contains(origin)
				}))
				.allow_credentials(true)
		}
	}
}

// =============== Override some HTTP errors ================

/// Layer which override some HTTP errors by using `AppError`
pub async fn override_http_errors<B>(req: Request<B>, next: Next<B>) -> impl IntoResponse {
	let response = next.run(req).await;

	let (parts, body) = response.into_parts();
	match to_bytes(body).await {
		Ok(body_bytes) => match String::from_utf8(body_bytes.to_vec()) {
			Ok(body) => match parts.status {
				StatusCode::METHOD_NOT_ALLOWED => app_error!(AppErrorCode::MethodNotAllowed).into_response(),
				StatusCode::UNPROCESSABLE_ENTITY => app_error!(AppErrorCode::UnprocessableEntity, body).into_response(),
				_ => Response::from_parts(parts, axum::body::boxed(Full::from(body))),
			},
			Err(err) => app_error!(AppErrorCode::InternalError, err.to_string()).into_response(),
		},
		Err(err) => app_error!(AppErrorCode::InternalError, err.to_string()).into_response(),
	}
}

pub struct ConfigState {
	pub filter: Arc<ParameterFilter>,
	pub max_body_bytes: usize,
}

impl From<Variables> for ConfigState {
	fn from(config: Variables) -> Self {
		let validator = ValidatorConfig::default()
			.with_max_depth(config.validator_max_depth)
			.with_forbidden(&config.validator_forbidden_chars);

		Self {
			filter: Arc::new(ParameterFilter::new(StructuralValidator::new(validator))),
			max_body_bytes: config.max_body_bytes,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_state_follows_variables() {
		let variables = Variables {
			validator_max_depth: 4,
			validator_forbidden_chars: "'".to_string(),
			max_body_bytes: 512,
			..Variables::default()
		};
		let state = ConfigState::from(variables);
		let config = state.filter.validator().config();
		assert_eq!(config.max_depth, 4);
		assert_eq!(config.forbidden, vec!['\'']);
		assert_eq!(state.max_body_bytes, 512);
	}

	#[test]
	fn missing_header_is_empty() {
		assert_eq!(header_value_to_str(None), "");
		assert_eq!(header_value_to_str(Some(&HeaderValue::from_static("abc"))), "abc");
	}
}
