use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use guard::{ArgumentInterceptor, ArgumentSet, Decision, ModelState, ParameterFilter};
use http_body::Limited;
use hyper::body::to_bytes;
use tower::{Layer, Service};
use tracing::warn;
use utility::app_error;
use utility::errors::{AppError, AppErrorCode};
use crate::binding;

/// Checks the arguments of every request before it reaches the handler.
///
/// At most `max_body_bytes` of a body are read; a longer body is refused
/// like any other body that cannot be bound.
#[derive(Clone)]
pub struct GuardLayer {
	pub filter: Arc<ParameterFilter>,
	pub max_body_bytes: usize,
}

impl GuardLayer {
	pub fn new(filter: Arc<ParameterFilter>, max_body_bytes: usize) -> Self {
		Self { filter, max_body_bytes }
	}
}

impl<S> Layer<S> for GuardLayer {
	type Service = GuardMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		GuardMiddleware {
			inner,
			filter: Arc::clone(&self.filter),
			max_body_bytes: self.max_body_bytes,
		}
	}
}

#[derive(Clone)]
pub struct GuardMiddleware<S> {
	inner: S,
	filter: Arc<ParameterFilter>,
	max_body_bytes: usize,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
	where
		S: Service<Request<Body>, Response=Response> + Clone + Send + 'static,
		S::Future: Send + 'static,
{
	type Response = S::Response;
	type Error = S::Error;
	// `BoxFuture` is a type alias for `Pin<Box<dyn Future + Send + 'a>>`
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, request: Request<Body>) -> Self::Future {
		// The body has to be read before the inner service is called, so take
		// the service that was polled ready and leave a fresh clone behind
		let clone = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, clone);
		let filter = Arc::clone(&self.filter);
		let max_body_bytes = self.max_body_bytes;

		Box::pin(async move {
			let (parts, body) = request.into_parts();

			let (bytes, arguments, model_state) = match to_bytes(Limited::new(body, max_body_bytes)).await {
				Ok(bytes) => {
					let (arguments, model_state) = binding::bind(&parts, &bytes);
					(bytes, arguments, model_state)
				}
				Err(err) => {
					warn!("request body could not be read: {}", err);
					(Default::default(), ArgumentSet::new(), ModelState::Invalid(format!("body: {err}")))
				}
			};

			match filter.intercept(&arguments, &model_state) {
				Decision::Proceed => inner.call(Request::from_parts(parts, Body::from(bytes))).await,
				Decision::Reject(refusal) => {
					warn!("{} {} refused: {:?}", parts.method, parts.uri.path(), refusal);
					Ok(app_error!(AppErrorCode::InvalidParameters).into_response())
				}
			}
		})
	}
}
