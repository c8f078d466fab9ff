use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::Request;
use axum::response::Response;
use futures::future::BoxFuture;
use tower::{Layer, Service};
use tracing::{info, warn};
use crate::util::header_value_to_str;

#[derive(Clone)]
pub struct LoggerLayer;

impl<S> Layer<S> for LoggerLayer {
	type Service = LoggerMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		LoggerMiddleware { inner }
	}
}

#[derive(Clone)]
pub struct LoggerMiddleware<S> {
	inner: S,
}

impl<S, B> Service<Request<B>> for LoggerMiddleware<S>
	where
		S: Service<Request<B>, Response=Response> + Send + 'static,
		S::Future: Send + 'static,
{
	type Response = S::Response;
	type Error = S::Error;
	// `BoxFuture` is a type alias for `Pin<Box<dyn Future + Send + 'a>>`
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, request: Request<B>) -> Self::Future {
		let now = Instant::now();
		let request_id = header_value_to_str(request.headers().get("x-request-id")).to_owned();
		let method = request.method().to_string();
		let path = request.uri().path().to_owned();

		let future = self.inner.call(request);
		Box::pin(async move {
			let response: Response = future.await?;
			let status = response.status();
			let latency = format!("{:.3}ms", now.elapsed().as_secs_f64() * 1000.0);

			if status.is_server_error() || status.is_client_error() {
				warn!(status_code = status.as_u16(), method = %method, path = %path, latency = %latency, request_id = %request_id);
			} else {
				info!(status_code = status.as_u16(), method = %method, path = %path, latency = %latency, request_id = %request_id);
			}

			Ok(response)
		})
	}
}
