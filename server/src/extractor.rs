use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crate::util::header_value_to_str;

/// Request id set by `SetRequestIdLayer`, empty when missing
#[derive(Debug, Clone)]
pub struct ExtractRequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractRequestId
	where
		S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(Self(header_value_to_str(parts.headers.get("x-request-id")).to_owned()))
	}
}
