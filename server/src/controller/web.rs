use axum::extract::Query;
use axum::Json;
use serde_json::{json, Value};
use tracing::{instrument, trace};
use crate::extractor::ExtractRequestId;

pub async fn health_check() -> &'static str {
	"OK"
}

/// Echo query parameters that made it past the guard
#[instrument(skip(params), level = "trace")]
pub async fn search(
	ExtractRequestId(request_id): ExtractRequestId,
	Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
	trace!("{} query parameter(s)", params.len());
	Json(json!({ "params": params }))
}

/// Echo a JSON body that made it past the guard
#[instrument(skip(body), level = "trace")]
pub async fn echo(
	ExtractRequestId(request_id): ExtractRequestId,
	Json(body): Json<Value>,
) -> Json<Value> {
	Json(body)
}
