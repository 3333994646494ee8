use std::sync::Arc;

use bytes::Bytes;
use hyper::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use utils::http::ext::{OptionExt, ResultExt};
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;
use uuid::Uuid;

use super::error::{ApiError, Result};
use super::Body;
use crate::database::Page;
use crate::global::GlobalState;
use crate::validation::RequestPayload;

pub mod health;
pub mod mentors;
pub mod sessions;

pub fn routes(global: &Arc<GlobalState>) -> RouterBuilder<Bytes, Body, RouteError<ApiError>> {
	Router::builder()
		.scope("/health", health::routes(global))
		.scope("/mentors", mentors::routes(global))
		.scope("/sessions", sessions::routes(global))
}

fn success(status: StatusCode, data: impl Serialize) -> Result<hyper::Response<Body>> {
	let data =
		serde_json::to_value(data).map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response"))?;

	Ok(make_response!(status, json!({ "success": true, "data": data })))
}

fn paginated(page: Page<impl Serialize>) -> Result<hyper::Response<Body>> {
	let data = serde_json::to_value(page.items)
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response"))?;

	Ok(make_response!(
		StatusCode::OK,
		json!({
			"success": true,
			"data": data,
			"pagination": {
				"total": page.total,
				"limit": page.limit,
				"offset": page.offset,
			},
		})
	))
}

fn deleted(message: &str) -> Result<hyper::Response<Body>> {
	Ok(make_response!(StatusCode::OK, json!({ "success": true, "message": message })))
}

/// The `:id` path parameter of a validated request.
fn path_id(payload: &RequestPayload) -> Result<Uuid> {
	payload
		.params
		.get("id")
		.and_then(Value::as_str)
		.and_then(|id| Uuid::try_parse(id).ok())
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid ID format, expected a UUID"))
}
