use std::sync::Arc;

use bytes::Bytes;
use hyper::StatusCode;
use serde_json::json;
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;

use crate::api::error::{ApiError, Result};
use crate::api::Body;
use crate::global::GlobalState;

async fn health(_: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	Ok(make_response!(StatusCode::OK, json!({ "status": "ok" })))
}

pub fn routes(_: &Arc<GlobalState>) -> RouterBuilder<Bytes, Body, RouteError<ApiError>> {
	Router::builder().get("/", health)
}
