use std::time::Instant;

use bytes::Bytes;
use utils::http::router::middleware::{middleware_fn, Middleware, NextFn};
use utils::http::RouteError;

use crate::api::error::ApiError;
use crate::api::Body;

/// Logs every request once it has been answered.
pub fn trace_middleware() -> impl Middleware<Bytes, Body, RouteError<ApiError>> {
	middleware_fn(|req: hyper::Request<Bytes>, next: NextFn<Bytes, Body, RouteError<ApiError>>| {
		let method = req.method().clone();
		let path = req.uri().path().to_owned();
		let start = Instant::now();

		async move {
			let result = next(req).await;
			let status = match &result {
				Ok(res) => res.status(),
				Err(err) => err.status(),
			};

			tracing::info!(%method, path = %path, status = status.as_u16(), elapsed = ?start.elapsed(), "request");

			result
		}
	})
}
