use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpSocket;
use tokio::select;
use utils::http::router::error::RouterError;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;

use self::error::ApiError;
use crate::global::GlobalState;

pub mod error;
pub mod ext;
pub mod middleware;
pub mod v1;

pub type Body = Full<Bytes>;

pub type ApiRouter = Router<Bytes, Body, RouteError<ApiError>>;

pub fn routes(global: &Arc<GlobalState>) -> ApiRouter {
	let weak = Arc::downgrade(global);
	Router::builder()
		.data(weak)
		// Turns any error returned below into its JSON response
		.error_handler(utils::http::error_handler::<ApiError, _>)
		.middleware(middleware::trace::trace_middleware())
		.scope("/v1", v1::routes(global))
		.build()
}

fn failure(status: StatusCode, message: &str) -> hyper::Response<Body> {
	make_response!(status, json!({ "success": false, "message": message }))
}

/// Reads the whole body, bounded by `max_body_size`, and routes the request.
pub async fn serve<B>(router: &ApiRouter, max_body_size: usize, req: hyper::Request<B>) -> hyper::Response<Body>
where
	B: hyper::body::Body<Data = Bytes>,
	B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
	let (parts, body) = req.into_parts();

	let body = match Limited::new(body, max_body_size).collect().await {
		Ok(collected) => collected.to_bytes(),
		Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
			return failure(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
		}
		Err(err) => {
			tracing::debug!(error = %err, "failed to read request body");
			return failure(StatusCode::BAD_REQUEST, "Failed to read request body");
		}
	};

	match router.handle(hyper::Request::from_parts(parts, body)).await {
		Ok(res) => res,
		Err(RouterError::NotFound) => failure(StatusCode::NOT_FOUND, "Route not found"),
		Err(RouterError::Unhandled(err)) => {
			tracing::error!(error = ?err, "unhandled error");
			err.response()
		}
	}
}

pub async fn run(global: Arc<GlobalState>) -> anyhow::Result<()> {
	let config = &global.config.api;

	tracing::info!(name = %global.config.name, "listening on {}", config.bind_address);
	let socket = if config.bind_address.is_ipv6() {
		TcpSocket::new_v6()?
	} else {
		TcpSocket::new_v4()?
	};

	socket.set_reuseaddr(true)?;
	socket.bind(config.bind_address).context("failed to bind api socket")?;
	let listener = socket.listen(1024)?;

	let router = Arc::new(routes(&global));
	let max_body_size = config.max_body_size;
	let service = service_fn(move |req| {
		let router = router.clone();
		async move { Ok::<_, Infallible>(serve(&router, max_body_size, req).await) }
	});

	loop {
		select! {
			_ = global.ctx.cancelled() => {
				return Ok(());
			},
			r = listener.accept() => {
				let (socket, addr) = r?;
				let service = service.clone();

				tracing::debug!("accepted connection from {}", addr);

				tokio::spawn(async move {
					if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(socket), service).await {
						tracing::debug!(error = %err, "connection closed with error");
					}
				});
			},
		}
	}
}
