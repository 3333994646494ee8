use std::sync::Arc;

use bytes::Bytes;
use hyper::StatusCode;
use utils::http::ext::{OptionExt, ResultExt};
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;

use super::{deleted, paginated, path_id, success};
use crate::api::error::{ApiError, Result};
use crate::api::ext::{RequestGlobalExt, RequestPayloadExt};
use crate::api::middleware::validate::ValidationGate;
use crate::api::Body;
use crate::database::mentor::{Mentor, MentorFilter, MentorInput};
use crate::database::Paging;
use crate::global::GlobalState;
use crate::validation::rules;

pub fn routes(_: &Arc<GlobalState>) -> RouterBuilder<Bytes, Body, RouteError<ApiError>> {
	Router::builder()
		.scope(
			"/",
			Router::builder()
				.middleware(ValidationGate::new(&rules::mentor::LIST))
				.get("/", list),
		)
		.scope(
			"/",
			Router::builder()
				.middleware(ValidationGate::new(&rules::mentor::CREATE))
				.post("/", create),
		)
		.scope(
			"/:id",
			Router::builder()
				.middleware(ValidationGate::new(&rules::BY_ID))
				.get("/", get)
				.delete("/", delete),
		)
		.scope(
			"/:id",
			Router::builder()
				.middleware(ValidationGate::new(&rules::mentor::UPDATE))
				.put("/", update),
		)
}

async fn list(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;

	let filter: MentorFilter = payload
		.query_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid mentor filters"))?;
	let paging: Paging = payload
		.query_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid paging parameters"))?;

	paginated(global.store.list_mentors(&filter, paging).await)
}

async fn create(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;

	let input: MentorInput = payload
		.body_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid mentor data"))?;

	let mentor = global.store.insert_mentor(Mentor::new(input, global.clock.now())).await;
	tracing::debug!(id = %mentor.id, "mentor created");

	success(StatusCode::CREATED, mentor)
}

async fn get(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let id = path_id(&req.take_payload()?)?;

	let mentor = global
		.store
		.mentor(id)
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Mentor not found"))?;

	success(StatusCode::OK, mentor)
}

async fn update(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;
	let id = path_id(&payload)?;

	let input: MentorInput = payload
		.body_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid mentor data"))?;

	let now = global.clock.now();
	let mentor = global
		.store
		.update_mentor(id, |mentor| mentor.apply(input, now))
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Mentor not found"))?;

	success(StatusCode::OK, mentor)
}

async fn delete(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let id = path_id(&req.take_payload()?)?;

	global
		.store
		.delete_mentor(id)
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Mentor not found"))?;

	deleted("Mentor deleted")
}
