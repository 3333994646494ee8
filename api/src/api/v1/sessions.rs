use std::sync::Arc;

use bytes::Bytes;
use hyper::StatusCode;
use serde_json::Value;
use utils::http::ext::{OptionExt, ResultExt};
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;
use uuid::Uuid;

use super::{deleted, paginated, path_id, success};
use crate::api::error::{ApiError, Result};
use crate::api::ext::{RequestGlobalExt, RequestPayloadExt};
use crate::api::middleware::validate::ValidationGate;
use crate::api::Body;
use crate::database::session::{CreateSession, JoinError, Session, SessionFilter, UpdateSession};
use crate::database::Paging;
use crate::global::GlobalState;
use crate::validation::rules;
use crate::validation::schedule::parse_timestamp;

pub fn routes(_: &Arc<GlobalState>) -> RouterBuilder<Bytes, Body, RouteError<ApiError>> {
	Router::builder()
		.scope(
			"/",
			Router::builder()
				.middleware(ValidationGate::new(&rules::session::LIST))
				.get("/", list),
		)
		.scope(
			"/",
			Router::builder()
				.middleware(ValidationGate::new(&rules::session::CREATE))
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
				.middleware(ValidationGate::new(&rules::session::UPDATE))
				.put("/", update),
		)
		.scope(
			"/:id/join",
			Router::builder()
				.middleware(ValidationGate::new(&rules::session::JOIN))
				.post("/", join),
		)
}

async fn list(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;

	let filter: SessionFilter = payload
		.query_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid session filters"))?;
	let paging: Paging = payload
		.query_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid paging parameters"))?;

	paginated(global.store.list_sessions(&filter, paging).await)
}

async fn create(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;

	let input: CreateSession = payload
		.body_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid session data"))?;
	let scheduled_at = parse_timestamp(&input.scheduled_at)
		.map_err_route((StatusCode::BAD_REQUEST, "Scheduled date must be ISO-8601 formatted"))?;

	if let Some(mentor_id) = input.mentor_id {
		global
			.store
			.mentor(mentor_id)
			.await
			.map_err_route((StatusCode::NOT_FOUND, "Mentor not found"))?;
	}

	let session = global
		.store
		.insert_session(Session::new(input, scheduled_at, global.clock.now()))
		.await;
	tracing::debug!(id = %session.id, scheduled_at = %session.scheduled_at, "session created");

	success(StatusCode::CREATED, session)
}

async fn get(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let id = path_id(&req.take_payload()?)?;

	let session = global
		.store
		.session(id)
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Session not found"))?;

	success(StatusCode::OK, session)
}

async fn update(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;
	let id = path_id(&payload)?;

	let input: UpdateSession = payload
		.body_as()
		.map_err_route((StatusCode::BAD_REQUEST, "Invalid session data"))?;
	let scheduled_at = input
		.scheduled_at
		.as_deref()
		.map(parse_timestamp)
		.transpose()
		.map_err_route((StatusCode::BAD_REQUEST, "Scheduled date must be ISO-8601 formatted"))?;

	let now = global.clock.now();
	let session = global
		.store
		.update_session(id, |session| {
			session.apply(input, scheduled_at, now);
			session.clone()
		})
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Session not found"))?;

	success(StatusCode::OK, session)
}

async fn delete(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let id = path_id(&req.take_payload()?)?;

	global
		.store
		.delete_session(id)
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Session not found"))?;

	deleted("Session deleted")
}

async fn join(mut req: hyper::Request<Bytes>) -> Result<hyper::Response<Body>> {
	let global = req.get_global()?;
	let payload = req.take_payload()?;
	let id = path_id(&payload)?;

	let user_id = payload
		.body
		.get("userId")
		.and_then(Value::as_str)
		.and_then(|id| Uuid::try_parse(id).ok())
		.map_err_route((StatusCode::BAD_REQUEST, "A user ID is required to join a session"))?;

	let now = global.clock.now();
	let joined = global
		.store
		.update_session(id, |session| session.join(user_id, now).map(|()| session.clone()))
		.await
		.map_err_route((StatusCode::NOT_FOUND, "Session not found"))?;

	match joined {
		Ok(session) => success(StatusCode::OK, session),
		Err(err) => {
			let message = match &err {
				JoinError::Full => "Session is full".to_owned(),
				JoinError::NotJoinable(status) => format!("Session is {} and cannot be joined", status.as_str()),
			};

			Err((StatusCode::CONFLICT, message, err).into())
		}
	}
}
