use utils::http::RouteError;

use crate::database::session::JoinError;
use crate::validation::schedule::ScheduleError;
use crate::validation::{PayloadError, ValidationFailure};

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("request failed validation: {0}")]
	Validation(#[from] ValidationFailure),
	#[error("failed to read request payload: {0}")]
	Payload(#[from] PayloadError),
	#[error("failed to convert request data: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid schedule: {0}")]
	Schedule(#[from] ScheduleError),
	#[error("failed to join session: {0}")]
	Join(#[from] JoinError),
}
