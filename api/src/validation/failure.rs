use std::fmt::{Display, Formatter};

use hyper::StatusCode;
use serde_json::json;
use utils::make_response;

use crate::api::Body;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
	pub field: String,
	pub message: String,
}

impl FieldError {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// The failures collected while validating a request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure(Vec<FieldError>);

impl ValidationFailure {
	pub fn new(errors: Vec<FieldError>) -> Option<Self> {
		(!errors.is_empty()).then_some(Self(errors))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn into_errors(self) -> Vec<FieldError> {
		self.0
	}

	/// The 400 envelope returned to the client.
	pub fn to_response(&self) -> hyper::Response<Body> {
		make_response!(
			StatusCode::BAD_REQUEST,
			json!({
				"success": false,
				"message": "Invalid data",
				"errors": self.0,
			})
		)
	}
}

impl Display for ValidationFailure {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (idx, error) in self.0.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}: {}", error.field, error.message)?;
		}

		Ok(())
	}
}

impl std::error::Error for ValidationFailure {}
