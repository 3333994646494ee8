use bytes::Bytes;
use utils::http::ext::ResultExt;
use utils::http::router::ext::RequestExt;
use utils::http::router::middleware::{Middleware, NextFn};
use utils::http::RouteError;

use crate::api::error::{ApiError, Result};
use crate::api::ext::RequestGlobalExt;
use crate::api::Body;
use crate::validation::rule::RuleSet;
use crate::validation::{self, RequestPayload, ValidationContext, ValidationFailure};

/// Runs a rule set against the request before it reaches the handler.
///
/// A request that passes continues with its sanitized payload attached. A
/// request that fails is answered with the 400 envelope and never reaches
/// the handler.
pub struct ValidationGate {
	rules: &'static RuleSet,
}

impl ValidationGate {
	pub fn new(rules: &'static RuleSet) -> Self {
		Self { rules }
	}

	fn reject(&self, failure: ValidationFailure) -> RouteError<ApiError> {
		tracing::debug!(rules = self.rules.name, errors = failure.len(), "request failed validation");
		RouteError::from(failure.to_response()).with_source(Some(ApiError::Validation(failure)))
	}
}

#[async_trait::async_trait]
impl Middleware<Bytes, Body, RouteError<ApiError>> for ValidationGate {
	async fn handle(
		&self,
		mut req: hyper::Request<Bytes>,
		next: NextFn<Bytes, Body, RouteError<ApiError>>,
	) -> Result<hyper::Response<Body>> {
		let global = req.get_global()?;
		let ctx = ValidationContext { now: global.clock.now() };

		let params = req.params().cloned().unwrap_or_default();
		let mut payload = RequestPayload::new(params.iter(), req.uri().query());

		// A bad path parameter is reported even when the body is not JSON.
		validation::validate_params(self.rules, &mut payload, &ctx).map_err(|failure| self.reject(failure))?;

		payload
			.read_body(req.body())
			.map_err_route((hyper::StatusCode::BAD_REQUEST, "Request body must be valid JSON"))?;

		let sanitized = validation::validate_fields(self.rules, payload, &ctx).map_err(|failure| self.reject(failure))?;

		req.extensions_mut().insert(sanitized);
		next(req).await
	}
}
