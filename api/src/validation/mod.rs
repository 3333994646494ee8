use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub use self::failure::{FieldError, ValidationFailure};
use self::rule::{FieldRule, Location, Presence, RuleSet, Step};

pub mod check;
pub mod failure;
pub mod normalize;
pub mod rule;
pub mod rules;
pub mod schedule;

/// Per-request inputs of the rules that are not part of the request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
	pub now: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
	#[error("body is not valid json: {0}")]
	Json(#[from] serde_json::Error),
}

/// The untyped view of a request that rules are evaluated against.
///
/// After a successful validation the request carries the sanitized copy of
/// its payload, which is what handlers read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPayload {
	pub params: Map<String, Value>,
	pub query: Map<String, Value>,
	pub body: Value,
}

impl RequestPayload {
	/// A payload with the given path and query parameters and an empty
	/// object as its body. Repeated query keys are collected into an array.
	pub fn new<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>, query: Option<&str>) -> Self {
		let params = params
			.into_iter()
			.map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
			.collect();

		let mut parsed_query = Map::new();
		for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
			let value = Value::String(value.into_owned());
			match parsed_query.get_mut(key.as_ref()) {
				Some(Value::Array(values)) => values.push(value),
				Some(existing) => *existing = Value::Array(vec![existing.take(), value]),
				None => {
					parsed_query.insert(key.into_owned(), value);
				}
			}
		}

		Self {
			params,
			query: parsed_query,
			body: Value::Object(Map::new()),
		}
	}

	/// Replaces the body with the parsed JSON `body`. An empty body is read
	/// as an empty object.
	pub fn read_body(&mut self, body: &[u8]) -> Result<(), PayloadError> {
		self.body = if body.iter().all(u8::is_ascii_whitespace) {
			Value::Object(Map::new())
		} else {
			serde_json::from_slice(body)?
		};

		Ok(())
	}

	/// Deserializes the body into a typed model.
	pub fn body_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_value(self.body.clone())
	}

	pub fn query_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_value(Value::Object(self.query.clone()))
	}
}

/// Runs the path parameter rules of `rules`, sanitizing the params in place.
///
/// Path parameters are checked before anything else, and when any of them
/// fails nothing else is looked at.
pub fn validate_params(
	rules: &RuleSet,
	payload: &mut RequestPayload,
	ctx: &ValidationContext,
) -> Result<(), ValidationFailure> {
	let received = payload.clone();
	let mut errors = Vec::new();

	for rule in rules.at(Location::Params) {
		apply_rule(rule, &mut payload.params, &received, ctx, &mut errors);
	}

	match ValidationFailure::new(errors) {
		Some(failure) => Err(failure),
		None => Ok(()),
	}
}

/// Runs the query and body rules of `rules`, returning the sanitized payload
/// when every rule passes. Path parameters are expected to have passed
/// [`validate_params`] already.
///
/// Every field is checked independently and reports at most one failure, the
/// first failing check of its steps. Array items each report their own
/// failure.
pub fn validate_fields(
	rules: &RuleSet,
	mut payload: RequestPayload,
	ctx: &ValidationContext,
) -> Result<RequestPayload, ValidationFailure> {
	let received = payload.clone();
	let mut errors = Vec::new();

	for rule in rules.at(Location::Query) {
		apply_rule(rule, &mut payload.query, &received, ctx, &mut errors);
	}

	let mut body_rules = rules.at(Location::Body).peekable();
	if body_rules.peek().is_some() {
		match &mut payload.body {
			Value::Object(body) => body_rules.for_each(|rule| apply_rule(rule, body, &received, ctx, &mut errors)),
			_ => errors.push(FieldError::new("body", "Request body must be a JSON object")),
		}
	}

	match ValidationFailure::new(errors) {
		Some(failure) => Err(failure),
		None => Ok(payload),
	}
}

fn apply_rule(
	rule: &FieldRule,
	fields: &mut Map<String, Value>,
	received: &RequestPayload,
	ctx: &ValidationContext,
	errors: &mut Vec<FieldError>,
) {
	match fields.get_mut(rule.field) {
		Some(value) => {
			run_steps(&rule.steps, value, rule.field, received, ctx, errors);
		}
		None if rule.presence == Presence::Required => {
			errors.push(FieldError::new(rule.field, format!("{} is required", rule.field)));
		}
		None => {}
	}
}

fn run_steps(
	steps: &[Step],
	value: &mut Value,
	field: &str,
	received: &RequestPayload,
	ctx: &ValidationContext,
	errors: &mut Vec<FieldError>,
) -> bool {
	for step in steps {
		match step {
			Step::Sanitize(sanitizer) => sanitizer.apply(value),
			Step::Check(check, message) => {
				if !check.holds(value, ctx) {
					errors.push(FieldError::new(field, *message));
					return false;
				}
			}
			Step::CheckPayload(predicate, message) => {
				if !predicate(value, received, ctx) {
					errors.push(FieldError::new(field, *message));
					return false;
				}
			}
			Step::Each(item_steps) => {
				let Value::Array(items) = value else {
					continue;
				};

				let mut passed = true;
				for (idx, item) in items.iter_mut().enumerate() {
					passed &= run_steps(item_steps, item, &format!("{field}[{idx}]"), received, ctx, errors);
				}

				if !passed {
					return false;
				}
			}
		}
	}

	true
}
