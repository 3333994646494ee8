use serde_json::Value;

use super::{RequestPayload, ValidationContext};

/// Where in the request a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
	Params,
	Query,
	Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
	Required,
	Optional,
}

/// Rewrites a value in place. Sanitizers never fail, a value they do not
/// understand is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
	Trim,
	NormalizeEmail,
	ToInt,
	ToFloat,
}

/// A predicate over a field value and the per-request context.
pub type Predicate = fn(&Value, &ValidationContext) -> bool;

/// A predicate that also sees the whole request as it was received.
pub type PayloadPredicate = fn(&Value, &RequestPayload, &ValidationContext) -> bool;

#[derive(Debug, Clone, Copy)]
pub enum Check {
	IsString,
	/// Bounds on the length of a string, in characters.
	Length {
		min: Option<usize>,
		max: Option<usize>,
	},
	Int {
		min: Option<i64>,
		max: Option<i64>,
	},
	Float {
		min: Option<f64>,
		max: Option<f64>,
	},
	Email,
	Uuid,
	Url,
	Iso8601,
	OneOf(&'static [&'static str]),
	/// The value is an array holding at most `max` items.
	Array {
		max: usize,
	},
	Custom(Predicate),
}

#[derive(Debug, Clone)]
pub enum Step {
	Sanitize(Sanitizer),
	/// Fails the field with the message when the check does not hold.
	Check(Check, &'static str),
	/// Like `Check`, for rules that depend on other fields. The payload is
	/// the one received, before any sanitizer ran.
	CheckPayload(PayloadPredicate, &'static str),
	/// Runs the steps against every item of an array. Items are reported as
	/// `field[index]`.
	Each(Vec<Step>),
}

#[derive(Debug, Clone)]
pub struct FieldRule {
	pub location: Location,
	pub field: &'static str,
	pub presence: Presence,
	pub steps: Vec<Step>,
}

impl FieldRule {
	pub fn param(field: &'static str, steps: Vec<Step>) -> Self {
		Self {
			location: Location::Params,
			field,
			presence: Presence::Required,
			steps,
		}
	}

	pub fn query(field: &'static str, steps: Vec<Step>) -> Self {
		Self {
			location: Location::Query,
			field,
			presence: Presence::Optional,
			steps,
		}
	}

	pub fn body(field: &'static str, presence: Presence, steps: Vec<Step>) -> Self {
		Self {
			location: Location::Body,
			field,
			presence,
			steps,
		}
	}
}

/// The ordered rules of one endpoint.
#[derive(Debug, Clone)]
pub struct RuleSet {
	pub name: &'static str,
	pub fields: Vec<FieldRule>,
}

impl RuleSet {
	pub fn new(name: &'static str, fields: Vec<FieldRule>) -> Self {
		Self { name, fields }
	}

	pub fn at(&self, location: Location) -> impl Iterator<Item = &FieldRule> {
		self.fields.iter().filter(move |rule| rule.location == location)
	}
}
