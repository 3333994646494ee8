//! Rule tables of every validated endpoint.

use once_cell::sync::Lazy;

use super::rule::{Check, FieldRule, RuleSet, Sanitizer, Step};

pub mod mentor;
pub mod session;

/// Routes addressed by a single `:id` path parameter.
pub static BY_ID: Lazy<RuleSet> = Lazy::new(|| RuleSet::new("by_id", vec![id_param()]));

pub(crate) fn id_param() -> FieldRule {
	FieldRule::param("id", vec![Step::Check(Check::Uuid, "Invalid ID format, expected a UUID")])
}

pub(crate) fn paging() -> Vec<FieldRule> {
	vec![
		FieldRule::query(
			"limit",
			vec![
				Step::Check(
					Check::Int {
						min: Some(1),
						max: Some(100),
					},
					"Limit must be an integer between 1 and 100",
				),
				Step::Sanitize(Sanitizer::ToInt),
			],
		),
		FieldRule::query(
			"offset",
			vec![
				Step::Check(Check::Int { min: Some(0), max: None }, "Offset must be a non-negative integer"),
				Step::Sanitize(Sanitizer::ToInt),
			],
		),
	]
}

/// Trims the value, then bounds its length.
pub(crate) fn trimmed(min: Option<usize>, max: usize, message: &'static str) -> Vec<Step> {
	vec![
		Step::Sanitize(Sanitizer::Trim),
		Step::Check(Check::Length { min, max: Some(max) }, message),
	]
}

/// An array of at most `max_items` strings, each bounded in length.
pub(crate) fn string_list(
	max_items: usize,
	too_many: &'static str,
	min: Option<usize>,
	max: usize,
	not_string: &'static str,
	bad_length: &'static str,
) -> Vec<Step> {
	vec![
		Step::Check(Check::Array { max: max_items }, too_many),
		Step::Each(vec![
			Step::Check(Check::IsString, not_string),
			Step::Sanitize(Sanitizer::Trim),
			Step::Check(Check::Length { min, max: Some(max) }, bad_length),
		]),
	]
}
