use once_cell::sync::Lazy;

use super::{id_param, paging, string_list, trimmed};
use crate::validation::rule::{Check, FieldRule, Presence, RuleSet, Sanitizer, Step};

pub static CREATE: Lazy<RuleSet> = Lazy::new(|| RuleSet::new("mentor_create", profile()));

pub static UPDATE: Lazy<RuleSet> = Lazy::new(|| {
	let mut fields = vec![id_param()];
	fields.extend(profile());
	RuleSet::new("mentor_update", fields)
});

pub static LIST: Lazy<RuleSet> = Lazy::new(|| {
	let mut fields = vec![
		FieldRule::query("search", trimmed(Some(2), 100, "Search term must be between 2 and 100 characters")),
		FieldRule::query("specialty", trimmed(Some(2), 50, "Specialty must be between 2 and 50 characters")),
		FieldRule::query(
			"minRating",
			vec![
				Step::Check(
					Check::Float {
						min: Some(0.0),
						max: Some(5.0),
					},
					"Minimum rating must be a number between 0 and 5",
				),
				Step::Sanitize(Sanitizer::ToFloat),
			],
		),
	];
	fields.extend(paging());
	RuleSet::new("mentor_list", fields)
});

/// The profile fields shared by create and update. All of them are optional.
fn profile() -> Vec<FieldRule> {
	use Presence::Optional;

	vec![
		FieldRule::body("userId", Optional, vec![Step::Check(Check::Uuid, "User ID must be a valid UUID")]),
		FieldRule::body("name", Optional, trimmed(Some(2), 100, "Name must be between 2 and 100 characters")),
		FieldRule::body(
			"email",
			Optional,
			vec![
				Step::Sanitize(Sanitizer::Trim),
				Step::Check(Check::Email, "Must be a valid email address"),
				Step::Sanitize(Sanitizer::NormalizeEmail),
			],
		),
		FieldRule::body("bio", Optional, trimmed(None, 1000, "Bio must not exceed 1000 characters")),
		FieldRule::body(
			"experience",
			Optional,
			vec![
				Step::Check(
					Check::Int {
						min: Some(0),
						max: Some(100),
					},
					"Experience must be an integer between 0 and 100 years",
				),
				Step::Sanitize(Sanitizer::ToInt),
			],
		),
		FieldRule::body(
			"hourlyRate",
			Optional,
			vec![
				Step::Check(
					Check::Float {
						min: Some(0.0),
						max: Some(10000.0),
					},
					"Hourly rate must be a number between 0 and 10000",
				),
				Step::Sanitize(Sanitizer::ToFloat),
			],
		),
		FieldRule::body(
			"specialties",
			Optional,
			string_list(
				20,
				"Specialties must be an array with at most 20 items",
				Some(2),
				50,
				"Each specialty must be a string",
				"Each specialty must be between 2 and 50 characters",
			),
		),
		FieldRule::body(
			"languages",
			Optional,
			string_list(
				10,
				"Languages must be an array with at most 10 items",
				Some(2),
				50,
				"Each language must be a string",
				"Each language must be between 2 and 50 characters",
			),
		),
		FieldRule::body(
			"certifications",
			Optional,
			string_list(
				50,
				"Certifications must be an array with at most 50 items",
				Some(2),
				200,
				"Each certification must be a string",
				"Each certification must be between 2 and 200 characters",
			),
		),
		FieldRule::body(
			"avatar",
			Optional,
			vec![Step::Check(
				Check::Length { min: None, max: Some(10) },
				"Avatar must be an emoji or short code of at most 10 characters",
			)],
		),
		FieldRule::body(
			"profileImageUrl",
			Optional,
			vec![Step::Check(Check::Url, "Profile image URL must be a valid URL")],
		),
	]
}
