use once_cell::sync::Lazy;

use super::{id_param, paging, string_list, trimmed};
use crate::database::session::SessionStatus;
use crate::validation::rule::{Check, FieldRule, Presence, RuleSet, Sanitizer, Step};
use crate::validation::schedule;

const LEAD_TIME_MESSAGE: &str = "Session must be scheduled at least 6 hours in advance";
const STATUS_MESSAGE: &str = "Status must be one of: scheduled, in-progress, completed, cancelled, upcoming, live";

pub static CREATE: Lazy<RuleSet> = Lazy::new(|| {
	let mut fields = vec![
		FieldRule::body(
			"title",
			Presence::Required,
			trimmed(Some(5), 200, "Title must be between 5 and 200 characters"),
		),
		FieldRule::body("duration", Presence::Required, duration()),
		FieldRule::body(
			"scheduledAt",
			Presence::Required,
			vec![
				iso8601(),
				Step::Check(Check::Custom(schedule::meets_lead_time), LEAD_TIME_MESSAGE),
				Step::Check(Check::Custom(schedule::not_in_past), "Session cannot be scheduled in the past"),
			],
		),
		FieldRule::body(
			"mentorId",
			Presence::Optional,
			vec![Step::Check(Check::Uuid, "Mentor ID must be a valid UUID")],
		),
	];
	fields.extend(details());
	RuleSet::new("session_create", fields)
});

pub static UPDATE: Lazy<RuleSet> = Lazy::new(|| {
	let mut fields = vec![
		id_param(),
		FieldRule::body(
			"title",
			Presence::Optional,
			trimmed(Some(5), 200, "Title must be between 5 and 200 characters"),
		),
		FieldRule::body("duration", Presence::Optional, duration()),
		FieldRule::body(
			"scheduledAt",
			Presence::Optional,
			vec![iso8601(), Step::Check(Check::Custom(schedule::meets_lead_time), LEAD_TIME_MESSAGE)],
		),
	];
	fields.extend(details());
	RuleSet::new("session_update", fields)
});

pub static LIST: Lazy<RuleSet> = Lazy::new(|| {
	let mut fields = vec![
		FieldRule::query("status", vec![status()]),
		FieldRule::query("mentorId", vec![Step::Check(Check::Uuid, "Mentor ID must be a valid UUID")]),
	];
	fields.extend(paging());
	RuleSet::new("session_list", fields)
});

pub static JOIN: Lazy<RuleSet> = Lazy::new(|| {
	RuleSet::new(
		"session_join",
		vec![
			id_param(),
			FieldRule::body(
				"userId",
				Presence::Optional,
				vec![Step::Check(Check::Uuid, "User ID must be a valid UUID")],
			),
		],
	)
});

fn iso8601() -> Step {
	Step::Check(Check::Iso8601, "Scheduled date must be ISO-8601 formatted")
}

fn status() -> Step {
	Step::Check(Check::OneOf(SessionStatus::NAMES), STATUS_MESSAGE)
}

fn duration() -> Vec<Step> {
	vec![
		Step::Check(
			Check::Int {
				min: Some(15),
				max: Some(480),
			},
			"Duration must be an integer between 15 and 480 minutes",
		),
		Step::Sanitize(Sanitizer::ToInt),
	]
}

/// Optional fields shared by create and update.
fn details() -> Vec<FieldRule> {
	use Presence::Optional;

	vec![
		FieldRule::body(
			"description",
			Optional,
			trimmed(None, 1000, "Description must not exceed 1000 characters"),
		),
		FieldRule::body("topic", Optional, trimmed(None, 100, "Topic must not exceed 100 characters")),
		FieldRule::body(
			"maxParticipants",
			Optional,
			vec![
				Step::Check(
					Check::Int {
						min: Some(1),
						max: Some(1000),
					},
					"Max participants must be an integer between 1 and 1000",
				),
				Step::Sanitize(Sanitizer::ToInt),
			],
		),
		FieldRule::body(
			"meetingLink",
			Optional,
			vec![Step::Check(Check::Url, "Meeting link must be a valid URL")],
		),
		FieldRule::body(
			"requirements",
			Optional,
			string_list(
				10,
				"Requirements must be an array with at most 10 items",
				None,
				200,
				"Each requirement must be a string",
				"Each requirement must not exceed 200 characters",
			),
		),
		FieldRule::body(
			"objectives",
			Optional,
			string_list(
				10,
				"Objectives must be an array with at most 10 items",
				None,
				200,
				"Each objective must be a string",
				"Each objective must not exceed 200 characters",
			),
		),
		FieldRule::body("status", Optional, vec![status()]),
	]
}
