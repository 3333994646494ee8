use std::borrow::Cow;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::ValidationContext;

/// How far ahead of now a session has to be booked.
pub fn min_lead_time() -> Duration {
	Duration::hours(6)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
	#[error("timestamp is not ISO-8601 formatted")]
	Unparseable,
	#[error("timestamp is before the earliest bookable time {floor}")]
	TooSoon { floor: DateTime<Utc> },
	#[error("timestamp is in the past")]
	InPast,
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 timestamp. Seconds are optional, the offset may be
/// `Z` or `±HH:MM` with or without the colon. Timestamps without an offset
/// are taken as UTC and a bare date means midnight UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ScheduleError> {
	if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
		return Ok(ts.with_timezone(&Utc));
	}

	let zoned = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
		Some(local) => Cow::Owned(format!("{local}+00:00")),
		None => Cow::Borrowed(s),
	};

	if let Some(ts) = OFFSET_FORMATS
		.iter()
		.find_map(|format| DateTime::parse_from_str(&zoned, format).ok())
	{
		return Ok(ts.with_timezone(&Utc));
	}

	if let Some(naive) = NAIVE_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
	{
		return Ok(Utc.from_utc_datetime(&naive));
	}

	NaiveDate::parse_from_str(s, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|naive| Utc.from_utc_datetime(&naive))
		.ok_or(ScheduleError::Unparseable)
}

/// The earliest instant a session may be scheduled at. Inclusive.
pub fn scheduling_floor(now: DateTime<Utc>) -> DateTime<Utc> {
	now + min_lead_time()
}

pub fn check_lead_time(candidate: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ScheduleError> {
	let floor = scheduling_floor(now);
	if candidate < floor {
		return Err(ScheduleError::TooSoon { floor });
	}

	Ok(())
}

pub fn check_not_past(candidate: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ScheduleError> {
	if candidate < now {
		return Err(ScheduleError::InPast);
	}

	Ok(())
}

fn timestamp_check(value: &Value, check: impl FnOnce(DateTime<Utc>) -> Result<(), ScheduleError>) -> bool {
	value
		.as_str()
		.ok_or(ScheduleError::Unparseable)
		.and_then(parse_timestamp)
		.and_then(check)
		.is_ok()
}

pub fn meets_lead_time(value: &Value, ctx: &ValidationContext) -> bool {
	timestamp_check(value, |candidate| check_lead_time(candidate, ctx.now))
}

pub fn not_in_past(value: &Value, ctx: &ValidationContext) -> bool {
	timestamp_check(value, |candidate| check_not_past(candidate, ctx.now))
}
