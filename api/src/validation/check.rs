use serde_json::Value;
use url::{Host, Url};

use super::rule::Check;
use super::{schedule, ValidationContext};

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

impl Check {
	pub fn holds(&self, value: &Value, ctx: &ValidationContext) -> bool {
		match *self {
			Check::IsString => value.is_string(),
			Check::Length { min, max } => value.as_str().map(char_length).is_some_and(|len| within(len, min, max)),
			Check::Int { min, max } => as_int(value).is_some_and(|n| within(n, min, max)),
			Check::Float { min, max } => as_float(value).is_some_and(|n| within(n, min, max)),
			Check::Email => value.as_str().is_some_and(is_email),
			Check::Uuid => value.as_str().is_some_and(is_uuid),
			Check::Url => value.as_str().is_some_and(is_url),
			Check::Iso8601 => value.as_str().is_some_and(|s| schedule::parse_timestamp(s).is_ok()),
			Check::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.iter().any(|candidate| *candidate == s)),
			Check::Array { max } => value.as_array().is_some_and(|items| items.len() <= max),
			Check::Custom(predicate) => predicate(value, ctx),
		}
	}
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
	min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Counts characters, ignoring the variation selectors that force text or
/// emoji presentation.
pub fn char_length(s: &str) -> usize {
	s.chars().filter(|c| !matches!(c, '\u{FE0E}' | '\u{FE0F}')).count()
}

/// Reads an integer from a JSON number without a fractional part or from a
/// string of optionally signed ASCII digits.
pub fn as_int(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64().or_else(|| {
			n.as_f64()
				.filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
				.map(|f| f as i64)
		}),
		Value::String(s) => {
			let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
			if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
				return None;
			}

			s.parse().ok()
		}
		_ => None,
	}
}

/// Reads a finite float from a JSON number or a decimal string.
pub fn as_float(value: &Value) -> Option<f64> {
	let parsed = match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => {
			let decimal = s.bytes().any(|b| b.is_ascii_digit())
				&& s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));

			decimal.then(|| s.parse::<f64>().ok()).flatten()
		}
		_ => None,
	};

	parsed.filter(|f| f.is_finite())
}

/// Hyphenated 8-4-4-4-12 hex, any version.
pub fn is_uuid(s: &str) -> bool {
	s.len() == 36 && uuid::Uuid::try_parse(s).is_ok()
}

/// An absolute http, https or ftp URL whose host is an IP address or a
/// dotted domain ending in an alphabetic top level label.
pub fn is_url(s: &str) -> bool {
	let Ok(url) = Url::parse(s) else {
		return false;
	};

	if !URL_SCHEMES.contains(&url.scheme()) {
		return false;
	}

	match url.host() {
		Some(Host::Domain(domain)) => is_dotted_domain(domain),
		Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
		None => false,
	}
}

/// A syntactically valid address whose domain is dotted and ends in an
/// alphabetic top level label. Address literals and bare hosts such as
/// `localhost` are rejected.
pub fn is_email(s: &str) -> bool {
	email_address::EmailAddress::is_valid(s) && s.rsplit_once('@').is_some_and(|(_, domain)| is_dotted_domain(domain))
}

fn is_dotted_domain(domain: &str) -> bool {
	let mut labels = domain.trim_end_matches('.').split('.');
	let tld = labels.next_back().unwrap_or_default();

	domain.contains('.')
		&& labels.all(|label| !label.is_empty())
		&& tld.len() >= 2
		&& tld.chars().all(|c| c.is_alphabetic())
}
