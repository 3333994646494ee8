use serde_json::{Number, Value};

use super::check::{as_float, as_int};
use super::rule::Sanitizer;

impl Sanitizer {
	pub fn apply(&self, value: &mut Value) {
		match self {
			Sanitizer::Trim => {
				if let Value::String(s) = value {
					let trimmed = s.trim();
					if trimmed.len() != s.len() {
						*s = trimmed.to_owned();
					}
				}
			}
			Sanitizer::NormalizeEmail => {
				if let Value::String(s) = value {
					*s = normalize_email(s);
				}
			}
			Sanitizer::ToInt => {
				if let Some(n) = as_int(value) {
					*value = Value::Number(n.into());
				}
			}
			Sanitizer::ToFloat => {
				if let Some(n) = as_float(value).and_then(Number::from_f64) {
					*value = Value::Number(n);
				}
			}
		}
	}
}

/// Canonicalizes an email address so that aliases of one mailbox compare
/// equal.
///
/// The address is lowercased. Providers that ignore sub-addressing have the
/// tag removed (`+tag`, or `-tag` for Yahoo), and Gmail additionally ignores
/// dots in the local part and treats `googlemail.com` as `gmail.com`.
pub fn normalize_email(email: &str) -> String {
	let email = email.to_lowercase();
	let Some((local, domain)) = email.rsplit_once('@') else {
		return email;
	};

	let (local, domain) = match domain {
		"gmail.com" | "googlemail.com" => (strip_tag(local, '+').replace('.', ""), "gmail.com"),
		"outlook.com" | "hotmail.com" | "live.com" | "icloud.com" | "me.com" | "mac.com" => {
			(strip_tag(local, '+').to_owned(), domain)
		}
		"yahoo.com" | "ymail.com" => (strip_tag(local, '-').to_owned(), domain),
		_ => (local.to_owned(), domain),
	};

	if local.is_empty() {
		return email;
	}

	format!("{local}@{domain}")
}

fn strip_tag(local: &str, separator: char) -> &str {
	local.split_once(separator).map_or(local, |(mailbox, _)| mailbox)
}
