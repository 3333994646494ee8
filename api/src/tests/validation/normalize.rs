use serde_json::{json, Value};

use crate::validation::normalize::normalize_email;
use crate::validation::rule::Sanitizer;

#[test]
fn test_normalize_email() {
	assert_eq!(normalize_email("Jane.Doe+mentoring@GoogleMail.com"), "janedoe@gmail.com");
	assert_eq!(normalize_email("j.doe@gmail.com"), "jdoe@gmail.com");
	assert_eq!(normalize_email("Jane+work@Outlook.com"), "jane@outlook.com");
	assert_eq!(normalize_email("jane+x@icloud.com"), "jane@icloud.com");
	assert_eq!(normalize_email("jane-news@yahoo.com"), "jane@yahoo.com");
	assert_eq!(normalize_email("Jane.Doe+tag@Example.com"), "jane.doe+tag@example.com");
	assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
}

#[test]
fn test_sanitizers() {
	let mut value = json!("  padded  ");
	Sanitizer::Trim.apply(&mut value);
	assert_eq!(value, json!("padded"));

	let mut value = json!(["not", "a", "string"]);
	Sanitizer::Trim.apply(&mut value);
	assert_eq!(value, json!(["not", "a", "string"]));

	let mut value = json!("42");
	Sanitizer::ToInt.apply(&mut value);
	assert_eq!(value, json!(42));

	let mut value = json!("4.5");
	Sanitizer::ToFloat.apply(&mut value);
	assert_eq!(value, json!(4.5));

	let mut value = json!("nope");
	Sanitizer::ToFloat.apply(&mut value);
	assert_eq!(value, Value::String("nope".to_string()));

	let mut value = json!("USER@Example.com");
	Sanitizer::NormalizeEmail.apply(&mut value);
	assert_eq!(value, json!("user@example.com"));
}
