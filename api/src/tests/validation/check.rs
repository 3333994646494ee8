use serde_json::json;

use super::ctx;
use crate::validation::check::{as_float, as_int, char_length, is_url, is_uuid};
use crate::validation::rule::Check;
use crate::validation::RequestPayload;

#[test]
fn test_char_length_ignores_presentation_selectors() {
	assert_eq!(char_length("abc"), 3);
	assert_eq!(char_length("\u{2764}\u{FE0F}"), 1);
	assert_eq!(char_length("日本語"), 3);
}

#[test]
fn test_length_check() {
	let check = Check::Length {
		min: Some(2),
		max: Some(4),
	};

	assert!(check.holds(&json!("ab"), &ctx()));
	assert!(check.holds(&json!("abcd"), &ctx()));
	assert!(!check.holds(&json!("a"), &ctx()));
	assert!(!check.holds(&json!("abcde"), &ctx()));
	assert!(!check.holds(&json!(12), &ctx()));
	assert!(!check.holds(&json!(null), &ctx()));
}

#[test]
fn test_int_parsing() {
	assert_eq!(as_int(&json!(42)), Some(42));
	assert_eq!(as_int(&json!(42.0)), Some(42));
	assert_eq!(as_int(&json!("42")), Some(42));
	assert_eq!(as_int(&json!("+42")), Some(42));
	assert_eq!(as_int(&json!("-7")), Some(-7));
	assert_eq!(as_int(&json!(42.5)), None);
	assert_eq!(as_int(&json!("4.2")), None);
	assert_eq!(as_int(&json!("")), None);
	assert_eq!(as_int(&json!("-")), None);
	assert_eq!(as_int(&json!(" 1")), None);
	assert_eq!(as_int(&json!(true)), None);

	let check = Check::Int {
		min: Some(15),
		max: Some(480),
	};
	assert!(check.holds(&json!(15), &ctx()));
	assert!(check.holds(&json!("480"), &ctx()));
	assert!(!check.holds(&json!(14), &ctx()));
	assert!(!check.holds(&json!(481), &ctx()));
}

#[test]
fn test_float_parsing() {
	assert_eq!(as_float(&json!(4.5)), Some(4.5));
	assert_eq!(as_float(&json!(3)), Some(3.0));
	assert_eq!(as_float(&json!("4.5")), Some(4.5));
	assert_eq!(as_float(&json!(".5")), Some(0.5));
	assert_eq!(as_float(&json!("1e3")), Some(1000.0));
	assert_eq!(as_float(&json!("inf")), None);
	assert_eq!(as_float(&json!("NaN")), None);
	assert_eq!(as_float(&json!("abc")), None);
	assert_eq!(as_float(&json!("")), None);

	let check = Check::Float {
		min: Some(0.0),
		max: Some(5.0),
	};
	assert!(check.holds(&json!("0"), &ctx()));
	assert!(check.holds(&json!(5), &ctx()));
	assert!(!check.holds(&json!(5.01), &ctx()));
	assert!(!check.holds(&json!(-0.1), &ctx()));
}

#[test]
fn test_uuid() {
	assert!(is_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8"));
	assert!(is_uuid("67E55044-10B1-426F-9247-BB680E5FE0C8"));
	assert!(is_uuid("00000000-0000-0000-0000-000000000000"));
	assert!(!is_uuid("67e5504410b1426f9247bb680e5fe0c8"));
	assert!(!is_uuid("{67e55044-10b1-426f-9247-bb680e5fe0c8}"));
	assert!(!is_uuid("67e55044-10b1-426f-9247-bb680e5fe0cz"));
	assert!(!is_uuid("not-a-uuid"));
}

#[test]
fn test_url() {
	assert!(is_url("https://example.com"));
	assert!(is_url("http://meet.example.org/room?id=1"));
	assert!(is_url("ftp://files.example.com/a.txt"));
	assert!(is_url("https://127.0.0.1:8080/path"));
	assert!(!is_url("mailto:someone@example.com"));
	assert!(!is_url("javascript:alert(1)"));
	assert!(!is_url("https://localhost"));
	assert!(!is_url("https://example.c0m"));
	assert!(!is_url("example.com"));
	assert!(!is_url(""));
}

#[test]
fn test_email_and_enum() {
	assert!(Check::Email.holds(&json!("jane@example.com"), &ctx()));
	assert!(!Check::Email.holds(&json!("jane.example.com"), &ctx()));
	assert!(!Check::Email.holds(&json!(1), &ctx()));
	assert!(Check::Email.holds(&json!("jane@mail.example.co.uk"), &ctx()));
	assert!(!Check::Email.holds(&json!("jane@localhost"), &ctx()));
	assert!(!Check::Email.holds(&json!("jane@[127.0.0.1]"), &ctx()));
	assert!(!Check::Email.holds(&json!("jane@example.c0m"), &ctx()));

	let check = Check::OneOf(&["a", "b"]);
	assert!(check.holds(&json!("a"), &ctx()));
	assert!(!check.holds(&json!("c"), &ctx()));
	assert!(!check.holds(&json!(["a"]), &ctx()));
}

#[test]
fn test_array_check() {
	let check = Check::Array { max: 2 };
	assert!(check.holds(&json!([]), &ctx()));
	assert!(check.holds(&json!(["a", "b"]), &ctx()));
	assert!(!check.holds(&json!(["a", "b", "c"]), &ctx()));
	assert!(!check.holds(&json!("a"), &ctx()));
}

#[test]
fn test_payload_parts() {
	let payload = RequestPayload::new([("id", "abc")], Some("limit=5&tag=a&tag=b&tag=c&q=hello%20world"));

	assert_eq!(payload.params, json!({ "id": "abc" }).as_object().cloned().unwrap());
	assert_eq!(
		serde_json::Value::Object(payload.query),
		json!({ "limit": "5", "tag": ["a", "b", "c"], "q": "hello world" })
	);
	assert_eq!(payload.body, json!({}));

	let mut payload = RequestPayload::new(Vec::<(&str, &str)>::new(), None);
	payload.read_body(b" [1, 2] ").expect("failed to parse body");
	assert_eq!(payload.body, json!([1, 2]));

	payload.read_body(b"  ").expect("failed to parse body");
	assert_eq!(payload.body, json!({}));

	assert!(payload.read_body(b"{not json").is_err());
}
