use hyper::{Method, StatusCode};
use serde_json::json;

use crate::tests::global::TestApi;

#[tokio::test]
async fn test_mentor_lifecycle() {
	let api = TestApi::new();

	let (status, body) = api
		.call(
			Method::POST,
			"/v1/mentors",
			Some(json!({
				"name": "  Grace Hopper ",
				"email": "Grace.Hopper@Example.com",
				"experience": "30",
				"hourlyRate": "120.5",
				"specialties": ["Compilers", "COBOL"],
			})),
		)
		.await;

	assert_eq!(status, StatusCode::CREATED, "{body}");
	assert_eq!(body["success"], true);
	let mentor = &body["data"];
	assert_eq!(mentor["name"], "Grace Hopper");
	assert_eq!(mentor["email"], "grace.hopper@example.com");
	assert_eq!(mentor["experience"], 30);
	assert_eq!(mentor["hourlyRate"], 120.5);
	assert_eq!(mentor["specialties"], json!(["Compilers", "COBOL"]));

	let id = mentor["id"].as_str().expect("mentor has an id").to_owned();

	let (status, body) = api.call(Method::GET, &format!("/v1/mentors/{id}"), None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["id"], id.as_str());

	let (status, body) = api
		.call(
			Method::PUT,
			&format!("/v1/mentors/{id}"),
			Some(json!({ "bio": "Pioneer of machine independent languages" })),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["bio"], "Pioneer of machine independent languages");
	assert_eq!(body["data"]["name"], "Grace Hopper");

	let (status, body) = api.call(Method::DELETE, &format!("/v1/mentors/{id}"), None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "success": true, "message": "Mentor deleted" }));

	let (status, body) = api.call(Method::GET, &format!("/v1/mentors/{id}"), None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "success": false, "message": "Mentor not found" }));
}

#[tokio::test]
async fn test_mentor_validation_envelope() {
	let api = TestApi::new();

	let (status, body) = api
		.call(
			Method::POST,
			"/v1/mentors",
			Some(json!({ "name": "A", "profileImageUrl": "ftp:/broken" })),
		)
		.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({
			"success": false,
			"message": "Invalid data",
			"errors": [
				{ "field": "name", "message": "Name must be between 2 and 100 characters" },
				{ "field": "profileImageUrl", "message": "Profile image URL must be a valid URL" },
			],
		})
	);

	let (_, body) = api.call(Method::GET, "/v1/mentors", None).await;
	assert_eq!(body["pagination"]["total"], 0, "rejected mentors must not be stored");
}

#[tokio::test]
async fn test_mentor_invalid_id() {
	let api = TestApi::new();

	for method in [Method::GET, Method::DELETE, Method::PUT] {
		let (status, body) = api
			.call(method.clone(), "/v1/mentors/not-a-uuid", Some(json!({ "name": "x" })))
			.await;

		assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
		assert_eq!(
			body["errors"],
			json!([{ "field": "id", "message": "Invalid ID format, expected a UUID" }]),
			"{method}"
		);
	}
}

#[tokio::test]
async fn test_mentor_listing() {
	let api = TestApi::new();

	let mentors = [("Alan Turing", "Cryptography"), ("Barbara Liskov", "Abstraction"), ("Alan Kay", "Smalltalk")];
	for (name, specialty) in mentors {
		let (status, _) = api
			.call(
				Method::POST,
				"/v1/mentors",
				Some(json!({ "name": name, "specialties": [specialty] })),
			)
			.await;
		assert_eq!(status, StatusCode::CREATED);
	}

	let (status, body) = api.call(Method::GET, "/v1/mentors", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["pagination"], json!({ "total": 3, "limit": 20, "offset": 0 }));

	let (_, body) = api.call(Method::GET, "/v1/mentors?search=alan&limit=1", None).await;
	assert_eq!(body["pagination"], json!({ "total": 2, "limit": 1, "offset": 0 }));
	assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

	let (_, body) = api.call(Method::GET, "/v1/mentors?specialty=smalltalk", None).await;
	assert_eq!(body["pagination"]["total"], 1);
	assert_eq!(body["data"][0]["name"], "Alan Kay");

	let (_, body) = api.call(Method::GET, "/v1/mentors?minRating=4", None).await;
	assert_eq!(body["pagination"]["total"], 0);

	let (status, body) = api.call(Method::GET, "/v1/mentors?limit=500", None).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["errors"][0]["field"], "limit");
}

#[tokio::test]
async fn test_malformed_json() {
	let api = TestApi::new();

	let (status, body) = api.raw(Method::POST, "/v1/mentors", "{\"name\": ").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({ "success": false, "message": "Request body must be valid JSON" })
	);
}
