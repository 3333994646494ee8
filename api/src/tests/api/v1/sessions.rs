use chrono::Duration;
use hyper::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::tests::global::{test_now, TestApi};
use crate::validation::schedule::parse_timestamp;

fn scheduled_in(offset: Duration) -> String {
	(test_now() + offset).to_rfc3339()
}

async fn create_session(api: &TestApi, extra: Value) -> Value {
	let mut payload = json!({
		"title": "Ownership and borrowing",
		"duration": 90,
		"scheduledAt": scheduled_in(Duration::days(2)),
	});

	if let (Some(payload), Some(extra)) = (payload.as_object_mut(), extra.as_object()) {
		payload.extend(extra.clone());
	}

	let (status, body) = api.call(Method::POST, "/v1/sessions", Some(payload)).await;
	assert_eq!(status, StatusCode::CREATED, "{body}");
	body["data"].clone()
}

#[tokio::test]
async fn test_session_lifecycle() {
	let api = TestApi::new();

	let session = create_session(&api, json!({ "topic": " Rust ", "meetingLink": "https://meet.example.com/rust" })).await;
	assert_eq!(session["status"], "scheduled");
	assert_eq!(session["topic"], "Rust");
	assert_eq!(session["maxParticipants"], 10);
	assert_eq!(session["participants"], json!([]));

	let id = session["id"].as_str().unwrap().to_owned();

	let (status, body) = api
		.call(
			Method::PUT,
			&format!("/v1/sessions/{id}"),
			Some(json!({ "status": "live", "duration": "120" })),
		)
		.await;
	assert_eq!(status, StatusCode::OK, "{body}");
	assert_eq!(body["data"]["status"], "live");
	assert_eq!(body["data"]["duration"], 120);
	assert_eq!(body["data"]["title"], "Ownership and borrowing");

	let (status, body) = api
		.call(
			Method::PUT,
			&format!("/v1/sessions/{id}"),
			Some(json!({ "scheduledAt": scheduled_in(Duration::hours(5)) })),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body["errors"],
		json!([{ "field": "scheduledAt", "message": "Session must be scheduled at least 6 hours in advance" }])
	);

	let (status, _) = api.call(Method::DELETE, &format!("/v1/sessions/{id}"), None).await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = api
		.call(Method::PUT, &format!("/v1/sessions/{id}"), Some(json!({})))
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["message"], "Session not found");
}

#[tokio::test]
async fn test_session_create_lead_time() {
	let api = TestApi::new();

	let payload = |offset: Duration| {
		json!({
			"title": "Async Rust",
			"duration": 60,
			"scheduledAt": scheduled_in(offset),
		})
	};

	let (status, body) = api
		.call(
			Method::POST,
			"/v1/sessions",
			Some(payload(Duration::hours(6) - Duration::seconds(1))),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["message"], "Invalid data");
	assert_eq!(body["errors"][0]["field"], "scheduledAt");

	let (status, body) = api.call(Method::POST, "/v1/sessions", Some(payload(Duration::hours(6)))).await;
	assert_eq!(status, StatusCode::CREATED, "{body}");
	assert_eq!(body["data"]["scheduledAt"], json!(test_now() + Duration::hours(6)));
}

#[tokio::test]
async fn test_session_create_two_errors() {
	let api = TestApi::new();

	let (status, body) = api
		.call(
			Method::POST,
			"/v1/sessions",
			Some(json!({
				"title": "Hi",
				"duration": 5,
				"scheduledAt": scheduled_in(Duration::days(1)),
			})),
		)
		.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_session_create_unknown_mentor() {
	let api = TestApi::new();

	let (status, body) = api
		.call(
			Method::POST,
			"/v1/sessions",
			Some(json!({
				"title": "Unknown mentor",
				"duration": 30,
				"scheduledAt": scheduled_in(Duration::days(1)),
				"mentorId": Uuid::new_v4(),
			})),
		)
		.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["message"], "Mentor not found");
}

#[tokio::test]
async fn test_session_listing() {
	let api = TestApi::new();

	let (_, mentor) = api
		.call(Method::POST, "/v1/mentors", Some(json!({ "name": "Niko" })))
		.await;
	let mentor_id = mentor["data"]["id"].as_str().unwrap().to_owned();

	create_session(&api, json!({ "mentorId": mentor_id })).await;
	create_session(&api, json!({ "status": "upcoming" })).await;
	create_session(&api, json!({ "status": "upcoming", "mentorId": mentor_id })).await;

	let (status, body) = api.call(Method::GET, "/v1/sessions", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["pagination"]["total"], 3);

	let (_, body) = api.call(Method::GET, "/v1/sessions?status=upcoming", None).await;
	assert_eq!(body["pagination"]["total"], 2);

	let (_, body) = api
		.call(Method::GET, &format!("/v1/sessions?status=upcoming&mentorId={mentor_id}"), None)
		.await;
	assert_eq!(body["pagination"]["total"], 1);

	let (_, body) = api.call(Method::GET, "/v1/sessions?offset=2", None).await;
	assert_eq!(body["pagination"], json!({ "total": 3, "limit": 20, "offset": 2 }));
	assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

	let (status, body) = api.call(Method::GET, "/v1/sessions?status=archived", None).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["errors"][0]["field"], "status");
}

#[tokio::test]
async fn test_session_join() {
	let api = TestApi::new();

	let session = create_session(&api, json!({ "maxParticipants": 1 })).await;
	let join = format!("/v1/sessions/{}/join", session["id"].as_str().unwrap());

	let (status, body) = api.call(Method::POST, &join, None).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["message"], "A user ID is required to join a session");

	let first = Uuid::new_v4();
	let (status, body) = api.call(Method::POST, &join, Some(json!({ "userId": first }))).await;
	assert_eq!(status, StatusCode::OK, "{body}");
	assert_eq!(body["data"]["participants"], json!([first]));

	// Joining again is accepted without adding a second entry.
	let (status, body) = api.call(Method::POST, &join, Some(json!({ "userId": first }))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["participants"], json!([first]));

	let (status, body) = api
		.call(Method::POST, &join, Some(json!({ "userId": Uuid::new_v4() })))
		.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["message"], "Session is full");

	let cancelled = create_session(&api, json!({ "status": "cancelled" })).await;
	let (status, body) = api
		.call(
			Method::POST,
			&format!("/v1/sessions/{}/join", cancelled["id"].as_str().unwrap()),
			Some(json!({ "userId": Uuid::new_v4() })),
		)
		.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["message"], "Session is cancelled and cannot be joined");

	let (status, body) = api
		.call(
			Method::POST,
			&format!("/v1/sessions/{}/join", Uuid::new_v4()),
			Some(json!({ "userId": first })),
		)
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["message"], "Session not found");

	let (status, body) = api
		.call(Method::POST, "/v1/sessions/nope/join", Some(json!({ "userId": first })))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["errors"][0]["field"], "id");
}

#[tokio::test]
async fn test_bad_id_is_reported_before_the_body() {
	let api = TestApi::new();

	let (status, body) = api.raw(Method::PUT, "/v1/sessions/not-a-uuid", "{oops").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["message"], "Invalid data");
	assert_eq!(
		body["errors"],
		json!([{ "field": "id", "message": "Invalid ID format, expected a UUID" }])
	);

	let (status, body) = api.raw(Method::PUT, &format!("/v1/sessions/{}", Uuid::new_v4()), "{oops").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "success": false, "message": "Request body must be valid JSON" }));
}

#[tokio::test]
async fn test_session_create_accepts_zoned_minutes() {
	let api = TestApi::new();

	let expected = test_now() + Duration::hours(30);

	for scheduled_at in ["2030-01-02T06:00Z", "2030-01-02T11:30+0530", "2030-01-02T06:00:00+0000"] {
		let session = create_session(&api, json!({ "scheduledAt": scheduled_at })).await;
		let stored = session["scheduledAt"].as_str().expect("scheduledAt should be a string");
		assert_eq!(parse_timestamp(stored), Ok(expected), "{scheduled_at}");
	}
}
