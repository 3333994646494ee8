use std::time::Duration;

use serde_json::{json, Value};
use serial_test::serial;

use crate::api;
use crate::config::{ApiConfig, AppConfig};
use crate::tests::global::mock_global_state;

#[serial]
#[tokio::test]
async fn test_serial_api_end_to_end() {
	let port = portpicker::pick_unused_port().expect("failed to pick port");
	let (global, ctx) = mock_global_state(AppConfig {
		api: ApiConfig {
			bind_address: format!("127.0.0.1:{port}").parse().unwrap(),
			max_body_size: 1024,
		},
		..Default::default()
	});

	let handle = tokio::spawn(api::run(global.clone()));

	// We need to wait for the server to start
	tokio::time::sleep(Duration::from_millis(300)).await;

	let client = reqwest::Client::new();
	let base = format!("http://127.0.0.1:{port}/v1");

	let resp = client
		.get(format!("{base}/health"))
		.send()
		.await
		.expect("failed to get health");
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body, json!({ "status": "ok" }));

	let resp = client
		.post(format!("{base}/sessions"))
		.json(&json!({ "title": "Hi", "duration": 1000, "scheduledAt": "yesterday" }))
		.send()
		.await
		.expect("failed to create session");
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body["success"], false);
	assert_eq!(body["message"], "Invalid data");
	assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));

	let resp = client
		.post(format!("{base}/mentors"))
		.body(format!("{{\"bio\": \"{}\"}}", "a".repeat(2048)))
		.send()
		.await
		.expect("failed to post large body");
	assert_eq!(resp.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body, json!({ "success": false, "message": "Request body too large" }));

	// The client uses Keep-Alive, so we need to drop it before shutting down
	drop(client);

	ctx.cancel();
	tokio::time::timeout(Duration::from_secs(1), handle)
		.await
		.expect("failed to cancel api")
		.expect("api panicked")
		.expect("api failed");
}
