// crates.io
use httpmock::prelude::*;
// self
use onsched::{
	Client, ClientConfig, Endpoints, Error,
	error::{AuthenticationError, TransportError},
};

const CLIENT_ID: &str = "onsched-client";
const CLIENT_SECRET: &str = "onsched-secret";
const TOKEN_PATH: &str = "/connect/token";

fn build_client(server: &MockServer) -> Client {
	let endpoints = Endpoints::new(&server.base_url(), &server.url(TOKEN_PATH))
		.expect("Mock endpoints should parse successfully.");
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.endpoints(endpoints)
		.build()
		.expect("Client configuration should validate.");

	Client::new(config).expect("Client should build successfully.")
}

#[tokio::test]
async fn token_is_fetched_once_and_reused() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"cached-token\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let location = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/consumer/v1/locations/loc-1")
				.header("authorization", "Bearer cached-token");
			then.status(200).header("content-type", "application/json").body("{\"id\":\"loc-1\"}");
		})
		.await;
	let client = build_client(&server);
	let first = client.location("loc-1").await.expect("First location call should succeed.");
	let second = client.location("loc-1").await.expect("Second location call should succeed.");

	assert_eq!(first["id"], "loc-1");
	assert_eq!(first, second);

	token.assert_calls_async(1).await;
	location.assert_calls_async(2).await;

	let cached = client.tokens().peek().expect("Token should stay cached.");

	assert_eq!(cached.bearer(), "cached-token");
}

#[tokio::test]
async fn rejected_credentials_surface_status_and_body() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let location = server
		.mock_async(|when, then| {
			when.method(GET).path("/consumer/v1/locations/loc-1");
			then.status(200).body("{}");
		})
		.await;
	let client = build_client(&server);
	let err = client.location("loc-1").await.expect_err("Rejected credentials should fail.");

	match &err {
		Error::Authentication(AuthenticationError::TokenRejected { status, error, body }) => {
			assert_eq!(*status, Some(400));
			assert_eq!(error.as_deref(), Some("invalid_client"));
			assert!(body.contains("invalid_client"));
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	assert_eq!(err.status(), Some(400));

	token.assert_calls_async(1).await;
	location.assert_calls_async(0).await;
}

#[tokio::test]
async fn malformed_token_response_is_an_authentication_error() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body("{\"token_type\":1}");
		})
		.await;
	let client = build_client(&server);
	let err = client.location("loc-1").await.expect_err("Malformed tokens should fail.");

	assert!(matches!(
		err,
		Error::Authentication(AuthenticationError::TokenResponseParse { status: Some(200), .. })
	));

	token.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_token_endpoint_is_reported_as_token_transport() {
	let endpoints = Endpoints::new("http://127.0.0.1:1", "http://127.0.0.1:1/connect/token")
		.expect("Loopback endpoints should parse successfully.");
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.endpoints(endpoints)
		.build()
		.expect("Client configuration should validate.");
	let client = Client::new(config).expect("Client should build successfully.");
	let err = client.locations().await.expect_err("Closed ports should fail.");

	assert!(matches!(
		err,
		Error::Authentication(AuthenticationError::TokenTransport(TransportError::Network { .. }))
	));
}
