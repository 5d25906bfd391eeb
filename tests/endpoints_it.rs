// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use onsched::{
	Client, ClientConfig, Endpoints,
	auth::{IssuedToken, SystemClock, TokenFuture, TokenSource},
	endpoints::{
		AppointmentStatus, AppointmentsQuery, AvailabilityQuery, BookingDetails, BookingField,
		NewAppointment, NewServiceAllocation, ResourceFields, ServicesQuery,
	},
	time::{Duration, macros},
};

struct FixedSource;
impl TokenSource for FixedSource {
	fn fetch_token(&self) -> TokenFuture<'_> {
		Box::pin(async { Ok(IssuedToken::new("fixed-token", Some(Duration::hours(1)))) })
	}
}

fn build_client(server: &MockServer, page_size: u32) -> Client {
	let endpoints = Endpoints::new(&server.base_url(), &server.url("/connect/token"))
		.expect("Mock endpoints should parse successfully.");
	let config = ClientConfig::builder("client", "secret")
		.endpoints(endpoints)
		.page_size(page_size)
		.build()
		.expect("Client configuration should validate.");

	Client::with_token_source(config, Arc::new(FixedSource), Arc::new(SystemClock))
		.expect("Client should build successfully.")
}

#[tokio::test]
async fn availability_substitutes_path_and_filters() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/consumer/v1/availability/5/2023-01-01/2023-01-02")
				.query_param("startTime", "800")
				.query_param("resourceIds", "r1,r2")
				.query_param("firstDayAvailable", "true")
				.header("authorization", "Bearer fixed-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"serviceId\":\"5\",\"availableTimes\":[]}");
		})
		.await;
	let client = build_client(&server, 100);
	let query = AvailabilityQuery {
		start_time: Some(800),
		resource_ids: vec!["r1".into(), "r2".into()],
		first_day_available: true,
		..Default::default()
	};
	let availability = client
		.availability("5", macros::date!(2023 - 01 - 01), macros::date!(2023 - 01 - 02), &query)
		.await
		.expect("Availability call should succeed.");

	assert_eq!(availability["serviceId"], "5");

	mock.assert_async().await;
}

#[tokio::test]
async fn list_endpoints_concatenate_pages() {
	let server = MockServer::start_async().await;
	let first = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/consumer/v1/services")
				.query_param("locationId", "loc-1")
				.query_param("defaultService", "true")
				.query_param("limit", "2")
				.query_param("offset", "0");
			then.status(200).header("content-type", "application/json").body(
				"{\"object\":\"list\",\"count\":2,\"total\":3,\"hasMore\":true,\"data\":[{\"id\":\"s1\"},{\"id\":\"s2\"}]}",
			);
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/consumer/v1/services")
				.query_param("locationId", "loc-1")
				.query_param("limit", "2")
				.query_param("offset", "2");
			then.status(200).header("content-type", "application/json").body(
				"{\"object\":\"list\",\"count\":1,\"total\":3,\"hasMore\":false,\"data\":[{\"id\":\"s3\"}]}",
			);
		})
		.await;
	let client = build_client(&server, 2);
	let query = ServicesQuery {
		location_id: Some("loc-1".into()),
		default_service: true,
		..Default::default()
	};
	let services = client.services(&query).await.expect("Paged call should succeed.");

	assert_eq!(
		services,
		json!({
			"object": "list",
			"count": 3,
			"total": 3,
			"hasMore": false,
			"data": [{ "id": "s1" }, { "id": "s2" }, { "id": "s3" }]
		})
	);

	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_pages_stop_the_walk() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/consumer/v1/locations").query_param("offset", "0");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"count\":0,\"total\":0,\"hasMore\":true,\"data\":[]}");
		})
		.await;
	let client = build_client(&server, 100);
	let locations = client.locations().await.expect("Locations call should succeed.");

	assert_eq!(locations["data"], json!([]));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn appointment_filters_are_sent_as_query_parameters() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/consumer/v1/appointments")
				.query_param("status", "BK")
				.query_param("startDate", "2023-01-01")
				.query_param("email", "jane+doe@example.com")
				.query_param("limit", "100")
				.query_param("offset", "0");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"count\":0,\"total\":0,\"hasMore\":false,\"data\":[]}");
		})
		.await;
	let client = build_client(&server, 100);
	let query = AppointmentsQuery {
		email: Some("jane+doe@example.com".into()),
		status: Some(AppointmentStatus::Booked),
		start_date: Some(macros::date!(2023 - 01 - 01).into()),
		..Default::default()
	};

	client.appointments(&query).await.expect("Appointments call should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn create_appointment_posts_a_json_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/consumer/v1/appointments")
				.header("content-type", "application/json")
				.json_body(json!({
					"serviceId": "42",
					"startDateTime": "2023-01-02T09:00:00Z",
					"endDateTime": "2023-01-02T10:00:00Z",
					"resourceId": "7",
					"locationId": "loc-1"
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"appt-1\",\"status\":\"IN\"}");
		})
		.await;
	let client = build_client(&server, 100);
	let appointment = NewAppointment::new(
		"42",
		macros::datetime!(2023-01-02 09:00 UTC),
		macros::datetime!(2023-01-02 10:00 UTC),
	)
	.resource_id("7")
	.location_id("loc-1");
	let created =
		client.create_appointment(&appointment).await.expect("Create call should succeed.");

	assert_eq!(created["status"], "IN");

	mock.assert_async().await;
}

#[tokio::test]
async fn booking_and_cancellation_use_put() {
	let server = MockServer::start_async().await;
	let book = server
		.mock_async(|when, then| {
			when.method(PUT).path("/consumer/v1/appointments/appt-1/book").json_body(json!({
				"email": "jane@example.com",
				"name": "Jane Doe",
				"appointmentBookingFields": [{ "name": "notes", "value": "window seat" }]
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"appt-1\",\"status\":\"BK\"}");
		})
		.await;
	let cancel = server
		.mock_async(|when, then| {
			when.method(PUT).path("/consumer/v1/appointments/appt-1/cancel").json_body(json!({}));
			then.status(200).body("");
		})
		.await;
	let client = build_client(&server, 100);
	let details = BookingDetails {
		email: Some("jane@example.com".into()),
		name: Some("Jane Doe".into()),
		appointment_booking_fields: vec![BookingField::new("notes", "window seat")],
		..Default::default()
	};
	let booked =
		client.book_appointment("appt-1", &details).await.expect("Booking should succeed.");
	let cancelled = client.cancel_appointment("appt-1").await.expect("Cancel should succeed.");

	assert_eq!(booked["status"], "BK");
	assert_eq!(cancelled, json!({}));

	book.assert_async().await;
	cancel.assert_async().await;
}

#[tokio::test]
async fn resource_and_allocation_setup_calls() {
	let server = MockServer::start_async().await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/setup/v1/resources").json_body(json!({ "name": "Room A" }));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"res-1\",\"name\":\"Room A\"}");
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/setup/v1/resources/res-1")
				.json_body(json!({ "email": "room-a@example.com" }));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"res-1\",\"email\":\"room-a@example.com\"}");
		})
		.await;
	let allocate = server
		.mock_async(|when, then| {
			when.method(POST).path("/setup/v1/services/svc-1/allocations").json_body(json!({
				"startDate": "2023-03-01",
				"endDate": "2023-03-01",
				"allDay": true
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"alloc-1\"}");
		})
		.await;
	let client = build_client(&server, 100);
	let created = client
		.create_resource(&ResourceFields::named("Room A"))
		.await
		.expect("Create resource should succeed.");
	let updated = client
		.update_resource("res-1", &ResourceFields {
			email: Some("room-a@example.com".into()),
			..Default::default()
		})
		.await
		.expect("Update resource should succeed.");
	let mut allocation =
		NewServiceAllocation::new(macros::date!(2023 - 03 - 01), macros::date!(2023 - 03 - 01));

	allocation.all_day = true;

	let allocated = client
		.create_service_allocation("svc-1", &allocation)
		.await
		.expect("Create allocation should succeed.");

	assert_eq!(created["id"], "res-1");
	assert_eq!(updated["email"], "room-a@example.com");
	assert_eq!(allocated["id"], "alloc-1");

	create.assert_async().await;
	update.assert_async().await;
	allocate.assert_async().await;
}

#[tokio::test]
async fn invalid_arguments_fail_before_any_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|_, then| {
			then.status(200).body("{}");
		})
		.await;
	let client = build_client(&server, 100);

	assert!(matches!(
		client.create_resource(&ResourceFields::default()).await,
		Err(onsched::Error::Config(_))
	));
	assert!(matches!(client.location("a/b").await, Err(onsched::Error::Config(_))));
	assert!(matches!(client.delete_resource(".").await, Err(onsched::Error::Config(_))));
	assert!(matches!(client.delete_resource("..").await, Err(onsched::Error::Config(_))));
	assert!(matches!(client.delete_service("..").await, Err(onsched::Error::Config(_))));
	assert!(matches!(
		client
			.availability("5", "2023-01-01", "2023-01-02", &AvailabilityQuery {
				end_time: Some(2500),
				..Default::default()
			})
			.await,
		Err(onsched::Error::Config(_))
	));

	mock.assert_calls_async(0).await;
}
