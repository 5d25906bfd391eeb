//! Lists the services of a location against a mocked OnSched deployment, reusing one cached
//! client-credentials token across paged calls.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use onsched::{Client, ClientConfig, Endpoints, endpoints::ServicesQuery};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/connect/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let first_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/consumer/v1/services").query_param("offset", "0");
			then.status(200).header("content-type", "application/json").body(
				"{\"object\":\"list\",\"count\":1,\"total\":2,\"hasMore\":true,\"data\":[{\"id\":\"1\",\"name\":\"Haircut\"}]}",
			);
		})
		.await;
	let second_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/consumer/v1/services").query_param("offset", "1");
			then.status(200).header("content-type", "application/json").body(
				"{\"object\":\"list\",\"count\":1,\"total\":2,\"hasMore\":false,\"data\":[{\"id\":\"2\",\"name\":\"Shave\"}]}",
			);
		})
		.await;
	let config = ClientConfig::builder("demo-client", "super-secret")
		.endpoints(Endpoints::new(&server.base_url(), &server.url("/connect/token"))?)
		.page_size(1)
		.build()?;
	let client = Client::new(config)?;
	let query = ServicesQuery { location_id: Some("demo-location".into()), ..Default::default() };
	let services = client.services(&query).await?;

	println!("Fetched {} services.", services["count"]);

	for service in services["data"].as_array().into_iter().flatten() {
		println!("- {}: {}.", service["id"], service["name"]);
	}

	token_mock.assert_async().await;
	first_page.assert_async().await;
	second_page.assert_async().await;

	Ok(())
}
