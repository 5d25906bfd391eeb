//! Client configuration: credentials, environment endpoints, and tuning knobs.
//!
//! A [`ClientConfig`] is immutable once built. The environment decides which API host and
//! token endpoint the client talks to unless [`Endpoints`] are overridden explicitly, which is
//! how tests point the client at a mock server.

/// Builder API for assembling client configurations.
pub mod builder;
/// Deployment targets and their endpoints.
pub mod environment;

pub use builder::*;
pub use environment::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::Secret};

/// OAuth 2.0 client credentials plus the environment they belong to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
	/// Client identifier issued by OnSched.
	pub client_id: String,
	/// Client secret issued by OnSched; redacted in logs.
	pub client_secret: Secret,
	/// Scope requested with every token.
	pub scope: String,
	/// Deployment target the credentials were issued for.
	#[serde(default)]
	pub environment: Environment,
}

/// Immutable configuration consumed by [`Client`](crate::Client).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Client credentials.
	pub credentials: Credentials,
	/// Resolved API and token endpoints.
	pub endpoints: Endpoints,
	/// Per-request timeout applied to token and API calls.
	pub timeout: StdDuration,
	/// Safety margin subtracted from every token lifetime.
	pub expiry_margin: Duration,
	/// Page size used by list endpoints.
	pub page_size: u32,
}
impl ClientConfig {
	/// Scope OnSched issues to API clients by default.
	pub const DEFAULT_SCOPE: &'static str = "OnSchedAPI";
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);
	/// Default token expiry safety margin.
	pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(30);
	/// Default list page size.
	pub const DEFAULT_PAGE_SIZE: u32 = 100;
	/// Largest page size the API serves.
	pub const MAX_PAGE_SIZE: u32 = 100;

	/// Creates a new builder for the provided credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id, client_secret)
	}

	/// Builds a configuration from deserialized credentials using default tuning.
	pub fn from_credentials(credentials: Credentials) -> Result<Self> {
		let Credentials { client_id, client_secret, scope, environment } = credentials;

		ClientConfigBuilder::new(client_id, client_secret.expose())
			.scope(scope)
			.environment(environment)
			.build()
			.map_err(Error::from)
	}
}
