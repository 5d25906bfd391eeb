// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{ClientConfig, Credentials, Endpoints, Environment, environment},
	error::ConfigError,
};

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// OAuth 2.0 client identifier issued by OnSched.
	pub client_id: String,
	/// OAuth 2.0 client secret issued by OnSched.
	pub client_secret: Secret,
	/// Scope requested with every token.
	pub scope: String,
	/// Deployment target.
	pub environment: Environment,
	/// Optional endpoint override; defaults to the environment's endpoints.
	pub endpoints: Option<Endpoints>,
	/// Per-request timeout applied to token and API calls.
	pub timeout: StdDuration,
	/// Safety margin subtracted from every token lifetime.
	pub expiry_margin: Duration,
	/// Page size used by list endpoints.
	pub page_size: u32,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the client credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			scope: ClientConfig::DEFAULT_SCOPE.into(),
			environment: Environment::default(),
			endpoints: None,
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			expiry_margin: ClientConfig::DEFAULT_EXPIRY_MARGIN,
			page_size: ClientConfig::DEFAULT_PAGE_SIZE,
		}
	}

	/// Overrides the requested scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Selects the deployment target.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Points the client at custom endpoints instead of the environment defaults.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Overrides the per-request timeout (defaults to 30 seconds).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the token expiry safety margin (defaults to 30 seconds).
	pub fn expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Overrides the list page size (defaults to 100).
	pub fn page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let endpoints = match self.endpoints {
			Some(endpoints) => endpoints,
			None => self.environment.endpoints()?,
		};
		let config = ClientConfig {
			credentials: Credentials {
				client_id: self.client_id,
				client_secret: self.client_secret,
				scope: self.scope,
				environment: self.environment,
			},
			endpoints,
			timeout: self.timeout,
			expiry_margin: self.expiry_margin,
			page_size: self.page_size,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ConfigError> {
		let credentials = &self.credentials;

		require_non_empty("client_id", &credentials.client_id)?;

		if credentials.client_secret.is_blank() {
			return Err(ConfigError::MissingCredential { field: "client_secret" });
		}

		require_non_empty("scope", &credentials.scope)?;
		environment::validate_base("api_base", &self.endpoints.api_base)?;
		environment::validate_base("token", &self.endpoints.token)?;

		if !(1..=Self::MAX_PAGE_SIZE).contains(&self.page_size) {
			return Err(ConfigError::InvalidPageSize { max: Self::MAX_PAGE_SIZE });
		}

		Ok(())
	}
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.trim().is_empty() {
		Err(ConfigError::MissingCredential { field })
	} else {
		Ok(())
	}
}
