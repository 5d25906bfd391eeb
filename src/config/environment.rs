//! Deployment targets and the endpoints they resolve to.

// self
use crate::{_prelude::*, error::ConfigError};

const SANDBOX_API_BASE: &str = "https://sandbox-api.onsched.com";
const SANDBOX_TOKEN_URL: &str = "https://sandbox-identity.onsched.com/connect/token";
const LIVE_API_BASE: &str = "https://api.onsched.com";
const LIVE_TOKEN_URL: &str = "https://identity.onsched.com/connect/token";

/// OnSched deployment target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Production endpoints.
	Live,
	#[default]
	/// Test endpoints.
	Sandbox,
}
impl Environment {
	/// Returns the stable configuration label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Live => "live",
			Self::Sandbox => "sandbox",
		}
	}

	/// Resolves the API base and token endpoint for this environment.
	pub fn endpoints(self) -> Result<Endpoints, ConfigError> {
		match self {
			Self::Live => Endpoints::new(LIVE_API_BASE, LIVE_TOKEN_URL),
			Self::Sandbox => Endpoints::new(SANDBOX_API_BASE, SANDBOX_TOKEN_URL),
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();

		if trimmed.eq_ignore_ascii_case("live") {
			Ok(Self::Live)
		} else if trimmed.eq_ignore_ascii_case("sandbox") {
			Ok(Self::Sandbox)
		} else {
			Err(ConfigError::UnknownEnvironment(s.to_owned()))
		}
	}
}

/// API base URL and OAuth token endpoint used by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Base URL every API path is appended to.
	pub api_base: Url,
	/// OAuth 2.0 token endpoint.
	pub token: Url,
}
impl Endpoints {
	/// Parses a custom endpoint pair, e.g. a mock server or a proxy.
	pub fn new(api_base: &str, token: &str) -> Result<Self, ConfigError> {
		Ok(Self { api_base: parse_base("api_base", api_base)?, token: parse_base("token", token)? })
	}
}

pub(crate) fn parse_base(endpoint: &'static str, value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value)
		.map_err(|_| ConfigError::InvalidEndpoint { endpoint, value: value.to_owned() })?;

	validate_base(endpoint, &url)?;

	Ok(url)
}

pub(crate) fn validate_base(endpoint: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::InvalidEndpoint { endpoint, value: url.to_string() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn environment_parses_known_labels() {
		assert_eq!("live".parse::<Environment>().expect("live should parse."), Environment::Live);
		assert_eq!(
			" Sandbox ".parse::<Environment>().expect("sandbox should parse."),
			Environment::Sandbox
		);
		assert!(matches!(
			"staging".parse::<Environment>(),
			Err(ConfigError::UnknownEnvironment(value)) if value == "staging"
		));
		assert_eq!(Environment::default(), Environment::Sandbox);
	}

	#[test]
	fn environments_select_distinct_hosts() {
		let live = Environment::Live.endpoints().expect("Live endpoints should parse.");
		let sandbox = Environment::Sandbox.endpoints().expect("Sandbox endpoints should parse.");

		assert_eq!(live.api_base.as_str(), "https://api.onsched.com/");
		assert_eq!(live.token.as_str(), "https://identity.onsched.com/connect/token");
		assert_eq!(sandbox.api_base.as_str(), "https://sandbox-api.onsched.com/");
		assert_eq!(sandbox.token.as_str(), "https://sandbox-identity.onsched.com/connect/token");
	}

	#[test]
	fn environment_serializes_lowercase() {
		let payload =
			serde_json::to_string(&Environment::Live).expect("Environment should serialize.");

		assert_eq!(payload, "\"live\"");
	}

	#[test]
	fn custom_endpoints_reject_non_http_urls() {
		assert!(Endpoints::new("http://127.0.0.1:8080", "http://127.0.0.1:8080/token").is_ok());
		assert!(matches!(
			Endpoints::new("mailto:ops@example.com", "https://example.com/token"),
			Err(ConfigError::InvalidEndpoint { endpoint: "api_base", .. })
		));
		assert!(matches!(
			Endpoints::new("https://example.com", "not a url"),
			Err(ConfigError::InvalidEndpoint { endpoint: "token", .. })
		));
	}
}
