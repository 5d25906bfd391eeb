//! Client-level error types shared by the token provider, dispatcher, and endpoints.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or argument problem detected before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition failed or the authorized retry was rejected again.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Upstream API answered with a failure status or an unreadable body.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns the upstream HTTP status attached to the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(ApiError::Status { status, .. }) => Some(*status),
			Self::Api(ApiError::Decode { status, .. }) => Some(*status),
			Self::Authentication(AuthenticationError::TokenRejected { status, .. })
			| Self::Authentication(AuthenticationError::TokenResponseParse { status, .. }) =>
				*status,
			Self::Authentication(AuthenticationError::Unauthorized { .. }) => Some(401),
			_ => None,
		}
	}
}

/// Configuration and argument validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL cannot be parsed or used as a base.
	#[error("Endpoint `{endpoint}` is not a valid base URL.")]
	InvalidEndpoint {
		/// Endpoint label (`api_base` or `token`).
		endpoint: &'static str,
		/// Offending value.
		value: String,
	},
	/// A credential field is empty.
	#[error("Credential field `{field}` must not be empty.")]
	MissingCredential {
		/// Field name.
		field: &'static str,
	},
	/// Environment name is not recognized.
	#[error("Unknown environment `{0}`; expected `live` or `sandbox`.")]
	UnknownEnvironment(String),
	/// Page size must be positive.
	#[error("Page size must be between 1 and {max}.")]
	InvalidPageSize {
		/// Largest accepted page size.
		max: u32,
	},
	/// A required operation argument is missing or empty.
	#[error("Required parameter `{name}` is missing.")]
	MissingParameter {
		/// Wire name of the parameter.
		name: &'static str,
	},
	/// An argument has a value the API cannot accept.
	#[error("Parameter `{name}` is invalid: {reason}.")]
	InvalidParameter {
		/// Wire name of the parameter.
		name: String,
		/// Why the value was rejected.
		reason: String,
	},
	/// A date or date-time could not be rendered as ISO-8601.
	#[error("Parameter `{name}` could not be formatted as ISO-8601.")]
	InvalidTimestamp {
		/// Wire name of the parameter.
		name: &'static str,
		/// Underlying formatting failure.
		#[source]
		source: time::error::Format,
	},
	/// A request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidParameter { name: name.into(), reason: reason.into() }
	}
}

/// Token acquisition and authorization failures.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint answered with an error status.
	#[error("Token endpoint rejected the client credentials: {body}.")]
	TokenRejected {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// OAuth `error` code, when the provider returned one.
		error: Option<String>,
		/// Raw error body (or the provider message when no body was captured).
		body: String,
	},
	/// Token endpoint answered with a body that is not a valid token response.
	#[error("Token endpoint returned a malformed response.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Raw body that failed to parse.
		body: String,
	},
	/// Token endpoint could not be reached.
	#[error("Token endpoint could not be reached.")]
	TokenTransport(#[source] TransportError),
	/// The request was still unauthorized after one token refresh.
	#[error("Request to `{path}` is unauthorized even with a freshly issued token.")]
	Unauthorized {
		/// Request path that was rejected.
		path: String,
		/// Error body returned with the second 401.
		body: ErrorBody,
	},
}

/// Upstream API failures.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Non-2xx, non-401 status.
	#[error("{method} {path} failed with status {status}: {body}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// HTTP method label.
		method: &'static str,
		/// Request path.
		path: String,
		/// Parsed error body.
		body: ErrorBody,
	},
	/// A successful response carried a body that is not valid JSON.
	#[error("{method} {path} returned a body that is not valid JSON.")]
	Decode {
		/// HTTP status code.
		status: u16,
		/// HTTP method label.
		method: &'static str,
		/// Request path.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Error payload returned by the upstream API.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorBody {
	/// Body parsed as JSON.
	Json(JsonValue),
	/// Body that is not JSON, kept verbatim.
	Text(String),
}
impl ErrorBody {
	/// Interprets raw response bytes, preferring JSON.
	pub fn from_bytes(bytes: &[u8]) -> Self {
		match serde_json::from_slice(bytes) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
		}
	}

	/// Returns the JSON payload, if the body parsed as JSON.
	pub fn as_json(&self) -> Option<&JsonValue> {
		match self {
			Self::Json(value) => Some(value),
			Self::Text(_) => None,
		}
	}
}
impl Display for ErrorBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Json(value) => Display::fmt(value, f),
			Self::Text(text) if text.is_empty() => f.write_str("<empty>"),
			Self::Text(text) => f.write_str(text),
		}
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{url}`.")]
	Network {
		/// URL being called (without query).
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete within the configured timeout.
	#[error("Request to `{url}` timed out.")]
	Timeout {
		/// URL being called (without query).
		url: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Classifies a reqwest failure for the given URL.
	pub fn from_reqwest(url: &Url, err: ReqwestError) -> Self {
		let mut url = url.clone();

		url.set_query(None);

		if err.is_timeout() {
			Self::Timeout { url: url.into() }
		} else {
			Self::Network { url: url.into(), source: Box::new(err) }
		}
	}
}
