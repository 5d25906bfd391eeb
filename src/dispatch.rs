//! Authorized request dispatch with a single token-refresh retry.
//!
//! Every endpoint method lowers its arguments into a [`RequestDescriptor`] and hands it to
//! [`RequestDispatcher::send`]. The dispatcher attaches the bearer token, performs the call, and
//! normalizes the outcome:
//!
//! - 2xx bodies parse as JSON (an empty body becomes an empty object);
//! - a first 401 invalidates the token and retries once, a second 401 is an
//!   [`AuthenticationError::Unauthorized`];
//! - any other status becomes an [`ApiError::Status`] carrying the upstream body;
//! - network failures surface as [`TransportError`] and are never retried.

// crates.io
use reqwest::{
	StatusCode,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{Token, TokenProvider},
	error::{ApiError, AuthenticationError, ConfigError, ErrorBody, TransportError},
	http::ReqwestHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Parsed JSON response returned to callers as-is.
pub type ResponseEnvelope = JsonValue;

/// HTTP verbs used by the OnSched API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Upper-case verb label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => Self::GET,
			Method::Post => Self::POST,
			Method::Put => Self::PUT,
			Method::Delete => Self::DELETE,
		}
	}
}

/// Fully resolved logical request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the API base, placeholders already substituted.
	pub path: String,
	/// Ordered query pairs; omitted parameters are never present.
	pub query: Vec<(String, String)>,
	/// JSON body, if the operation sends one.
	pub body: Option<JsonValue>,
	/// Operation label used for spans and metrics.
	pub operation: &'static str,
}
impl RequestDescriptor {
	/// Creates a descriptor without query or body.
	pub fn new(method: Method, path: impl Into<String>, operation: &'static str) -> Self {
		Self { method, path: path.into(), query: Vec::new(), body: None, operation }
	}

	/// Replaces the query pairs.
	pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
		self.query = query;

		self
	}

	/// Appends one query pair.
	pub fn with_query_pair(mut self, name: impl Into<String>, value: impl Display) -> Self {
		self.query.push((name.into(), value.to_string()));

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: JsonValue) -> Self {
		self.body = Some(body);

		self
	}
}

/// Sends [`RequestDescriptor`]s with a valid bearer token.
#[derive(Clone)]
pub struct RequestDispatcher {
	http: ReqwestHttpClient,
	api_base: Url,
	tokens: Arc<TokenProvider>,
}
impl RequestDispatcher {
	/// Creates a dispatcher for the given API base.
	pub fn new(http: ReqwestHttpClient, api_base: Url, tokens: Arc<TokenProvider>) -> Self {
		Self { http, api_base, tokens }
	}

	/// Token provider backing this dispatcher.
	pub fn tokens(&self) -> &Arc<TokenProvider> {
		&self.tokens
	}

	/// Base URL every request path is appended to.
	pub fn api_base(&self) -> &Url {
		&self.api_base
	}

	/// Builds the absolute URL for a descriptor.
	///
	/// Path segments are percent-encoded individually and the query string is only present when
	/// the descriptor carries at least one pair.
	pub fn resolve(&self, descriptor: &RequestDescriptor) -> Result<Url> {
		let mut url = self.api_base.clone();

		{
			let mut segments = url.path_segments_mut().map_err(|_| ConfigError::InvalidEndpoint {
				endpoint: "api_base",
				value: self.api_base.to_string(),
			})?;

			segments.pop_if_empty();
			segments.extend(descriptor.path.split('/').filter(|segment| !segment.is_empty()));
		}

		url.set_query(None);
		url.set_fragment(None);

		if !descriptor.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&descriptor.query);
		}

		Ok(url)
	}

	/// Sends the request, retrying once with a fresh token on the first 401.
	pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<ResponseEnvelope> {
		const KIND: CallKind = CallKind::ApiCall;

		let url = self.resolve(descriptor)?;
		let body = descriptor
			.body
			.as_ref()
			.map(serde_json::to_vec)
			.transpose()
			.map_err(ConfigError::from)?;
		let span = CallSpan::new(KIND, descriptor.operation);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_with_retry(descriptor, &url, body.as_deref())).await;

		obs::record_call_outcome(
			KIND,
			if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure },
		);

		result
	}

	async fn send_with_retry(
		&self,
		descriptor: &RequestDescriptor,
		url: &Url,
		body: Option<&[u8]>,
	) -> Result<ResponseEnvelope> {
		let mut retried = false;

		loop {
			let token = self.tokens.get_token().await?;
			let (status, bytes) = self.execute(descriptor, url, &token, body).await?;

			obs::response_received(descriptor.method.as_str(), &descriptor.path, status.as_u16());

			if status != StatusCode::UNAUTHORIZED {
				return normalize(descriptor, status, &bytes);
			}
			if retried {
				return Err(AuthenticationError::Unauthorized {
					path: descriptor.path.clone(),
					body: ErrorBody::from_bytes(&bytes),
				}
				.into());
			}

			self.tokens.invalidate_if_current(&token);

			obs::unauthorized_retry(descriptor.method.as_str(), &descriptor.path);
			obs::record_call_outcome(CallKind::ApiCall, CallOutcome::Retry);

			retried = true;
		}
	}

	async fn execute(
		&self,
		descriptor: &RequestDescriptor,
		url: &Url,
		token: &Token,
		body: Option<&[u8]>,
	) -> Result<(StatusCode, Vec<u8>)> {
		let mut request = self
			.http
			.request(descriptor.method.into(), url.clone())
			.bearer_auth(token.bearer())
			.header(ACCEPT, JSON_MEDIA_TYPE);

		if let Some(body) = body {
			request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(body.to_vec());
		}

		let response =
			request.send().await.map_err(|err| TransportError::from_reqwest(url, err))?;
		let status = response.status();
		let bytes = response.bytes().await.map_err(|err| TransportError::from_reqwest(url, err))?;

		Ok((status, bytes.to_vec()))
	}
}
impl Debug for RequestDispatcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDispatcher")
			.field("api_base", &self.api_base.as_str())
			.field("tokens", &self.tokens)
			.finish()
	}
}

fn normalize(
	descriptor: &RequestDescriptor,
	status: StatusCode,
	bytes: &[u8],
) -> Result<ResponseEnvelope> {
	if !status.is_success() {
		return Err(ApiError::Status {
			status: status.as_u16(),
			method: descriptor.method.as_str(),
			path: descriptor.path.clone(),
			body: ErrorBody::from_bytes(bytes),
		}
		.into());
	}
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(JsonValue::Object(JsonMap::new()));
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		ApiError::Decode {
			status: status.as_u16(),
			method: descriptor.method.as_str(),
			path: descriptor.path.clone(),
			source,
		}
		.into()
	})
}
