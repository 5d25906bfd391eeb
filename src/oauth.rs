//! Client-credentials token exchange backed by the `oauth2` crate.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, Scope, StandardErrorResponse, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponseType, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{IssuedToken, TokenFuture, TokenSource},
	config::ClientConfig,
	error::{AuthenticationError, ConfigError, TransportError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// [`TokenSource`] that exchanges client credentials at the configured token endpoint.
///
/// Credentials travel in the form body (`client_secret_post`) together with the configured
/// scope.
pub struct OAuthTokenSource {
	oauth_client: ConfiguredBasicClient,
	http_client: ReqwestHttpClient,
	token_url: Url,
	scope: String,
}
impl OAuthTokenSource {
	/// Builds a token source for the credentials and token endpoint in `config`.
	pub fn new(config: &ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::for_token_endpoint(config.timeout)?;

		Self::with_http_client(config, http_client)
	}

	/// Builds a token source that reuses a caller-supplied reqwest client.
	pub fn with_http_client(config: &ClientConfig, http_client: ReqwestHttpClient) -> Result<Self> {
		let credentials = &config.credentials;
		let token_url = config.endpoints.token.clone();
		let oauth_token_url = TokenUrl::from_url(token_url.clone());
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
			.set_client_secret(ClientSecret::new(credentials.client_secret.expose().to_owned()))
			.set_token_uri(oauth_token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client, token_url, scope: credentials.scope.clone() })
	}

	/// Token endpoint this source posts to.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	async fn exchange(&self) -> Result<IssuedToken> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.instrumented(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.add_scope(Scope::new(self.scope.clone()))
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(&self.token_url, meta.take(), err))?;

		Ok(issued_token(&response))
	}
}
impl TokenSource for OAuthTokenSource {
	fn fetch_token(&self) -> TokenFuture<'_> {
		Box::pin(self.exchange())
	}
}
impl Debug for OAuthTokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthTokenSource")
			.field("token_url", &self.token_url.as_str())
			.field("scope", &self.scope)
			.finish()
	}
}

fn issued_token(response: &BasicTokenResponse) -> IssuedToken {
	let expires_in = response
		.expires_in()
		.and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
		.map(Duration::seconds);

	IssuedToken::new(response.access_token().secret().to_owned(), expires_in)
}

fn map_request_error(
	token_url: &Url,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> Error {
	let status = meta.as_ref().and_then(|meta| meta.status);
	let captured_body = meta.and_then(|meta| meta.error_body);

	match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response(status, captured_body, &response).into(),
		// Error statuses with a non-OAuth body still count as a rejection.
		RequestTokenError::Parse(_, body) if status.is_some_and(|code| !(200..300).contains(&code)) =>
			AuthenticationError::TokenRejected {
				status,
				error: None,
				body: captured_body.unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned()),
			}
			.into(),
		RequestTokenError::Parse(source, body) => AuthenticationError::TokenResponseParse {
			source,
			status,
			body: String::from_utf8_lossy(&body).into_owned(),
		}
		.into(),
		RequestTokenError::Request(HttpClientError::Reqwest(inner)) =>
			AuthenticationError::TokenTransport(TransportError::from_reqwest(token_url, *inner))
				.into(),
		RequestTokenError::Request(HttpClientError::Io(inner)) =>
			AuthenticationError::TokenTransport(TransportError::Io(inner)).into(),
		RequestTokenError::Request(HttpClientError::Http(inner)) => ConfigError::from(inner).into(),
		RequestTokenError::Request(HttpClientError::Other(message))
		| RequestTokenError::Other(message) => AuthenticationError::TokenRejected {
			status,
			error: None,
			body: captured_body.unwrap_or(message),
		}
		.into(),
		RequestTokenError::Request(other) => AuthenticationError::TokenRejected {
			status,
			error: None,
			body: captured_body.unwrap_or_else(|| other.to_string()),
		}
		.into(),
	}
}

fn map_server_response(
	status: Option<u16>,
	captured_body: Option<String>,
	response: &StandardErrorResponse<BasicErrorResponseType>,
) -> AuthenticationError {
	let code = response.error().to_string();
	let body = captured_body.unwrap_or_else(|| match response.error_description() {
		Some(description) => format!("{code}: {description}"),
		None => code.clone(),
	});

	AuthenticationError::TokenRejected { status, error: Some(code), body }
}
