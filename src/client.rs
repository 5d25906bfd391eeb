//! Top-level OnSched client.
//!
//! [`Client`] owns the token provider and request dispatcher; the endpoint methods live in
//! [`crate::endpoints`] as inherent impls on this type.

// self
use crate::{
	_prelude::*,
	auth::{Clock, SystemClock, TokenProvider, TokenSource},
	config::ClientConfig,
	dispatch::RequestDispatcher,
	http::ReqwestHttpClient,
	oauth::OAuthTokenSource,
};

/// Async OnSched API client.
///
/// One client holds at most one access token, shared by every consumer and setup call. The type
/// is `Send + Sync`; share it behind an [`Arc`] instead of building one per task.
#[derive(Clone, Debug)]
pub struct Client {
	pub(crate) dispatcher: RequestDispatcher,
	pub(crate) page_size: u32,
}
impl Client {
	/// Builds a client that exchanges the configured credentials over OAuth 2.0.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let source = OAuthTokenSource::new(&config)?;

		Self::with_token_source(config, Arc::new(source), Arc::new(SystemClock))
	}

	/// Builds a client around a custom token source and clock.
	pub fn with_token_source(
		config: ClientConfig,
		source: Arc<dyn TokenSource>,
		clock: Arc<dyn Clock>,
	) -> Result<Self> {
		let http = ReqwestHttpClient::for_api(config.timeout)?;
		let tokens = Arc::new(TokenProvider::new(source, clock, config.expiry_margin));

		Ok(Self {
			dispatcher: RequestDispatcher::new(http, config.endpoints.api_base, tokens),
			page_size: config.page_size,
		})
	}

	/// Token provider shared by every request this client sends.
	pub fn tokens(&self) -> &Arc<TokenProvider> {
		self.dispatcher.tokens()
	}

	/// Request dispatcher used by the endpoint methods.
	pub fn dispatcher(&self) -> &RequestDispatcher {
		&self.dispatcher
	}

	/// Page size used by list endpoints.
	pub fn page_size(&self) -> u32 {
		self.page_size
	}
}
