//! Token acquisition contract used by the [`TokenProvider`](crate::auth::TokenProvider).
//!
//! The provider owns caching and mutual exclusion; a [`TokenSource`] only performs one
//! exchange per call. [`OAuthTokenSource`](crate::oauth::OAuthTokenSource) is the production
//! implementation; tests and embedders can supply their own.

// self
use crate::{_prelude::*, auth::Secret};

/// Boxed future returned by [`TokenSource::fetch_token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<IssuedToken>> + 'a + Send>>;

/// Performs a single token exchange against the authorization server.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Requests a new access token. Failures surface as
	/// [`Error::Authentication`](crate::Error::Authentication).
	fn fetch_token(&self) -> TokenFuture<'_>;
}

/// Raw token-endpoint result before expiry bookkeeping.
#[derive(Clone, Debug)]
pub struct IssuedToken {
	/// Access token secret.
	pub access_token: Secret,
	/// Lifetime reported by the provider, if any.
	pub expires_in: Option<Duration>,
}
impl IssuedToken {
	/// Creates a new issued token.
	pub fn new(access_token: impl Into<String>, expires_in: Option<Duration>) -> Self {
		Self { access_token: Secret::new(access_token), expires_in }
	}
}
