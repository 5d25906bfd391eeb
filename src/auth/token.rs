//! Cached access token and its lifecycle helpers.

// self
use crate::{
	_prelude::*,
	auth::{IssuedToken, Secret},
};

/// Current lifecycle status for a cached token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token can be presented to the API.
	Active,
	/// Token reached its (margin-adjusted) expiry instant.
	Expired,
}

/// Bearer token owned by the [`TokenProvider`](crate::auth::TokenProvider).
///
/// `expires_at` already has the configured safety margin subtracted, so the token is treated
/// as stale before the provider's own expiry check could reject it.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Instant the token endpoint issued the token.
	pub issued_at: OffsetDateTime,
	/// Instant after which the token is no longer presented.
	pub expires_at: OffsetDateTime,
}
impl Token {
	/// Derives a cached token from a fresh token-endpoint response.
	///
	/// A missing, non-positive, or margin-sized lifetime yields a token that expires at the
	/// instant it was issued: it serves the call that fetched it and nothing after.
	pub fn from_issued(issued: IssuedToken, issued_at: OffsetDateTime, margin: Duration) -> Self {
		let lifetime = issued
			.expires_in
			.map(|expires_in| expires_in - margin)
			.filter(|lifetime| lifetime.is_positive())
			.unwrap_or(Duration::ZERO);

		Self { access_token: issued.access_token, issued_at, expires_at: issued_at + lifetime }
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the token must be re-fetched at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns the raw bearer value for the `Authorization` header.
	pub fn bearer(&self) -> &str {
		self.access_token.expose()
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
