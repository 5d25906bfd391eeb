//! Caching token provider with a singleflight fetch guard.
//!
//! [`TokenProvider::get_token`] serves the cached token while it is unexpired. When the cache
//! is empty or stale, callers queue on an async mutex; the first one through performs the
//! exchange and the rest re-check the cache once they acquire the guard, so at most one token
//! fetch is in flight per provider and concurrent callers block until it completes.

// self
use crate::{
	_prelude::*,
	auth::{Clock, Token, TokenSource},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Supplies a currently valid bearer token for every outbound request.
pub struct TokenProvider {
	source: Arc<dyn TokenSource>,
	clock: Arc<dyn Clock>,
	margin: Duration,
	cache: RwLock<Option<Token>>,
	fetch_guard: AsyncMutex<()>,
}
impl TokenProvider {
	/// Creates a provider with an empty cache.
	pub fn new(source: Arc<dyn TokenSource>, clock: Arc<dyn Clock>, margin: Duration) -> Self {
		Self {
			source,
			clock,
			margin: if margin.is_negative() { Duration::ZERO } else { margin },
			cache: RwLock::new(None),
			fetch_guard: AsyncMutex::new(()),
		}
	}

	/// Returns the cached token if unexpired, fetching a new one otherwise.
	pub async fn get_token(&self) -> Result<Token> {
		const KIND: CallKind = CallKind::TokenFetch;

		if let Some(token) = self.fresh_cached() {
			return Ok(token);
		}

		let _singleflight = self.fetch_guard.lock().await;

		// Another caller may have refreshed while we waited on the guard.
		if let Some(token) = self.fresh_cached() {
			return Ok(token);
		}

		let span = CallSpan::new(KIND, "get_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		match span.instrument(self.source.fetch_token()).await {
			Ok(issued) => {
				let token = Token::from_issued(issued, self.clock.now(), self.margin);

				*self.cache.write() = Some(token.clone());

				obs::token_refreshed(&token);
				obs::record_call_outcome(KIND, CallOutcome::Success);

				Ok(token)
			},
			Err(err) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Forces the next [`get_token`](Self::get_token) call to re-fetch.
	pub fn invalidate(&self) {
		*self.cache.write() = None;
	}

	/// Drops the cached token only if it is the one the server just rejected.
	///
	/// Returns `true` when the cache was cleared. A concurrent flow that already replaced the
	/// token keeps its fresh value.
	pub fn invalidate_if_current(&self, rejected: &Token) -> bool {
		let mut cache = self.cache.write();

		if cache.as_ref().is_some_and(|current| current.access_token == rejected.access_token) {
			*cache = None;

			return true;
		}

		false
	}

	/// Returns the cached token regardless of expiry, without fetching.
	pub fn peek(&self) -> Option<Token> {
		self.cache.read().clone()
	}

	fn fresh_cached(&self) -> Option<Token> {
		let now = self.clock.now();

		self.cache.read().as_ref().filter(|token| !token.is_expired_at(now)).cloned()
	}
}
impl Debug for TokenProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("margin", &self.margin)
			.field("cached", &self.cache.read().as_ref().map(|token| token.expires_at))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::{
		auth::{IssuedToken, ManualClock, TokenFuture},
		error::{AuthenticationError, Error},
	};

	struct CountingSource {
		fetches: AtomicUsize,
		expires_in: Option<Duration>,
	}
	impl CountingSource {
		fn new(expires_in: Option<Duration>) -> Self {
			Self { fetches: AtomicUsize::new(0), expires_in }
		}

		fn fetches(&self) -> usize {
			self.fetches.load(Ordering::SeqCst)
		}
	}
	impl TokenSource for CountingSource {
		fn fetch_token(&self) -> TokenFuture<'_> {
			Box::pin(async move {
				let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;

				Ok(IssuedToken::new(format!("token-{n}"), self.expires_in))
			})
		}
	}

	struct FailingSource;
	impl TokenSource for FailingSource {
		fn fetch_token(&self) -> TokenFuture<'_> {
			Box::pin(async {
				Err(AuthenticationError::TokenRejected {
					status: Some(400),
					error: Some("invalid_client".into()),
					body: "{\"error\":\"invalid_client\"}".into(),
				}
				.into())
			})
		}
	}

	fn provider(source: Arc<CountingSource>, clock: Arc<ManualClock>) -> TokenProvider {
		TokenProvider::new(source, clock, Duration::seconds(30))
	}

	#[tokio::test]
	async fn cached_token_is_reused_until_expiry() {
		let source = Arc::new(CountingSource::new(Some(Duration::hours(1))));
		let clock = Arc::new(ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC)));
		let provider = provider(source.clone(), clock.clone());
		let first = provider.get_token().await.expect("First fetch should succeed.");
		let second = provider.get_token().await.expect("Cached fetch should succeed.");

		assert_eq!(first.bearer(), "token-1");
		assert_eq!(second.bearer(), "token-1");
		assert_eq!(source.fetches(), 1);

		clock.advance(Duration::minutes(59) + Duration::seconds(30));

		let third = provider.get_token().await.expect("Expired fetch should succeed.");

		assert_eq!(third.bearer(), "token-2");
		assert_eq!(source.fetches(), 2);
	}

	#[tokio::test]
	async fn missing_expires_in_forces_refetch() {
		let source = Arc::new(CountingSource::new(None));
		let clock = Arc::new(ManualClock::default());
		let provider = provider(source.clone(), clock);

		provider.get_token().await.expect("First fetch should succeed.");
		provider.get_token().await.expect("Second fetch should succeed.");

		assert_eq!(source.fetches(), 2);
	}

	#[tokio::test]
	async fn invalidation_only_clears_the_rejected_token() {
		let source = Arc::new(CountingSource::new(Some(Duration::hours(1))));
		let clock = Arc::new(ManualClock::default());
		let provider = provider(source.clone(), clock);
		let stale = provider.get_token().await.expect("First fetch should succeed.");

		assert!(provider.invalidate_if_current(&stale));

		let fresh = provider.get_token().await.expect("Refetch should succeed.");

		assert!(!provider.invalidate_if_current(&stale));
		assert_eq!(provider.peek(), Some(fresh));

		provider.invalidate();

		assert!(provider.peek().is_none());

		provider.get_token().await.expect("Fetch after invalidate should succeed.");

		assert_eq!(source.fetches(), 3);
	}

	#[tokio::test]
	async fn failures_leave_the_cache_empty() {
		let provider = TokenProvider::new(
			Arc::new(FailingSource),
			Arc::new(ManualClock::default()),
			Duration::seconds(30),
		);
		let err = provider.get_token().await.expect_err("Rejected credentials should fail.");

		assert!(matches!(
			err,
			Error::Authentication(AuthenticationError::TokenRejected { status: Some(400), .. })
		));
		assert!(provider.peek().is_none());
	}
}
