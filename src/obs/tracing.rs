// self
use crate::{_prelude::*, auth::Token, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used around token fetches and API calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + operation.
	pub fn new(kind: CallKind, operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("onsched.call", kind = kind.as_str(), operation);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, operation);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a freshly cached token (never the secret itself).
pub(crate) fn token_refreshed(token: &Token) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			issued_at = %token.issued_at,
			expires_at = %token.expires_at,
			"access token refreshed"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = token;
	}
}

/// Logs the single authorization retry of a request.
pub(crate) fn unauthorized_retry(method: &'static str, path: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(method, path, "request unauthorized, retrying with a fresh token");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, path);
	}
}

/// Logs a dispatched request and its status.
pub(crate) fn response_received(method: &'static str, path: &str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method, path, status, "response received");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, path, status);
	}
}
