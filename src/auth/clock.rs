//! Time sources consulted for token expiry decisions.

// self
use crate::_prelude::*;

/// Source of the current instant.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current UTC instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Manually driven clock for simulating token expiry.
///
/// Only compiled for unit tests or with the `test` feature.
#[cfg(any(test, feature = "test"))]
#[derive(Debug)]
pub struct ManualClock(Mutex<OffsetDateTime>);
#[cfg(any(test, feature = "test"))]
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self(Mutex::new(start))
	}

	/// Moves the clock forward (or backward for negative durations).
	pub fn advance(&self, by: Duration) {
		let mut now = self.0.lock();

		*now += by;
	}

	/// Jumps to an absolute instant.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}
}
#[cfg(any(test, feature = "test"))]
impl Default for ManualClock {
	fn default() -> Self {
		Self::new(OffsetDateTime::now_utc())
	}
}
#[cfg(any(test, feature = "test"))]
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn manual_clock_advances_on_demand() {
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));

		clock.advance(Duration::minutes(90));

		assert_eq!(clock.now(), macros::datetime!(2025-01-01 01:30 UTC));

		clock.set(macros::datetime!(2024-06-01 12:00 UTC));

		assert_eq!(clock.now(), macros::datetime!(2024-06-01 12:00 UTC));
	}
}
