// self
use crate::obs::{CallKind, CallOutcome};

/// Counter incremented once per recorded outcome, labeled by `kind` and `outcome`.
pub const CALL_COUNTER: &str = "onsched_call_total";

/// Bumps [`CALL_COUNTER`] on the global recorder; compiles to nothing without `metrics`.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(CALL_COUNTER, "kind" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}
