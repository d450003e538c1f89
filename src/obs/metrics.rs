//! Counters for REST calls and the tokens signed for them.

// self
use crate::{
	auth::HttpMethod,
	obs::{CallKind, CallOutcome},
};

/// Calls per stage, labeled by `call` and `outcome`.
pub const CALL_COUNTER: &str = "coinbase_rest_jwt_call_total";
/// Tokens signed by the client, labeled by `method`.
pub const TOKEN_COUNTER: &str = "coinbase_rest_jwt_token_issued_total";

/// Counts one call stage.
///
/// A call is recorded twice: once as [`CallOutcome::Attempt`] and once with its end state.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(CALL_COUNTER, "call" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts one signed token.
pub fn record_token_issued(method: HttpMethod) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(TOKEN_COUNTER, "method" => method.as_str()).increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = method;
	}
}
