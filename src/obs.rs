//! Optional observability helpers for REST calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit one span per call named `coinbase_rest_jwt.call`, carrying the
//!   `call`, `method`, and `path` fields plus the HTTP `status` once a response arrives.
//! - Enable `metrics` to count calls in `coinbase_rest_jwt_call_total` (labels `call` and
//!   `outcome`) and signed tokens in `coinbase_rest_jwt_token_issued_total` (label `method`).

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::{_prelude::*, http::RawResponse};

/// Kinds of calls observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Unauthenticated request.
	Public,
	/// Request carrying a freshly built bearer token.
	Authenticated,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Public => "public",
			CallKind::Authenticated => "authenticated",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// A request is about to be signed and sent.
	Attempt,
	/// The API answered with a 2xx status.
	Success,
	/// The API answered with any other status.
	Rejected,
	/// No response: token construction, URL resolution, or transport failed.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Rejected => "rejected",
			CallOutcome::Failure => "failure",
		}
	}

	/// Classifies the end state of a call.
	pub fn of(result: Result<&RawResponse, &Error>) -> Self {
		match result {
			Ok(response) if response.is_success() => CallOutcome::Success,
			Ok(_) => CallOutcome::Rejected,
			Err(_) => CallOutcome::Failure,
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
