//! One-pass endpoint probe for checking which endpoints a key can reach.
//!
//! Every target is sent exactly once, in order, and the outcome is recorded without retrying or
//! reinterpreting the response.

// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	rest::{Access, Endpoint, RestClient},
};

const PUBLIC_PREVIEW_LEN: usize = 100;
const PRIVATE_PREVIEW_LEN: usize = 200;
const MAX_REPORTED_KEYS: usize = 5;

/// Endpoint plus a human-readable note on what to expect from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeTarget {
	/// Endpoint to call.
	pub endpoint: Endpoint,
	/// What the call is expected to show.
	pub description: String,
}
impl ProbeTarget {
	/// Creates a target.
	pub fn new(endpoint: Endpoint, description: impl Into<String>) -> Self {
		Self { endpoint, description: description.into() }
	}

	/// Public time and products, then accounts, the BTC-USD book, and one day of BTC-USD
	/// one-minute candles.
	pub fn default_sweep() -> Vec<Self> {
		vec![
			Self::new(Endpoint::server_time(), "Public - should work"),
			Self::new(Endpoint::products(), "Public products - should work"),
			Self::new(Endpoint::accounts(), "Requires View permission"),
			Self::new(
				Endpoint::brokerage("/products/BTC-USD/book", Access::Authenticated),
				"Product book - may work",
			),
			Self::new(
				Endpoint::brokerage(
					"/products/BTC-USD/candles?start=2026-01-01T00:00:00Z&end=2026-01-02T00:00:00Z&granularity=ONE_MINUTE",
					Access::Authenticated,
				),
				"Candles - requires View",
			),
		]
	}
}

/// What happened when a target was probed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
	/// 2xx response.
	Success {
		/// HTTP status code.
		status: u16,
		/// First top-level keys of a JSON object body.
		keys: Vec<String>,
	},
	/// Non-2xx response.
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Leading part of the body.
		preview: String,
	},
	/// The request was never answered (token or transport failure).
	Failed {
		/// Error message.
		error: String,
	},
}

/// Outcome for one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeReport {
	/// Probed target.
	pub target: ProbeTarget,
	/// Result of the single attempt.
	pub outcome: ProbeOutcome,
}
impl ProbeReport {
	/// Returns `true` for a 2xx outcome.
	pub fn is_success(&self) -> bool {
		matches!(self.outcome, ProbeOutcome::Success { .. })
	}
}
impl Display for ProbeReport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		writeln!(f, "{}", self.target.description)?;
		writeln!(f, "Endpoint: {}", self.target.endpoint)?;

		match &self.outcome {
			ProbeOutcome::Success { status, keys } => {
				writeln!(f, "Status: {status}")?;

				match self.target.endpoint.access {
					Access::Public => write!(f, "SUCCESS (public endpoint)"),
					Access::Authenticated =>
						write!(f, "SUCCESS, response keys: [{}]", keys.join(", ")),
				}
			},
			ProbeOutcome::Rejected { status, preview } => {
				writeln!(f, "Status: {status}")?;
				write!(f, "Response: {preview}")
			},
			ProbeOutcome::Failed { error } => write!(f, "Error: {error}"),
		}
	}
}

/// Runs targets against a client.
#[derive(Debug)]
pub struct Probe<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	client: &'a RestClient<C>,
}
impl<'a, C> Probe<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a probe over `client`.
	pub fn new(client: &'a RestClient<C>) -> Self {
		Self { client }
	}

	/// Sends each target once, in order.
	pub async fn run(&self, targets: &[ProbeTarget]) -> Vec<ProbeReport> {
		let mut reports = Vec::with_capacity(targets.len());

		for target in targets {
			let outcome = match self.client.send(&target.endpoint).await {
				Ok(response) if response.is_success() =>
					ProbeOutcome::Success { status: response.status, keys: top_level_keys(&response.body) },
				Ok(response) => {
					let len = match target.endpoint.access {
						Access::Public => PUBLIC_PREVIEW_LEN,
						Access::Authenticated => PRIVATE_PREVIEW_LEN,
					};

					ProbeOutcome::Rejected {
						status: response.status,
						preview: response.body_preview(len).to_owned(),
					}
				},
				Err(e) => ProbeOutcome::Failed { error: error_chain(&e) },
			};

			reports.push(ProbeReport { target: target.clone(), outcome });
		}

		reports
	}
}

// Keys come back in body order.
fn top_level_keys(body: &str) -> Vec<String> {
	match serde_json::from_str::<serde_json::Value>(body) {
		Ok(serde_json::Value::Object(map)) => map.keys().take(MAX_REPORTED_KEYS).cloned().collect(),
		_ => Vec::new(),
	}
}

fn error_chain(err: &Error) -> String {
	let mut message = err.to_string();
	let mut source = err.source();

	while let Some(inner) = source {
		message.push_str(": ");
		message.push_str(&inner.to_string());

		source = inner.source();
	}

	message
}
