//! Calls `GET /api/v3/brokerage/accounts` once with credentials from `COINBASE_API_KEY` and
//! `COINBASE_API_SECRET`, printing the status and body.
//!
//! On a non-success status it also prints the scope the token was bound to and the first
//! characters of the token, which is usually enough to spot a host or path mismatch.

// crates.io
use color_eyre::Result;
// self
use coinbase_rest_jwt::{config::Config, rest::{Endpoint, Exchange, RestClient}};

const TOKEN_PREFIX_LEN: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = RestClient::new(Config::from_env()?)?;
	let Exchange { token, response } = client.exchange(&Endpoint::accounts()).await?;

	println!("Status: {}", response.status);
	println!("Response: {}", response.body);

	if let Some(token) = token.filter(|_| !response.is_success()) {
		println!();
		println!("Failed. Debug info:");
		println!("URI claim: {}", token.scope);
		println!("JWT (first {TOKEN_PREFIX_LEN}): {}...", token.compact.prefix(TOKEN_PREFIX_LEN));
	}

	Ok(())
}
