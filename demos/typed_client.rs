//! Lists brokerage accounts through the typed client and pretty-prints them as JSON.

// crates.io
use color_eyre::Result;
// self
use coinbase_rest_jwt::{config::Config, rest::RestClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = RestClient::new(Config::from_env()?)?;
	let accounts = client.list_accounts().await?;

	println!("{}", serde_json::to_string_pretty(&accounts)?);

	Ok(())
}
