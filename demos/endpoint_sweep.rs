//! Probes the default endpoint list once each and prints what came back.
//!
//! Useful for telling a bad key apart from a key that lacks a permission: public endpoints
//! should succeed either way.

// crates.io
use color_eyre::Result;
// self
use coinbase_rest_jwt::{
	config::Config,
	probe::{Probe, ProbeTarget},
	rest::RestClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Config::from_env()?;

	let key_preview = config.credentials.key_name.chars().take(50).collect::<String>();

	println!("Testing API key: {key_preview}...");
	println!("{}", "=".repeat(60));

	let client = RestClient::new(config)?;
	let reports = Probe::new(&client).run(&ProbeTarget::default_sweep()).await;

	for report in &reports {
		println!();
		println!("{report}");
		println!("{}", "-".repeat(60));
	}

	let passed = reports.iter().filter(|report| report.is_success()).count();

	println!();
	println!("{passed}/{} endpoints succeeded.", reports.len());

	Ok(())
}
