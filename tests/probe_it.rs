#![cfg(feature = "reqwest")]

mod common;

// std
use std::net::TcpListener;
// crates.io
use httpmock::prelude::*;
// self
use coinbase_rest_jwt::{
	probe::{Probe, ProbeOutcome, ProbeTarget},
	rest::{Access, Endpoint},
};
use common::mock_rest_client;

#[tokio::test]
async fn each_target_is_called_once_and_reported_in_order() {
	let server = MockServer::start_async().await;
	let time = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/time").header_missing("authorization");
			then.status(200).body("{\"iso\":\"2026-01-01T00:00:00Z\"}");
		})
		.await;
	let accounts = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/accounts").header_exists("authorization");
			then.status(200).body(
				"{\"size\":0,\"has_next\":false,\"cursor\":\"\",\"accounts\":[],\"zeta\":1,\"alpha\":2}",
			);
		})
		.await;
	let candles = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v3/brokerage/products/BTC-USD/candles")
				.query_param("granularity", "ONE_MINUTE")
				.header_exists("authorization");
			then.status(401).body("Unauthorized");
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let targets = [
		ProbeTarget::new(Endpoint::server_time(), "Public - should work"),
		ProbeTarget::new(Endpoint::accounts(), "Requires View permission"),
		ProbeTarget::new(
			Endpoint::brokerage(
				"/products/BTC-USD/candles?start=1767225600&end=1767312000&granularity=ONE_MINUTE",
				Access::Authenticated,
			),
			"Candles - requires View",
		),
	];
	let reports = Probe::new(&client).run(&targets).await;

	assert_eq!(reports.len(), 3);
	assert_eq!(reports[0].outcome, ProbeOutcome::Success { status: 200, keys: vec!["iso".into()] });
	assert_eq!(
		reports[1].outcome,
		ProbeOutcome::Success {
			status: 200,
			keys: vec![
				"size".into(),
				"has_next".into(),
				"cursor".into(),
				"accounts".into(),
				"zeta".into(),
			],
		}
	);
	assert_eq!(
		reports[2].outcome,
		ProbeOutcome::Rejected { status: 401, preview: "Unauthorized".into() }
	);
	assert!(reports[2].to_string().ends_with("Status: 401\nResponse: Unauthorized"));

	time.assert_calls_async(1).await;
	accounts.assert_calls_async(1).await;
	candles.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_servers_are_reported_as_failures() {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Loopback port should bind.");
	let base_url = format!(
		"http://{}",
		listener.local_addr().expect("Bound listener should report its address.")
	);

	drop(listener);

	let client = mock_rest_client(&base_url);
	let reports = Probe::new(&client).run(&[ProbeTarget::new(Endpoint::products(), "Public")]).await;

	assert!(matches!(&reports[0].outcome, ProbeOutcome::Failed { error } if !error.is_empty()));
	assert!(reports[0].to_string().contains("Error: "));
}
