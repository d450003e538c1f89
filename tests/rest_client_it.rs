#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use coinbase_rest_jwt::{
	auth::decode_unverified,
	error::Error,
	rest::{Access, Endpoint, ProductBookResponse, decode_response},
};
use common::{KEY_NAME, mock_rest_client};

const ACCOUNTS_BODY: &str = r#"{
	"accounts": [{
		"uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
		"name": "BTC Wallet",
		"currency": "BTC",
		"available_balance": {"value": "0.5", "currency": "BTC"},
		"default": true,
		"active": true,
		"type": "ACCOUNT_TYPE_CRYPTO",
		"ready": true
	}],
	"has_next": false,
	"cursor": "",
	"size": 1
}"#;

#[tokio::test]
async fn list_accounts_sends_a_bearer_token_and_decodes_the_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/accounts").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(ACCOUNTS_BODY);
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let accounts = client.list_accounts().await.expect("Accounts request should succeed.");

	assert_eq!(accounts.size, 1);
	assert_eq!(accounts.accounts[0].currency, "BTC");
	assert_eq!(accounts.accounts[0].available_balance.value, "0.5");

	mock.assert_async().await;
}

#[tokio::test]
async fn public_endpoints_are_called_without_authorization() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/time").header_missing("authorization");
			then.status(200).header("content-type", "application/json").body(
				"{\"iso\":\"2026-01-01T00:00:00Z\",\"epochSeconds\":\"1767225600\",\"epochMillis\":\"1767225600000\"}",
			);
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let time = client.server_time().await.expect("Server time request should succeed.");

	assert_eq!(time.epoch_seconds, "1767225600");

	mock.assert_async().await;
}

#[tokio::test]
async fn query_strings_reach_the_server_but_not_the_token_scope() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v3/brokerage/products/BTC-USD/book")
				.query_param("limit", "3")
				.header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(
				"{\"pricebook\":{\"product_id\":\"BTC-USD\",\"bids\":[{\"price\":\"100.00\",\"size\":\"1\"}],\"asks\":[]}}",
			);
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let sent = client
		.exchange(&Endpoint::product_book("BTC-USD", Some(3)))
		.await
		.expect("Product book request should succeed.");
	let token = sent.token.expect("Authenticated request should keep its token.");
	let book: ProductBookResponse =
		decode_response(sent.response).expect("Product book should decode.");

	assert_eq!(book.pricebook.product_id, "BTC-USD");
	assert_eq!(book.pricebook.bids[0].price, "100.00");

	mock.assert_async().await;

	let (header, claims) = decode_unverified(token.expose()).expect("Token should decode.");

	assert_eq!(claims.uri, "GET api.coinbase.com/api/v3/brokerage/products/BTC-USD/book");
	assert_eq!(header.kid, KEY_NAME);
}

#[tokio::test]
async fn dot_segments_are_resolved_before_signing() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/accounts").header_exists("authorization");
			then.status(200).body(ACCOUNTS_BODY);
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let sent = client
		.exchange(&Endpoint::brokerage("/products/../accounts", Access::Authenticated))
		.await
		.expect("Dot-segment request should succeed.");
	let token = sent.token.expect("Authenticated request should keep its token.");
	let (_, claims) = decode_unverified(token.expose()).expect("Token should decode.");

	assert_eq!(sent.response.status, 200);
	assert_eq!(claims.uri, "GET api.coinbase.com/api/v3/brokerage/accounts");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unauthorized_responses_surface_verbatim() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/accounts");
			then.status(401).body("Unauthorized\n");
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let err = client.list_accounts().await.expect_err("HTTP 401 must surface as an error.");

	match err {
		Error::Api { status, body, .. } => {
			assert_eq!(status, 401);
			assert_eq!(body, "Unauthorized\n");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn raw_send_returns_non_success_responses_untouched() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v3/brokerage/accounts");
			then.status(429).header("retry-after", "3").body("{\"error\":\"rate limited\"}");
		})
		.await;
	let client = mock_rest_client(&server.base_url());
	let response = client
		.send(&Endpoint::brokerage("/accounts", Access::Authenticated))
		.await
		.expect("Raw send should return the response.");

	assert_eq!(response.status, 429);
	assert_eq!(response.body, "{\"error\":\"rate limited\"}");
	assert_eq!(response.retry_after, Some(time::Duration::seconds(3)));

	mock.assert_calls_async(1).await;
}
