//! REST client that attaches a freshly built, request-scoped token to every authenticated call.
//!
//! The client never caches or reuses tokens, never retries, and never reinterprets a response:
//! [`RestClient::send`] returns whatever status and body the API produced, and
//! [`RestClient::get_json`] turns non-success statuses into [`Error::Api`] with the body intact.

pub mod endpoint;
pub mod model;

pub use endpoint::*;
pub use model::*;

// crates.io
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")] use crate::{auth::Es256TokenBuilder, http::ReqwestHttpClient};
use crate::{
	_prelude::*,
	auth::{AuthToken, HttpMethod, ScopedTokenSigner},
	config::Config,
	http::{ApiHttpClient, ApiRequest, RawResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// REST client backed by the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestRestClient = RestClient<ReqwestHttpClient>;

/// Response to one request plus the token it carried.
#[derive(Clone, Debug)]
pub struct Exchange {
	/// Token attached to the request; `None` for public endpoints.
	pub token: Option<AuthToken>,
	/// Response as received.
	pub response: RawResponse,
}

/// Client for the brokerage REST API.
pub struct RestClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	config: Config,
	signer: Arc<dyn ScopedTokenSigner>,
	http_client: Arc<C>,
}
#[cfg(feature = "reqwest")]
impl RestClient<ReqwestHttpClient> {
	/// Builds a client with the ES256 builder and a default reqwest transport.
	pub fn new(config: Config) -> Result<Self> {
		let signer = Es256TokenBuilder::new(config.token.clone())?;

		Ok(Self::with_http_client(config, Arc::new(signer), ReqwestHttpClient::new()?))
	}
}
impl<C> RestClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Builds a client from explicit parts.
	pub fn with_http_client(
		config: Config,
		signer: Arc<dyn ScopedTokenSigner>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { config, signer, http_client: http_client.into() }
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Builds a token for `method` on `path` from the configured credentials.
	pub fn authorize(&self, method: HttpMethod, path: &str) -> Result<AuthToken> {
		let token = self.signer.build_for(method, path, &self.config.credentials)?;

		obs::record_token_issued(method);

		Ok(token)
	}

	/// Sends one request and returns the raw response, whatever its status.
	pub async fn send(&self, endpoint: &Endpoint) -> Result<RawResponse> {
		Ok(self.exchange(endpoint).await?.response)
	}

	/// Sends one request and keeps the token that authorized it.
	///
	/// The request URL is resolved before signing and authenticated endpoints get a token scoped
	/// to that URL's path, so percent-encoding and dot-segment removal apply to both alike.
	/// Public endpoints are sent without an `Authorization` header.
	pub async fn exchange(&self, endpoint: &Endpoint) -> Result<Exchange> {
		let kind = match endpoint.access {
			Access::Public => CallKind::Public,
			Access::Authenticated => CallKind::Authenticated,
		};
		let span = CallSpan::new(kind, endpoint.method, &endpoint.path);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result: Result<Exchange> = span
			.instrument(async {
				let url = self.config.endpoint_url(&endpoint.path_and_query())?;
				let token = match endpoint.access {
					Access::Public => None,
					Access::Authenticated => Some(self.authorize(endpoint.method, url.path())?),
				};
				let request = ApiRequest {
					method: endpoint.method,
					url,
					bearer: token.as_ref().map(|token| token.compact.clone()),
					timeout: self.config.timeout,
				};
				let response = self.http_client.send(request).await?;

				span.record_status(response.status);

				Ok(Exchange { token, response })
			})
			.await;

		let outcome = CallOutcome::of(result.as_ref().map(|sent| &sent.response));

		obs::record_call_outcome(kind, outcome);

		result
	}

	/// Sends one request and decodes a success body as `T`.
	pub async fn get_json<T>(&self, endpoint: &Endpoint) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(endpoint).await?;

		decode_response(response)
	}

	/// `GET /time`.
	pub async fn server_time(&self) -> Result<ServerTime> {
		self.get_json(&Endpoint::server_time()).await
	}

	/// `GET /products`.
	pub async fn list_products(&self) -> Result<ProductList> {
		self.get_json(&Endpoint::products()).await
	}

	/// `GET /accounts`.
	pub async fn list_accounts(&self) -> Result<AccountList> {
		self.get_json(&Endpoint::accounts()).await
	}

	/// `GET /products/{product_id}/book`.
	pub async fn product_book(
		&self,
		product_id: &str,
		limit: Option<u32>,
	) -> Result<ProductBookResponse> {
		self.get_json(&Endpoint::product_book(product_id, limit)).await
	}

	/// `GET /products/{product_id}/candles`.
	pub async fn candles(
		&self,
		product_id: &str,
		start: OffsetDateTime,
		end: OffsetDateTime,
		granularity: Granularity,
	) -> Result<CandleList> {
		self.get_json(&Endpoint::candles(product_id, start, end, granularity)).await
	}
}
impl<C> Debug for RestClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RestClient").field("config", &self.config).finish_non_exhaustive()
	}
}

/// Maps a raw response to `T`, keeping non-success statuses verbatim.
pub fn decode_response<T>(response: RawResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	if !response.is_success() {
		return Err(Error::Api {
			status: response.status,
			body: response.body,
			retry_after: response.retry_after,
		});
	}

	let mut deserializer = serde_json::Deserializer::from_str(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { status: response.status, source })
}
