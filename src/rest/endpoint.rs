//! Endpoint descriptors for the Advanced Trade brokerage API.

// crates.io
use url::form_urlencoded::Serializer as QuerySerializer;
// self
use crate::{
	_prelude::*,
	auth::{HttpMethod, strip_query},
	rest::model::Granularity,
};

/// Path prefix shared by every brokerage endpoint.
pub const BROKERAGE_PREFIX: &str = "/api/v3/brokerage";

/// Whether an endpoint needs a bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
	/// No `Authorization` header is sent.
	Public,
	/// A fresh token scoped to the endpoint is attached.
	Authenticated,
}

/// One REST endpoint: method, path, optional encoded query, and access level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute path, never containing a query string.
	pub path: String,
	/// Already-encoded query string without the leading `?`.
	pub query: Option<String>,
	/// Access level.
	pub access: Access,
}
impl Endpoint {
	/// Creates an endpoint from a path that may carry an inline query string.
	pub fn new(method: HttpMethod, path_and_query: &str, access: Access) -> Self {
		let path = strip_query(path_and_query).to_owned();
		let query = path_and_query
			.split_once('?')
			.map(|(_, query)| query.to_owned())
			.filter(|query| !query.is_empty());

		Self { method, path, query, access }
	}

	/// Creates a `GET` endpoint under [`BROKERAGE_PREFIX`].
	pub fn brokerage(relative: &str, access: Access) -> Self {
		Self::new(HttpMethod::Get, &format!("{BROKERAGE_PREFIX}{relative}"), access)
	}

	/// Replaces the query string with the encoded `pairs`.
	pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let encoded = QuerySerializer::new(String::new()).extend_pairs(pairs).finish();

		self.query = if encoded.is_empty() { None } else { Some(encoded) };

		self
	}

	/// Path plus `?query` when a query is present.
	pub fn path_and_query(&self) -> String {
		match &self.query {
			Some(query) => format!("{}?{query}", self.path),
			None => self.path.clone(),
		}
	}

	/// `GET /time`, public.
	pub fn server_time() -> Self {
		Self::brokerage("/time", Access::Public)
	}

	/// `GET /products`, public.
	pub fn products() -> Self {
		Self::brokerage("/products", Access::Public)
	}

	/// `GET /accounts`.
	pub fn accounts() -> Self {
		Self::brokerage("/accounts", Access::Authenticated)
	}

	/// `GET /products/{product_id}/book`, optionally limited to `limit` levels per side.
	pub fn product_book(product_id: &str, limit: Option<u32>) -> Self {
		let endpoint =
			Self::brokerage(&format!("/products/{product_id}/book"), Access::Authenticated);

		match limit {
			Some(limit) => endpoint.with_query([("limit", limit.to_string())]),
			None => endpoint,
		}
	}

	/// `GET /products/{product_id}/candles` for `[start, end)` at `granularity`.
	pub fn candles(
		product_id: &str,
		start: OffsetDateTime,
		end: OffsetDateTime,
		granularity: Granularity,
	) -> Self {
		Self::brokerage(&format!("/products/{product_id}/candles"), Access::Authenticated)
			.with_query([
				("start", start.unix_timestamp().to_string()),
				("end", end.unix_timestamp().to_string()),
				("granularity", granularity.as_str().to_owned()),
			])
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}", self.method, self.path_and_query())
	}
}
