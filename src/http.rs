//! Transport primitives for REST calls.
//!
//! [`ApiHttpClient`] is the client's only dependency on an HTTP stack. It sends one request and
//! hands back the status and body exactly as received; deciding what a non-success status means
//! is left to the caller. [`ReqwestHttpClient`] is the default implementation.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::HttpMethod, auth::TokenSecret, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to issue one REST request.
///
/// Implementations must not retry, follow redirects to another host, or interpret the status
/// code. They must attach `bearer` as an `Authorization: Bearer <token>` header when present and
/// send no `Authorization` header otherwise.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the raw response.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// One outbound REST request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute URL including any query string.
	pub url: Url,
	/// Bearer token for authenticated endpoints.
	pub bearer: Option<TokenSecret>,
	/// Request timeout.
	pub timeout: Duration,
}

/// Response as received from the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body, decoded as UTF-8 (lossily if needed).
	pub body: String,
	/// Retry-After hint expressed as a relative duration. Informational only.
	pub retry_after: Option<Duration>,
}
impl RawResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns at most the first `len` characters of the body.
	pub fn body_preview(&self, len: usize) -> &str {
		match self.body.char_indices().nth(len) {
			Some((idx, _)) => &self.body[..idx],
			None => &self.body,
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The client must be built with `redirect(Policy::none())`; reqwest follows redirects by
	/// default, which would carry a token scoped to one path to another.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			if let Ok(timeout) = std::time::Duration::try_from(request.timeout) {
				builder = builder.timeout(timeout);
			}
			if let Some(token) = request.bearer.as_ref() {
				builder = builder.bearer_auth(token.expose());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let bytes = response.bytes().await?;

			Ok(RawResponse { status, body: String::from_utf8_lossy(&bytes).into_owned(), retry_after })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(i64::from(secs)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_2xx_only() {
		let mut response = RawResponse { status: 200, body: String::new(), retry_after: None };

		assert!(response.is_success());

		response.status = 204;

		assert!(response.is_success());

		response.status = 301;

		assert!(!response.is_success());

		response.status = 401;

		assert!(!response.is_success());
	}

	#[test]
	fn body_preview_truncates_on_char_boundaries() {
		let response =
			RawResponse { status: 400, body: "héllo wörld".into(), retry_after: None };

		assert_eq!(response.body_preview(5), "héllo");
		assert_eq!(response.body_preview(50), "héllo wörld");
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn retry_after_accepts_seconds_and_ignores_garbage() {
		let mut headers = HeaderMap::new();

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, "7".parse().expect("Header value should parse."));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(7)));

		headers.insert(RETRY_AFTER, "soon".parse().expect("Header value should parse."));

		assert_eq!(parse_retry_after(&headers), None);
	}
}
