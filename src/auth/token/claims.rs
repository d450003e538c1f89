//! JOSE header and payload claims carried by request-scoped tokens, plus the base64url segment
//! codec used for the compact serialization.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// JWS algorithm identifier for ECDSA P-256 with SHA-256.
pub const ES256: &str = "ES256";

/// Errors raised while decoding a compact token without verifying it.
#[derive(Debug, ThisError)]
pub enum TokenDecodeError {
	/// The token does not have exactly three dot-separated segments.
	#[error("Compact token must have three segments, found {found}.")]
	SegmentCount {
		/// Number of segments found.
		found: usize,
	},
	/// A segment is not valid unpadded base64url.
	#[error("Token segment is not valid base64url.")]
	Base64(#[from] base64::DecodeError),
	/// A segment does not contain the expected JSON object.
	#[error("Token segment is not the expected JSON object.")]
	Json(#[from] serde_json::Error),
}

/// Protected header of a request-scoped token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
	/// Signing algorithm, always [`ES256`].
	pub alg: String,
	/// Token type.
	pub typ: String,
	/// API key identifier that signed the token.
	pub kid: String,
	/// Random per-token value, mirrored in the payload.
	pub nonce: String,
}
impl TokenHeader {
	/// Creates an ES256 header for `kid`.
	pub fn es256(kid: impl Into<String>, nonce: impl Into<String>) -> Self {
		Self { alg: ES256.into(), typ: "JWT".into(), kid: kid.into(), nonce: nonce.into() }
	}
}

/// Payload claims of a request-scoped token.
///
/// Timestamps serialize as whole Unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issuer.
	pub iss: String,
	/// Subject, the API key identifier.
	pub sub: String,
	/// Audience the token is intended for.
	pub aud: Vec<String>,
	/// Issued-at instant.
	#[serde(with = "time::serde::timestamp")]
	pub iat: OffsetDateTime,
	/// Not-before instant, equal to `iat`.
	#[serde(with = "time::serde::timestamp")]
	pub nbf: OffsetDateTime,
	/// Expiry instant.
	#[serde(with = "time::serde::timestamp")]
	pub exp: OffsetDateTime,
	/// Random per-token value.
	pub nonce: String,
	/// Scope claim, `"<METHOD> <host><path>"`.
	pub uri: String,
}
impl TokenClaims {
	/// Remaining validity at `instant`; zero once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.exp - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// Returns `true` when `instant` falls inside `[nbf, exp)`.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.nbf && instant < self.exp
	}
}

/// Serializes `value` as JSON and encodes it as an unpadded base64url segment.
pub(crate) fn encode_segment<T>(value: &T) -> Result<String, serde_json::Error>
where
	T: Serialize,
{
	Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(value)?))
}

fn decode_segment<T>(segment: &str) -> Result<T, TokenDecodeError>
where
	T: DeserializeOwned,
{
	let bytes = URL_SAFE_NO_PAD.decode(segment)?;

	Ok(serde_json::from_slice(&bytes)?)
}

/// Decodes the header and claims of a compact token without checking its signature.
///
/// Intended for diagnostics and tests; servers must verify the signature instead.
pub fn decode_unverified(compact: &str) -> Result<(TokenHeader, TokenClaims), TokenDecodeError> {
	let segments = compact.split('.').collect::<Vec<_>>();

	if segments.len() != 3 {
		return Err(TokenDecodeError::SegmentCount { found: segments.len() });
	}

	Ok((decode_segment(segments[0])?, decode_segment(segments[1])?))
}
