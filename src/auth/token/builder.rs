//! ES256 token construction.
//!
//! [`Es256TokenBuilder`] is pure computation: it reads no environment, touches no disk, and
//! performs no I/O. Each call draws a fresh nonce and reads the clock once, so two tokens built
//! from identical inputs always differ. The [`ScopedTokenSigner`] trait is the seam the REST
//! client depends on, letting tests swap in a different signing backend.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use p256::ecdsa::{Signature, SigningKey, signature::Signer};
// self
use crate::{
	_prelude::*,
	auth::{
		Credentials, HttpMethod, RequestScope,
		credential::parse_secret_key,
		token::{
			claims::{self, TokenClaims, TokenHeader},
			secret::TokenSecret,
		},
	},
	error::BoxError,
};

/// Credential fields that must be present before a token can be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialField {
	/// API key identifier.
	KeyName,
	/// PEM private key.
	PrivateKey,
}
impl CredentialField {
	/// Returns a stable label suitable for messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialField::KeyName => "key name",
			CredentialField::PrivateKey => "private key",
		}
	}
}
impl Display for CredentialField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Failures raised while building a token. None of them are retryable.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// A required credential is absent or empty.
	#[error("Credential is missing: {field}.")]
	MissingCredential {
		/// Which credential was missing.
		field: CredentialField,
	},
	/// The private key is not a P-256 EC key in SEC1 or PKCS#8 PEM form.
	#[error("Private key is not a valid P-256 EC key.")]
	InvalidKeyFormat {
		/// Underlying PEM/DER parsing failure.
		#[source]
		source: BoxError,
	},
	/// Token settings violate their bounds.
	#[error("Token settings are invalid: {reason}.")]
	InvalidSettings {
		/// Which bound was violated.
		reason: &'static str,
	},
	/// Header or claims could not be serialized.
	#[error("Token header or claims could not be serialized.")]
	Encode(#[from] serde_json::Error),
	/// The signing backend rejected the input.
	#[error("Token signing failed.")]
	Signing {
		/// Backend-specific failure.
		#[source]
		source: BoxError,
	},
}
impl TokenError {
	/// Wraps a key parsing failure.
	pub fn invalid_key_format(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidKeyFormat { source: Box::new(src) }
	}

	/// Wraps a signing backend failure.
	pub fn signing(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Signing { source: Box::new(src) }
	}
}

/// Fixed parameters shared by every token a builder produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSettings {
	/// API host embedded in the scope claim, without scheme.
	pub host: String,
	/// Validity window measured from the issued-at instant.
	pub ttl: Duration,
	/// Audience claim.
	pub audience: Vec<String>,
	/// Issuer override; the key identifier is used when `None`.
	pub issuer: Option<String>,
}
impl TokenSettings {
	/// Host of the Advanced Trade REST API.
	pub const DEFAULT_HOST: &str = "api.coinbase.com";
	/// Audience expected by the Advanced Trade REST proxy.
	pub const DEFAULT_AUDIENCE: &str = "retail_rest_api_proxy";
	/// Default validity window.
	pub const DEFAULT_TTL: Duration = Duration::seconds(120);
	/// Longest validity window the builder accepts.
	pub const MAX_TTL: Duration = Duration::minutes(10);

	/// Overrides the API host.
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();

		self
	}

	/// Overrides the validity window.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;

		self
	}

	/// Overrides the audience claim.
	pub fn with_audience<I, S>(mut self, audience: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.audience = audience.into_iter().map(Into::into).collect();

		self
	}

	/// Sets a fixed issuer instead of the key identifier.
	pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());

		self
	}

	/// Checks host and TTL bounds.
	pub fn validate(&self) -> Result<(), TokenError> {
		if self.host.is_empty() || self.host.chars().any(char::is_whitespace) {
			return Err(TokenError::InvalidSettings {
				reason: "host must be non-empty without whitespace",
			});
		}
		if self.host.contains("://") || self.host.ends_with('/') {
			return Err(TokenError::InvalidSettings {
				reason: "host must not carry a scheme or trailing slash",
			});
		}
		if self.ttl < Duration::SECOND {
			return Err(TokenError::InvalidSettings { reason: "ttl must be at least one second" });
		}
		if self.ttl > Self::MAX_TTL {
			return Err(TokenError::InvalidSettings { reason: "ttl must not exceed ten minutes" });
		}

		Ok(())
	}
}
impl Default for TokenSettings {
	fn default() -> Self {
		Self {
			host: Self::DEFAULT_HOST.into(),
			ttl: Self::DEFAULT_TTL,
			audience: vec![Self::DEFAULT_AUDIENCE.into()],
			issuer: None,
		}
	}
}

/// Signed, request-scoped bearer token.
#[derive(Clone, Debug)]
pub struct AuthToken {
	/// Compact `header.payload.signature` form.
	pub compact: TokenSecret,
	/// Decoded protected header.
	pub header: TokenHeader,
	/// Decoded payload claims.
	pub claims: TokenClaims,
	/// Request the token authorizes.
	pub scope: RequestScope,
}
impl AuthToken {
	/// Returns the compact token. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		self.compact.expose()
	}

	/// Returns the `Authorization` header value.
	pub fn bearer(&self) -> String {
		self.compact.bearer()
	}

	/// Instant after which the server rejects the token.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.claims.exp
	}
}

/// Capability that turns a method, path, and raw credentials into a scoped token.
pub trait ScopedTokenSigner
where
	Self: Send + Sync,
{
	/// Builds a token authorizing exactly `method` on `path`.
	///
	/// Implementations must reject empty credentials with [`TokenError::MissingCredential`]
	/// and must drop any query string from `path` before scoping.
	fn build_scoped_token(
		&self,
		method: HttpMethod,
		path: &str,
		key_id: &str,
		private_key: &str,
	) -> Result<AuthToken, TokenError>;
}
impl dyn ScopedTokenSigner {
	/// Builds a token from a validated credential pair.
	pub fn build_for(
		&self,
		method: HttpMethod,
		path: &str,
		credentials: &Credentials,
	) -> Result<AuthToken, TokenError> {
		self.build_scoped_token(method, path, &credentials.key_name, credentials.private_key.expose())
	}
}

/// Production [`ScopedTokenSigner`] signing with ECDSA P-256 / SHA-256.
#[derive(Clone, Debug, Default)]
pub struct Es256TokenBuilder {
	settings: TokenSettings,
}
impl Es256TokenBuilder {
	/// Creates a builder after validating `settings`.
	pub fn new(settings: TokenSettings) -> Result<Self, TokenError> {
		settings.validate()?;

		Ok(Self { settings })
	}

	/// Settings applied to every token.
	pub fn settings(&self) -> &TokenSettings {
		&self.settings
	}

	/// Builds a token as of `now` instead of the wall clock.
	pub fn build_at(
		&self,
		method: HttpMethod,
		path: &str,
		key_id: &str,
		private_key: &str,
		now: OffsetDateTime,
	) -> Result<AuthToken, TokenError> {
		let key_id = key_id.trim();

		if key_id.is_empty() {
			return Err(TokenError::MissingCredential { field: CredentialField::KeyName });
		}
		if private_key.trim().is_empty() {
			return Err(TokenError::MissingCredential { field: CredentialField::PrivateKey });
		}

		let signing_key = SigningKey::from(&parse_secret_key(private_key)?);
		let scope = RequestScope::new(method, self.settings.host.as_str(), path);
		let nonce = hex::encode(rand::random::<[u8; 32]>());
		let issued_at = now - Duration::nanoseconds(i64::from(now.nanosecond()));
		let header = TokenHeader::es256(key_id, nonce.as_str());
		let claims = TokenClaims {
			iss: self.settings.issuer.clone().unwrap_or_else(|| key_id.to_owned()),
			sub: key_id.to_owned(),
			aud: self.settings.audience.clone(),
			iat: issued_at,
			nbf: issued_at,
			exp: issued_at + self.settings.ttl,
			nonce,
			uri: scope.claim(),
		};
		let signing_input =
			format!("{}.{}", claims::encode_segment(&header)?, claims::encode_segment(&claims)?);
		let signature: Signature =
			signing_key.try_sign(signing_input.as_bytes()).map_err(TokenError::signing)?;
		let compact = format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature.to_bytes()));

		Ok(AuthToken { compact: TokenSecret::new(compact), header, claims, scope })
	}
}
impl ScopedTokenSigner for Es256TokenBuilder {
	fn build_scoped_token(
		&self,
		method: HttpMethod,
		path: &str,
		key_id: &str,
		private_key: &str,
	) -> Result<AuthToken, TokenError> {
		self.build_at(method, path, key_id, private_key, OffsetDateTime::now_utc())
	}
}
