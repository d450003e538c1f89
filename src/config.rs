//! Explicit client configuration, populated once at startup and passed by reference.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, PrivateKeyPem, TokenSettings},
	error::ConfigError,
};

/// Environment variable holding the API key identifier.
pub const API_KEY_ENV: &str = "COINBASE_API_KEY";
/// Environment variable holding the PEM private key, usually with escaped newlines.
pub const API_SECRET_ENV: &str = "COINBASE_API_SECRET";

/// Everything the REST client needs: credentials, where to send requests, and how to scope
/// tokens.
///
/// `base_url` is where requests go; `token.host` is what tokens are scoped to. They match in
/// production and diverge when a mock server stands in for the exchange.
#[derive(Clone, Debug)]
pub struct Config {
	/// Credential pair used for authenticated endpoints.
	pub credentials: Credentials,
	/// Scheme and authority requests are sent to.
	pub base_url: Url,
	/// Per-request timeout applied by the transport.
	pub timeout: Duration,
	/// Token builder settings.
	pub token: TokenSettings,
}
impl Config {
	/// Production REST endpoint.
	pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";
	/// Request timeout used when none is configured.
	pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(10);

	/// Creates a configuration with production defaults.
	pub fn new(credentials: Credentials) -> Result<Self> {
		let base_url = Url::parse(Self::DEFAULT_BASE_URL)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self {
			credentials,
			base_url,
			timeout: Self::DEFAULT_TIMEOUT,
			token: TokenSettings::default(),
		})
	}

	/// Reads credentials from the process environment.
	///
	/// See [`Config::from_lookup`] for the exact rules.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads credentials through `lookup`, which maps a variable name to its value.
	///
	/// Escaped `\n` sequences in the private key are unescaped. Absent or blank values fail
	/// with [`crate::auth::TokenError::MissingCredential`].
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let key_name = lookup(API_KEY_ENV).unwrap_or_default();
		let private_key = PrivateKeyPem::from_escaped(lookup(API_SECRET_ENV).unwrap_or_default());

		Self::new(Credentials::new(key_name, private_key)?)
	}

	/// Overrides the base URL; only `http` and `https` are accepted.
	pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
		let url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: url.to_string() }.into());
		}

		self.base_url = url;

		Ok(self)
	}

	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the token settings after validating them.
	pub fn with_token_settings(mut self, token: TokenSettings) -> Result<Self> {
		token.validate()?;

		self.token = token;

		Ok(self)
	}

	/// Joins `path_and_query` onto the base URL.
	pub fn endpoint_url(&self, path_and_query: &str) -> Result<Url> {
		self.base_url
			.join(path_and_query)
			.map_err(|source| ConfigError::InvalidBaseUrl { source }.into())
	}
}
