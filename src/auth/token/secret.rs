//! Redacted wrapper for compact tokens so signed credentials stay out of logs.

// self
use crate::_prelude::*;

/// Compact serialized token (`header.payload.signature`) that redacts itself when formatted.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a compact token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns the `Authorization` header value for this token.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}

	/// Returns at most the first `len` characters, for diagnostics that must not print the
	/// whole token.
	pub fn prefix(&self, len: usize) -> &str {
		match self.0.char_indices().nth(len) {
			Some((idx, _)) => &self.0[..idx],
			None => &self.0,
		}
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("header.payload.signature");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.bearer(), "Bearer header.payload.signature");
	}

	#[test]
	fn prefix_is_bounded_by_length() {
		let secret = TokenSecret::new("eyJhbGciOiJFUzI1NiJ9");

		assert_eq!(secret.prefix(6), "eyJhbG");
		assert_eq!(secret.prefix(100), "eyJhbGciOiJFUzI1NiJ9");
	}
}
