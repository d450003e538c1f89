//! Request scoping: the HTTP methods a token may authorize and the `uri` claim that binds a token
//! to one method, host, and path.

// self
use crate::_prelude::*;

/// HTTP methods accepted by the exchange's REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the canonical upper-case method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = UnsupportedMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(HttpMethod::Get),
			"POST" => Ok(HttpMethod::Post),
			"PUT" => Ok(HttpMethod::Put),
			"DELETE" => Ok(HttpMethod::Delete),
			_ => Err(UnsupportedMethod { method: s.to_owned() }),
		}
	}
}

/// Error returned when parsing a method outside [`HttpMethod`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("HTTP method `{method}` is not supported.")]
pub struct UnsupportedMethod {
	/// The rejected method string.
	pub method: String,
}

/// Method, host, and query-free path a token is allowed to authorize.
///
/// The rendered form, `"<METHOD> <host><path>"`, is the `uri` claim the exchange compares against
/// the incoming request. Query strings are never part of the signed scope, so any `?...` suffix
/// on the input path is dropped here rather than trusted to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestScope {
	/// HTTP method of the authorized request.
	pub method: HttpMethod,
	/// API host, without scheme.
	pub host: String,
	/// Request path without query string.
	pub path: String,
}
impl RequestScope {
	/// Builds a scope, stripping any query string from `path`.
	pub fn new(method: HttpMethod, host: impl Into<String>, path: &str) -> Self {
		Self { method, host: host.into(), path: strip_query(path).to_owned() }
	}

	/// Renders the `uri` claim value.
	pub fn claim(&self) -> String {
		format!("{} {}{}", self.method, self.host, self.path)
	}
}
impl Display for RequestScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}{}", self.method, self.host, self.path)
	}
}

/// Returns `path` up to (not including) the first `?`.
pub fn strip_query(path: &str) -> &str {
	match path.split_once('?') {
		Some((head, _)) => head,
		None => path,
	}
}
