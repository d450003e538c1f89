//! Request-scoped bearer tokens: claims, the redacted compact form, and the signer that builds
//! them.

pub mod builder;
pub mod claims;
pub mod secret;
