//! Credentials, request scoping, and the ES256 token builder.

pub mod credential;
pub mod scope;
pub mod token;

pub use credential::*;
pub use scope::*;
pub use token::{builder::*, claims::*, secret::*};
