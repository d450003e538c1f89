//! Request-scoped ES256 JWT signing for the Coinbase Advanced Trade REST API, plus a thin typed
//! client and an endpoint probe built on top of it.
//!
//! The core is [`auth::Es256TokenBuilder`]: a pure, synchronous builder that turns an HTTP
//! method, a request path, and a credential pair into a short-lived bearer token whose `uri`
//! claim binds it to exactly one request. Everything else (configuration, transport, typed
//! responses) is glue around that builder.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod probe;
pub mod rest;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
