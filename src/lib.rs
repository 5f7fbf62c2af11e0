#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
//! # hfapi
//!
//! hfapi is a thin async wrapper around the Hack Forums REST API.
//!
//! It can fetch:
//! - users (one or many at once)
//! - categories, forums, threads and posts
//! - private messages and message boxes
//! - groups
//!
//! Response bodies are handed back as parsed JSON ([`Payload`]) without
//! being modelled further.
//!
//! While keeping track of:
//! - how many requests were sent within the API's one hour rate-limit window.
//! - whether upstream rejected the API key, which is reported as
//!   [`Error::InvalidApiKey`] and not counted.
//!
//! ## Example: Printing a user's name.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use hfapi::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new("my-api-key")?;
//!
//!     let user = client.user(2240993).await?;
//!     if let Some(name) = user.result().and_then(|r| r["username"].as_str()) {
//!         println!("user: {name}");
//!     }
//!
//!     println!("requests this hour: {}", client.request_count());
//!     Ok(())
//! }
//! ```
//!
//! [`Error::InvalidApiKey`]: crate::error::Error::InvalidApiKey

/// Client module contains [`Client`] for sending requests.
pub mod client;

/// Client settings and their defaults.
pub mod config;

/// Contains [`Error`]s that can be returned by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// The [`Transport`] seam between the client and HTTP.
///
/// [`Transport`]: crate::http::Transport
pub mod http;

pub(crate) mod models;

/// Endpoint paths and request descriptors.
pub mod request;

pub(crate) mod result;

pub mod window;

pub use client::Client;
pub use error::Error;
pub use models::payload::Payload;
pub use request::Endpoint;
pub use result::Result;
pub use window::RequestCounter;
