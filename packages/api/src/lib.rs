//! # API crate: Streamline backend client
//!
//! Everything the console says to the REST backend goes through [`ApiClient`].
//! The client is generic over its [`Transport`] (reqwest in the browser, a
//! recording mock in tests) and over the [`store::SessionStorage`] it reads the
//! bearer token from.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | Request/response types, the `Transport` trait, reqwest implementation |
//! | [`client`] | Header attachment from the stored session, response checking, `data` envelopes |
//! | [`endpoints`] | One typed method per backend call |
//! | [`actions`] | Mutating user flows returning a notification-ready [`Outcome`] |
//! | [`error`] | [`ApiError`] |
//!
//! ## Session headers
//!
//! `Authorization: Bearer <token>` is attached to every request while a token
//! is stored, and never when it isn't. The informational `user_id`,
//! `user_email` and `user_name` headers are only sent when
//! `api.send_identity_headers` is enabled in `streamline.toml`.

pub mod actions;
pub mod client;
pub mod endpoints;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
mod mock;
pub mod transport;

pub use actions::{CsvExport, Outcome};
pub use client::ApiClient;
pub use error::ApiError;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
