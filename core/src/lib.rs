//! Base building blocks for synchronous JSON API client SDKs.
//!
//! # Overview
//! An SDK wraps an `ApiClient` and adds one method per endpoint. The client
//! composes requests, a `Transport` executes them, and `handle_response`
//! turns each response into a decoded JSON object or a typed `HttpError`.
//!
//! # Design
//! - `Config` is validated once and never changes afterwards.
//! - `Transport` is the only trait; `UreqTransport` is the default and tests
//!   substitute scripted doubles.
//! - Status classification happens before body decoding: 5xx and 4xx are
//!   errors whatever the body looks like.
//! - Every failure is a typed error carrying structured context
//!   (`HttpError` status + body, `ValidationError` per-field messages).
//! - `Settings` is the only code that reads the environment.
//!
//! ```no_run
//! use sdk_core::{ApiClient, Config, HttpError, JsonObject};
//!
//! struct UsersApi {
//!     client: ApiClient,
//! }
//!
//! impl UsersApi {
//!     fn get_user(&self, id: u64) -> Result<JsonObject, HttpError> {
//!         self.client.get(&format!("/users/{id}"), &[], &[])
//!     }
//! }
//!
//! let config = Config::new("https://api.example.com", true)?;
//! let users = UsersApi { client: ApiClient::new(config) };
//! let _user = users.get_user(1)?;
//! # Ok::<(), sdk_core::SdkError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod settings;
pub mod transport;

/// A decoded top-level JSON object.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub use client::{handle_response, ApiClient};
pub use config::Config;
pub use error::{ConfigError, HttpError, SdkError, SdkResult, ValidationError};
pub use http::{HttpMethod, HttpRequest, UnknownMethod};
pub use response::HttpResponse;
pub use settings::Settings;
pub use transport::{Transport, UreqTransport};
