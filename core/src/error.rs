//! Error types for SDK clients.
//!
//! # Design
//! Three failure carriers, each a plain struct so callers can branch on the
//! structured fields instead of parsing messages:
//!
//! - `ConfigError` — invalid configuration at construction time.
//! - `HttpError` — a non-success response, an undecodable body, or no
//!   response at all (`status_code == 0`).
//! - `ValidationError` — field-keyed input problems, built by SDK code.
//!
//! `SdkError` closes the set so SDK methods that can fail in more than one
//! way still return a single matchable type.

use std::collections::HashMap;

use thiserror::Error;

use crate::response::decode_object;
use crate::JsonObject;

/// Result alias for SDK operations that may fail in any of the three ways.
pub type SdkResult<T> = Result<T, SdkError>;

/// Configuration supplied at construction time was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An HTTP exchange failed.
///
/// `status_code` is 0 when no response was received at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpError {
    message: String,
    status_code: u16,
    response_body: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status_code: u16, response_body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_body: response_body.into(),
        }
    }

    /// No response could be obtained from the server.
    pub fn connection_failed() -> Self {
        Self::new("Failed to connect to server", 0, "")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn response_body(&self) -> &str {
        &self.response_body
    }

    pub fn is_connection_failure(&self) -> bool {
        self.status_code == 0
    }

    /// Decode the response body as a JSON object, if it is one.
    pub fn decoded_response(&self) -> Option<JsonObject> {
        decode_object(&self.response_body)
    }
}

/// Input validation failed for one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    errors: HashMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    /// A required field was missing.
    pub fn required(field: &str) -> Self {
        let message = format!("The {field} field is required");
        let errors = HashMap::from([(field.to_string(), vec![message.clone()])]);
        Self { message, errors }
    }

    /// A field was present but its value was rejected.
    pub fn invalid(field: &str, reason: &str) -> Self {
        Self {
            message: format!("The {field} field is invalid: {reason}"),
            errors: HashMap::from([(field.to_string(), vec![reason.to_string()])]),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages recorded for `field`, empty if there are none.
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        !self.field_errors(field).is_empty()
    }
}

/// Any failure an SDK operation can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
