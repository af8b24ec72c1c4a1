//! Response definitions
//!
//! Represents responses to clients.

use crate::error::DbError;

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Text sent on the wire
    pub payload: String,

    /// Whether the payload is an error message. Not transmitted.
    pub is_error: bool,
}

impl Response {
    /// Create a successful response
    pub fn ok(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            is_error: false,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            payload: message.into(),
            is_error: true,
        }
    }
}

impl From<&DbError> for Response {
    fn from(err: &DbError) -> Self {
        Response::error(err.client_message())
    }
}
