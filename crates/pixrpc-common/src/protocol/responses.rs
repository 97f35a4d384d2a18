//! RPC response types.
//!
//! A [`Response`] either carries a typed [`RpcReply`] or a structured
//! [`RpcError`]; never both. Decode failures of image payloads are *not*
//! errors at this level — they surface as the sentinel
//! `RpcReply::Image { width: 0, height: 0 }` (probe failure yields zero
//! dimensions).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RequestId;

/// Typed reply for each of the four service procedures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RpcReply {
    /// Reply to `Add`
    Sum { sum: i64 },
    /// Reply to `RawImage` and `JsonImage`; `{0, 0}` is the sentinel for
    /// a payload that could not be decoded as an image
    Image { width: u32, height: u32 },
    /// Reply to `DotProduct`
    DotProduct { dotproduct: f64 },
}

/// Category of a structured RPC failure.
///
/// These are protocol-level errors; both transports surface them to the
/// caller (invalid-argument status on the binary transport, 4xx on HTTP)
/// rather than masking them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or mismatched request shape (length mismatch, missing
    /// field, wrong field type, malformed base64)
    InvalidArgument,
    /// Integer addition overflowed the reply width
    Overflow,
    /// Anything that is not the caller's fault
    Internal,
}

/// A structured RPC failure, carried in the [`Response`] envelope.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[error("{message}")]
pub struct RpcError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RpcError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn overflow() -> Self {
        Self {
            kind: ErrorKind::Overflow,
            message: "integer overflow in addition".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

/// Response envelope returned over the binary transport.
///
/// # Example
///
/// ```
/// use pixrpc_common::protocol::{Response, RpcError, RpcReply};
///
/// let ok = Response::success(123, RpcReply::Sum { sum: 15 });
/// assert!(ok.is_success());
///
/// let err = Response::error(123, RpcError::invalid_argument("bad input"));
/// assert!(!err.is_success());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Request identifier this response corresponds to
    pub id: RequestId,
    /// Reply value (present on success)
    pub reply: Option<RpcReply>,
    /// Structured error (present on failure)
    pub error: Option<RpcError>,
}

impl Response {
    /// Creates a successful response.
    pub fn success(id: RequestId, reply: RpcReply) -> Self {
        Response {
            id,
            reply: Some(reply),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(id: RequestId, error: RpcError) -> Self {
        Response {
            id,
            reply: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = Response::success(7, RpcReply::Sum { sum: 15 });
        assert!(response.is_success());
        assert_eq!(response.reply, Some(RpcReply::Sum { sum: 15 }));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_error_response() {
        let response = Response::error(7, RpcError::invalid_argument("bad input"));
        assert!(!response.is_success());
        assert_eq!(response.reply, None);
        let error = response.error.unwrap();
        assert_eq!(error.kind, ErrorKind::InvalidArgument);
        assert_eq!(error.message, "bad input");
    }

    #[test]
    fn test_error_constructors() {
        assert_eq!(
            RpcError::invalid_argument("x").kind,
            ErrorKind::InvalidArgument
        );
        assert_eq!(RpcError::overflow().kind, ErrorKind::Overflow);
        assert_eq!(RpcError::internal("x").kind, ErrorKind::Internal);
    }

    #[test]
    fn test_error_display_is_message() {
        let error = RpcError::invalid_argument("vectors must be the same length");
        assert_eq!(error.to_string(), "vectors must be the same length");
    }
}
