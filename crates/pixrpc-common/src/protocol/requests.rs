use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

pub type RequestId = u64;

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Typed payload for each of the four service procedures.
///
/// The binary transport carries these directly; the HTTP transport builds
/// the same values after validating its JSON bodies, so both entry points
/// reach the handlers with identical typed data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RpcRequest {
    /// Integer addition of `a` and `b`
    Add { a: i64, b: i64 },
    /// Probe the dimensions of a raw encoded image
    RawImage { img: Vec<u8> },
    /// Dot product of two equal-length vectors
    DotProduct { a: Vec<f64>, b: Vec<f64> },
    /// Probe the dimensions of a base64-encoded image
    JsonImage { img: String },
}

impl RpcRequest {
    /// Wire-level name of the operation, used for logging.
    pub fn operation(&self) -> &'static str {
        match self {
            RpcRequest::Add { .. } => "add",
            RpcRequest::RawImage { .. } => "rawimage",
            RpcRequest::DotProduct { .. } => "dotproduct",
            RpcRequest::JsonImage { .. } => "jsonimage",
        }
    }
}

/// Request envelope sent over the binary transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    pub id: RequestId,
    pub op: RpcRequest,
}

impl Request {
    pub fn new(op: RpcRequest) -> Self {
        Request {
            id: generate_request_id(),
            op,
        }
    }
}

fn generate_request_id() -> RequestId {
    // Try to use system time as the base
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    // Always increment the counter to ensure uniqueness
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst);

    // Combine timestamp and counter: upper 32 bits of the timestamp,
    // lower 32 bits of the counter
    (timestamp & 0xFFFFFFFF00000000) | (counter & 0xFFFFFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = Request::new(RpcRequest::Add { a: 1, b: 2 });
        let b = Request::new(RpcRequest::Add { a: 1, b: 2 });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(RpcRequest::Add { a: 0, b: 0 }.operation(), "add");
        assert_eq!(RpcRequest::RawImage { img: vec![] }.operation(), "rawimage");
        assert_eq!(
            RpcRequest::DotProduct { a: vec![], b: vec![] }.operation(),
            "dotproduct"
        );
        assert_eq!(
            RpcRequest::JsonImage { img: String::new() }.operation(),
            "jsonimage"
        );
    }
}
