//! The four operation handlers.
//!
//! Each handler is a pure function of its request: validation and
//! computation live here, transport concerns do not. Both adapters (binary
//! and HTTP) call into these functions, which is what keeps the two
//! transports behaviorally identical.
//!
//! Error policy: request-shape violations (length mismatch, missing or
//! empty field, malformed base64) return a structured [`RpcError`]; an
//! image payload that fails to *decode* collapses to the sentinel reply
//! `{width: 0, height: 0}` via [`dimensions_or_zero`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use pixrpc_common::protocol::{RpcError, RpcReply};

use crate::probe::{self, DecodeError, Dimensions};

pub type OpResult = std::result::Result<RpcReply, RpcError>;

/// Integer addition. Fails with an overflow error instead of wrapping.
pub fn add(a: i64, b: i64) -> OpResult {
    match a.checked_add(b) {
        Some(sum) => Ok(RpcReply::Sum { sum }),
        None => Err(RpcError::overflow()),
    }
}

/// Dot product of two equal-length vectors.
///
/// Element types are guaranteed numeric by both boundaries: the binary
/// wire schema types them as `f64`, and the HTTP adapter deserializes
/// into `Vec<f64>` before calling in.
pub fn dot_product(a: &[f64], b: &[f64]) -> OpResult {
    if a.len() != b.len() {
        return Err(RpcError::invalid_argument("vectors must be the same length"));
    }

    let dotproduct = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok(RpcReply::DotProduct { dotproduct })
}

/// Probe the dimensions of a raw encoded image.
pub fn raw_image(img: &[u8]) -> OpResult {
    Ok(dimensions_or_zero(probe::probe(img)))
}

/// Probe the dimensions of a base64-encoded image.
///
/// An absent or empty payload and malformed base64 are request-shape
/// errors; only a genuine decode failure of the decoded bytes degrades to
/// the sentinel.
pub fn json_image(img: &str) -> OpResult {
    if img.is_empty() {
        return Err(RpcError::invalid_argument(
            "missing or empty 'image' (base64 string) payload",
        ));
    }

    let bytes = BASE64
        .decode(img)
        .map_err(|e| RpcError::invalid_argument(format!("invalid base64 image payload: {}", e)))?;

    Ok(dimensions_or_zero(probe::probe(&bytes)))
}

/// Collapses a probe result into an image reply.
///
/// This is the single place where `DecodeError` turns into the `{0, 0}`
/// sentinel; both image operations route through it so the soft-failure
/// policy stays in one visible, testable spot.
pub fn dimensions_or_zero(result: Result<Dimensions, DecodeError>) -> RpcReply {
    match result {
        Ok(dims) => RpcReply::Image {
            width: dims.width,
            height: dims.height,
        },
        Err(e) => {
            tracing::debug!("image probe failed: {}", e);
            RpcReply::Image { width: 0, height: 0 }
        }
    }
}
