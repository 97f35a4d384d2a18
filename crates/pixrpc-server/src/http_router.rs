//! JSON/HTTP route table.
//!
//! Path-routed REST surface over the same four handlers as the binary
//! transport:
//!
//! - `GET/POST /api/add/{a}/{b}`
//! - `POST /api/rawimage` (raw image bytes body)
//! - `POST /api/dotproduct` (`{"a": [...], "b": [...]}`)
//! - `POST /api/jsonimage` (`{"image": "<base64>"}`)
//!
//! The route set is a static match resolved at compile time; nothing is
//! registered or mutated at runtime. The router takes pre-collected body
//! bytes so it can be exercised in tests without a live socket.
//!
//! Status mapping: structured handler errors (invalid argument, overflow)
//! are 400 with an `{"error": ...}` body on every endpoint; image decode
//! failures stay 200 with the `{0, 0}` sentinel body, mirroring the binary
//! transport's soft-failure policy.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use pixrpc_common::protocol::{ErrorKind, RpcError, RpcReply};

use crate::ops;

/// Type alias for HTTP responses with a full body
pub type HyperResponse = Response<Full<Bytes>>;

/// JSON body for `POST /api/dotproduct`.
///
/// Deserializing into typed vectors is the explicit element-type check the
/// JSON boundary needs: non-numeric elements and missing fields are
/// rejected here, before the handler runs.
#[derive(Debug, Deserialize)]
struct DotProductParams {
    a: Vec<f64>,
    b: Vec<f64>,
}

/// JSON body for `POST /api/jsonimage`.
#[derive(Debug, Deserialize)]
struct JsonImageParams {
    image: String,
}

pub struct ApiRouter;

impl ApiRouter {
    /// Dispatches one HTTP request to its operation handler.
    pub fn dispatch(method: &Method, path: &str, body: Bytes) -> HyperResponse {
        if let Some(args) = path.strip_prefix("/api/add/") {
            return match *method {
                Method::GET | Method::POST => Self::add(args),
                _ => method_not_allowed(),
            };
        }

        match path {
            "/api/rawimage" => match *method {
                Method::POST => Self::raw_image(&body),
                _ => method_not_allowed(),
            },
            "/api/dotproduct" => match *method {
                Method::POST => Self::dot_product(&body),
                _ => method_not_allowed(),
            },
            "/api/jsonimage" => match *method {
                Method::POST => Self::json_image(&body),
                _ => method_not_allowed(),
            },
            _ => not_found(),
        }
    }

    /// `GET/POST /api/add/{a}/{b}` — the request body is ignored.
    ///
    /// Non-integer path segments are a routing miss (404), matching how
    /// the original wire format treated its typed path parameters. The
    /// `sum` field stays string-typed for the same reason.
    fn add(args: &str) -> HyperResponse {
        let segments: Vec<&str> = args.split('/').collect();
        let (a, b) = match segments.as_slice() {
            [a, b] => match (a.parse::<i64>(), b.parse::<i64>()) {
                (Ok(a), Ok(b)) => (a, b),
                _ => return not_found(),
            },
            _ => return not_found(),
        };

        match ops::add(a, b) {
            Ok(RpcReply::Sum { sum }) => json_response(
                StatusCode::OK,
                &json!({ "sum": sum.to_string() }),
            ),
            Ok(_) => unreachable_reply(),
            Err(error) => rpc_error_response(error),
        }
    }

    /// `POST /api/rawimage` — body is the raw encoded image.
    fn raw_image(body: &Bytes) -> HyperResponse {
        match ops::raw_image(body) {
            Ok(reply) => image_response(reply),
            Err(error) => rpc_error_response(error),
        }
    }

    /// `POST /api/dotproduct` — body is `{"a": [...], "b": [...]}`.
    fn dot_product(body: &Bytes) -> HyperResponse {
        let params: DotProductParams = match serde_json::from_slice(body) {
            Ok(params) => params,
            Err(e) => return rpc_error_response(RpcError::invalid_argument(e.to_string())),
        };

        match ops::dot_product(&params.a, &params.b) {
            Ok(RpcReply::DotProduct { dotproduct }) => {
                json_response(StatusCode::OK, &json!({ "dotproduct": dotproduct }))
            }
            Ok(_) => unreachable_reply(),
            Err(error) => rpc_error_response(error),
        }
    }

    /// `POST /api/jsonimage` — body is `{"image": "<base64>"}`.
    fn json_image(body: &Bytes) -> HyperResponse {
        let params: JsonImageParams = match serde_json::from_slice(body) {
            Ok(params) => params,
            Err(e) => return rpc_error_response(RpcError::invalid_argument(e.to_string())),
        };

        match ops::json_image(&params.image) {
            Ok(reply) => image_response(reply),
            Err(error) => rpc_error_response(error),
        }
    }
}

/// Builds a JSON response with the given status code.
fn json_response(status: StatusCode, value: &serde_json::Value) -> HyperResponse {
    let body = serde_json::to_vec(value).unwrap_or_default();

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

/// Builds an `{"error": ...}` response with the given status code.
pub fn error_response(status: StatusCode, message: &str) -> HyperResponse {
    json_response(status, &json!({ "error": message }))
}

/// Maps a structured handler error onto its HTTP status.
fn rpc_error_response(error: RpcError) -> HyperResponse {
    let status = match error.kind {
        ErrorKind::InvalidArgument | ErrorKind::Overflow => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &error.message)
}

/// Success body for the image endpoints; the sentinel `{0, 0}` rides the
/// same 200 path as a real probe result.
fn image_response(reply: RpcReply) -> HyperResponse {
    match reply {
        RpcReply::Image { width, height } => json_response(
            StatusCode::OK,
            &json!({ "width": width, "height": height }),
        ),
        _ => unreachable_reply(),
    }
}

fn not_found() -> HyperResponse {
    error_response(StatusCode::NOT_FOUND, "not found")
}

fn method_not_allowed() -> HyperResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

/// A handler returned a reply variant that does not belong to its
/// operation; surfaces as a 500 rather than a worker panic.
fn unreachable_reply() -> HyperResponse {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal reply mismatch")
}
