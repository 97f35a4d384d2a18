//! PixRPC Common Types and Transport
//!
//! This crate provides the protocol definitions and TCP transport layer
//! shared by the PixRPC server, client and CLI.
//!
//! # Overview
//!
//! PixRPC is a small dual-transport RPC service exposing four procedures
//! (integer addition, vector dot product, and image-dimension probing from
//! raw or base64-encoded payloads). This crate contains the pieces every
//! component agrees on:
//!
//! - **Protocol Layer**: typed request/reply payloads, the request/response
//!   envelope, and the error taxonomy
//! - **Transport Layer**: length-prefixed TCP framing with a postcard codec
//!
//! # Wire Protocol
//!
//! - **Transport**: TCP with keep-alive connections
//! - **Serialization**: postcard (compact, strongly typed)
//! - **Message Format**: `[4-byte length prefix as u32 big-endian] + [postcard data]`
//! - **Max Message Size**: 100 MB (prevents memory exhaustion)
//!
//! # Example
//!
//! ```no_run
//! use pixrpc_common::{Request, Response, RpcRequest, RpcReply};
//!
//! // Create a request
//! let request = Request::new(RpcRequest::Add { a: 5, b: 10 });
//!
//! // Process and create a response
//! let response = Response::success(request.id, RpcReply::Sum { sum: 15 });
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::*;
