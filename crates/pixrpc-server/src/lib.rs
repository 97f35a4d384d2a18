//! PixRPC Server
//!
//! This crate implements the four service operations (add, dot product,
//! raw/base64 image probing) and exposes them over two transports with
//! identical semantics:
//!
//! - the binary transport ([`service::RpcService`]), and
//! - the JSON/HTTP transport ([`http_server::HttpServer`] routing through
//!   [`http_router::ApiRouter`]).
//!
//! The handlers in [`ops`] are pure functions shared by both adapters; the
//! adapters own only (de)serialization and status-code mapping.

pub mod http_router;
pub mod http_server;
pub mod ops;
pub mod probe;
pub mod service;

pub use http_server::HttpServer;
pub use service::RpcService;
