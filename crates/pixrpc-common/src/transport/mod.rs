//! PixRPC Transport Layer
//!
//! This module provides the TCP transport and codec for sending and
//! receiving RPC messages.
//!
//! # Architecture
//!
//! - **Codec**: postcard serialization of the typed protocol envelopes
//! - **Wire Format**: `[4-byte length prefix as u32 big-endian] + [postcard data]`
//! - **[`TcpTransport`]**: synchronous client-side transport (used by the
//!   benchmark client)
//! - **[`TcpServer`]**: async server accept loop (used by the service)
//!
//! # Message Size Limits
//!
//! All transport implementations enforce a maximum message size of 100 MB
//! to prevent memory exhaustion attacks.

pub mod codec;
pub mod tcp;
pub mod tcp_server;

pub use codec::{Codec, PostcardCodec};
pub use tcp::TcpTransport;
pub use tcp_server::TcpServer;

/// Maximum wire message size (100 MB).
pub const MAX_MESSAGE_SIZE: usize = 100 * 1024 * 1024;
