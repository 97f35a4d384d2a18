use std::net::TcpStream;

use pixrpc_common::protocol::error::{PixrpcError, Result};
use pixrpc_common::protocol::{Request, RpcReply, RpcRequest};
use pixrpc_common::transport::TcpTransport;

/// PixRPC client over the binary transport.
///
/// Holds one long-lived TCP connection, reused across calls; the benchmark
/// loop deliberately avoids reconnect-per-call so the measured latency is
/// the round trip, not connection setup.
pub struct RpcClient {
    stream: TcpStream,
    transport: TcpTransport,
}

impl RpcClient {
    /// Connects to a server at `addr` (e.g. "127.0.0.1:5000").
    pub fn connect(addr: &str) -> Result<Self> {
        let transport = TcpTransport::new()?;
        let stream = transport.connect(addr)?;

        Ok(Self { stream, transport })
    }

    /// Invokes one operation and waits synchronously for its reply.
    ///
    /// A response carrying a structured error becomes
    /// [`PixrpcError::Rpc`]; a success response with no reply payload is
    /// an [`PixrpcError::InvalidResponse`].
    pub fn call(&mut self, op: RpcRequest) -> Result<RpcReply> {
        let request = Request::new(op);

        let response = self.transport.send_request(&mut self.stream, &request)?;

        if let Some(error) = response.error {
            return Err(PixrpcError::Rpc(error));
        }

        response.reply.ok_or_else(|| {
            PixrpcError::InvalidResponse("missing reply in success response".to_string())
        })
    }
}
