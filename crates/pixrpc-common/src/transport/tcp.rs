use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::protocol::error::{PixrpcError, Result};
use crate::protocol::{Request, Response};
use crate::transport::codec::PostcardCodec;
use crate::transport::MAX_MESSAGE_SIZE;

/// Default timeout for TCP operations (5 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Synchronous TCP transport for PixRPC clients.
///
/// The benchmark client drives exactly one call at a time, so blocking I/O
/// with built-in timeouts is the natural fit. The configured read/write
/// timeouts bound a stuck call instead of hanging the run forever.
///
/// # Wire Protocol
///
/// Messages are sent with a 4-byte length prefix (big-endian u32) followed
/// by the postcard-encoded data:
///
/// ```text
/// [4-byte length] [postcard data]
/// ```
///
/// # Example
///
/// ```no_run
/// use pixrpc_common::transport::TcpTransport;
/// use pixrpc_common::protocol::{Request, RpcRequest};
///
/// let transport = TcpTransport::new().unwrap();
/// let mut stream = transport.connect("127.0.0.1:5000").unwrap();
///
/// let request = Request::new(RpcRequest::Add { a: 5, b: 10 });
/// let response = transport.send_request(&mut stream, &request).unwrap();
/// ```
pub struct TcpTransport;

impl TcpTransport {
    /// Creates a new TCP transport instance.
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    /// Connects to a remote endpoint.
    ///
    /// Resolves the address (which may resolve to multiple addresses) and
    /// attempts to connect to each until one succeeds. The returned stream
    /// has read and write timeouts configured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The address cannot be parsed
    /// - Connection fails to all resolved addresses
    /// - Timeouts cannot be set on the stream
    pub fn connect(&self, addr: &str) -> Result<TcpStream> {
        let socket_addrs = addr
            .to_socket_addrs()
            .map_err(|e| PixrpcError::Connection(format!("Invalid address '{}': {}", addr, e)))?;

        // Try each resolved address until one succeeds
        let mut last_err = None;
        for socket_addr in socket_addrs {
            match TcpStream::connect_timeout(&socket_addr, DEFAULT_TIMEOUT) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(Some(DEFAULT_TIMEOUT))
                        .map_err(|e| PixrpcError::Connection(format!("Failed to set read timeout: {}", e)))?;
                    stream
                        .set_write_timeout(Some(DEFAULT_TIMEOUT))
                        .map_err(|e| PixrpcError::Connection(format!("Failed to set write timeout: {}", e)))?;

                    return Ok(stream);
                }
                Err(e) => {
                    last_err = Some(e);
                }
            }
        }

        Err(PixrpcError::Connection(format!(
            "Failed to connect to {}: {}",
            addr,
            last_err.map(|e| e.to_string()).unwrap_or_else(|| "Unknown error".to_string())
        )))
    }

    /// Sends a request and waits for the response.
    ///
    /// Convenience method combining `send_message` and `receive_message`
    /// with postcard encoding/decoding.
    pub fn send_request(&self, stream: &mut TcpStream, request: &Request) -> Result<Response> {
        let encoded = PostcardCodec::encode_request(request)?;

        Self::send_message(stream, &encoded)?;

        let response_data = Self::receive_message(stream)?;

        let response = PostcardCodec::decode_response(&response_data)?;

        Ok(response)
    }

    /// Sends a message with length prefix.
    ///
    /// Wire format: `[4-byte length as u32 big-endian] + [data]`
    pub fn send_message(stream: &mut TcpStream, data: &[u8]) -> Result<()> {
        let len = data.len() as u32;

        stream
            .write_all(&len.to_be_bytes())
            .map_err(|e| Self::map_io_error(e, "writing length prefix"))?;

        stream
            .write_all(data)
            .map_err(|e| Self::map_io_error(e, "writing data"))?;

        stream
            .flush()
            .map_err(|e| Self::map_io_error(e, "flushing stream"))?;

        Ok(())
    }

    /// Receives a message with length prefix.
    ///
    /// Wire format: `[4-byte length as u32 big-endian] + [data]`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Reading the length prefix fails
    /// - Message exceeds maximum size (100 MB)
    /// - Reading the data fails
    pub fn receive_message(stream: &mut TcpStream) -> Result<Vec<u8>> {
        let mut len_buf = [0u8; 4];
        stream
            .read_exact(&mut len_buf)
            .map_err(|e| Self::map_io_error(e, "reading length prefix"))?;

        let len = u32::from_be_bytes(len_buf) as usize;

        // Validate length to prevent allocation of excessively large buffers
        if len > MAX_MESSAGE_SIZE {
            return Err(PixrpcError::InvalidResponse(format!(
                "Message too large: {} bytes (max {} bytes)",
                len, MAX_MESSAGE_SIZE
            )));
        }

        let mut buf = vec![0u8; len];
        stream
            .read_exact(&mut buf)
            .map_err(|e| Self::map_io_error(e, "reading data"))?;

        Ok(buf)
    }

    /// Map IO errors to appropriate PixrpcError variants
    ///
    /// - Timeouts/would block -> `Timeout`
    /// - Connection errors -> `Connection`
    /// - Other IO errors -> `Io`
    fn map_io_error(err: std::io::Error, context: &str) -> PixrpcError {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                PixrpcError::Timeout(DEFAULT_TIMEOUT.as_millis() as u64)
            }
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => {
                PixrpcError::Connection(format!("{}: Connection lost", context))
            }
            _ => PixrpcError::Io(err),
        }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new().expect("TcpTransport::new should never fail")
    }
}
