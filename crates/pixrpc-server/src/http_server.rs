//! HTTP server for the JSON transport.
//!
//! Serves the path-routed REST surface using hyper for HTTP/1.1. The
//! server accepts connections on a TCP socket, spawns a tokio task per
//! connection, collects each request body, and hands the request to
//! [`ApiRouter`] for dispatch.

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::header::CONTENT_LENGTH;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use pixrpc_common::protocol::error::{PixrpcError, Result};
use pixrpc_common::transport::MAX_MESSAGE_SIZE;

use crate::http_router::{error_response, ApiRouter, HyperResponse};

/// HTTP server for the PixRPC JSON transport.
pub struct HttpServer {
    listener: TcpListener,
}

impl HttpServer {
    /// Binds the HTTP listener to the specified address.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await
            .map_err(|e| PixrpcError::Transport(format!("Failed to bind to {}: {}", addr, e)))?;

        Ok(Self { listener })
    }

    /// Gets the actual bound address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
            .map_err(|e| PixrpcError::Transport(format!("Failed to get local address: {}", e)))
    }

    /// Runs the HTTP server until the process exits.
    pub async fn run(self) -> Result<()> {
        tracing::info!("HTTP server listening on {}", self.local_addr()?);

        loop {
            let (stream, _) = self.listener.accept().await
                .map_err(|e| PixrpcError::Transport(format!("Failed to accept connection: {}", e)))?;

            let io = TokioIo::new(stream);

            tokio::task::spawn(async move {
                let service = service_fn(Self::handle_request);

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    tracing::error!("Error serving connection: {}", err);
                }
            });
        }
    }

    /// Collects one request body and dispatches it through the route
    /// table.
    async fn handle_request(req: Request<Incoming>) -> Result<HyperResponse> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        // Reject oversized bodies before buffering them; the declared
        // length is advisory, so the collected size is re-checked below.
        if let Some(declared) = content_length(&req) {
            if declared > MAX_MESSAGE_SIZE {
                return Ok(error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "request body too large",
                ));
            }
        }

        let body = req.into_body().collect().await
            .map_err(|e| PixrpcError::Transport(format!("Failed to read request body: {}", e)))?
            .to_bytes();

        if body.len() > MAX_MESSAGE_SIZE {
            return Ok(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "request body too large",
            ));
        }

        Ok(ApiRouter::dispatch(&method, &path, body))
    }
}

fn content_length(req: &Request<Incoming>) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_on_ephemeral_port() {
        let server = HttpServer::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_fails() {
        let first = HttpServer::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = first.local_addr().unwrap();
        let second = HttpServer::bind(addr).await;
        assert!(second.is_err());
    }
}
