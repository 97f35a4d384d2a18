//! Binary-transport service façade.
//!
//! Binds the four handlers to the length-prefixed TCP server. Dispatch is
//! a static match over the typed operation enum, resolved once at compile
//! time; the façade maps handler results onto the wire envelope and does
//! no validation of its own.

use pixrpc_common::protocol::error::Result;
use pixrpc_common::protocol::{Request, Response, RpcRequest};
use pixrpc_common::transport::TcpServer;

use crate::ops;

pub struct RpcService;

impl RpcService {
    /// Executes one decoded request and produces its response envelope.
    ///
    /// Structured handler failures (invalid argument, overflow) become
    /// error responses; decode failures of image payloads never reach this
    /// level, having already collapsed to the sentinel reply inside the
    /// handler.
    pub fn handle(request: Request) -> Response {
        let id = request.id;
        let operation = request.op.operation();

        let result = match request.op {
            RpcRequest::Add { a, b } => ops::add(a, b),
            RpcRequest::RawImage { img } => ops::raw_image(&img),
            RpcRequest::DotProduct { a, b } => ops::dot_product(&a, &b),
            RpcRequest::JsonImage { img } => ops::json_image(&img),
        };

        match result {
            Ok(reply) => Response::success(id, reply),
            Err(error) => {
                tracing::debug!("{} failed: {}", operation, error);
                Response::error(id, error)
            }
        }
    }

    /// Binds the binary transport and serves requests until the process
    /// exits.
    pub async fn run(bind_addr: &str) -> Result<()> {
        let server = TcpServer::new(bind_addr).await?;
        tracing::info!("RPC server listening on {}", server.local_addr()?);

        server
            .run_with_handler(|request| async move { Ok(RpcService::handle(request)) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixrpc_common::protocol::{ErrorKind, RpcReply};

    #[test]
    fn test_handle_add() {
        let request = Request::new(RpcRequest::Add { a: 5, b: 10 });
        let id = request.id;

        let response = RpcService::handle(request);

        assert_eq!(response.id, id);
        assert_eq!(response.reply, Some(RpcReply::Sum { sum: 15 }));
    }

    #[test]
    fn test_handle_dot_product_mismatch() {
        let request = Request::new(RpcRequest::DotProduct {
            a: vec![1.0, 2.0],
            b: vec![1.0, 2.0, 3.0],
        });
        let id = request.id;

        let response = RpcService::handle(request);

        assert_eq!(response.id, id);
        assert!(response.reply.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_handle_image_sentinel() {
        let request = Request::new(RpcRequest::RawImage {
            img: b"junk".to_vec(),
        });

        let response = RpcService::handle(request);

        assert_eq!(response.reply, Some(RpcReply::Image { width: 0, height: 0 }));
        assert!(response.is_success());
    }
}
