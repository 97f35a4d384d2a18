pub mod error;
pub mod requests;
pub mod responses;

pub use error::{PixrpcError, Result};
pub use requests::{Request, RequestId, RpcRequest};
pub use responses::{ErrorKind, Response, RpcError, RpcReply};
