use thiserror::Error;

use crate::protocol::responses::RpcError;

#[derive(Error, Debug)]
pub enum PixrpcError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] postcard::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("RPC error: {0}")]
    Rpc(RpcError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<std::net::AddrParseError> for PixrpcError {
    fn from(err: std::net::AddrParseError) -> Self {
        PixrpcError::InvalidRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PixrpcError>;
