use crate::protocol::error::Result;
use crate::protocol::{Request, Response};

/// Codec for encoding/decoding RPC messages
///
/// Currently only postcard is supported, but the enum allows for future
/// extensibility (e.g., CBOR, bincode, etc.).
///
/// # Example
///
/// ```
/// use pixrpc_common::transport::Codec;
/// use pixrpc_common::protocol::{Request, RpcRequest};
///
/// let codec = Codec::new();
/// let request = Request::new(RpcRequest::Add { a: 5, b: 10 });
///
/// let encoded = codec.encode_request(&request).unwrap();
/// let decoded = codec.decode_request(&encoded).unwrap();
/// assert_eq!(request, decoded);
/// ```
pub enum Codec {
    /// Postcard codec (currently the only supported format)
    Postcard(PostcardCodec),
}

impl Codec {
    /// Create a new codec (postcard is the only supported format)
    pub fn new() -> Self {
        Codec::Postcard(PostcardCodec)
    }

    /// Encode a request to bytes
    pub fn encode_request(&self, request: &Request) -> Result<Vec<u8>> {
        match self {
            Codec::Postcard(_) => PostcardCodec::encode_request(request),
        }
    }

    /// Decode a request from bytes
    pub fn decode_request(&self, data: &[u8]) -> Result<Request> {
        match self {
            Codec::Postcard(_) => PostcardCodec::decode_request(data),
        }
    }

    /// Encode a response to bytes
    pub fn encode_response(&self, response: &Response) -> Result<Vec<u8>> {
        match self {
            Codec::Postcard(_) => PostcardCodec::encode_response(response),
        }
    }

    /// Decode a response from bytes
    pub fn decode_response(&self, data: &[u8]) -> Result<Response> {
        match self {
            Codec::Postcard(_) => PostcardCodec::decode_response(data),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

/// Postcard codec for encoding/decoding RPC messages
///
/// Postcard keeps the wire format compact and strongly typed: the envelope
/// carries the operation as an enum variant, so a decoded request hands the
/// handler typed payload values with no further parsing.
pub struct PostcardCodec;

impl PostcardCodec {
    /// Encode a request to bytes
    pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(request)?)
    }

    /// Decode a request from bytes
    pub fn decode_request(data: &[u8]) -> Result<Request> {
        Ok(postcard::from_bytes(data)?)
    }

    /// Encode a response to bytes
    pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(response)?)
    }

    /// Decode a response from bytes
    pub fn decode_response(data: &[u8]) -> Result<Response> {
        Ok(postcard::from_bytes(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RpcError, RpcReply, RpcRequest};

    #[test]
    fn test_codec_request_round_trip() {
        let request = Request::new(RpcRequest::DotProduct {
            a: vec![1.0, 2.0, 3.0],
            b: vec![4.0, 5.0, 6.0],
        });

        let encoded = PostcardCodec::encode_request(&request).unwrap();
        let decoded = PostcardCodec::decode_request(&encoded).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn test_codec_binary_payload_round_trip() {
        let request = Request::new(RpcRequest::RawImage {
            img: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00],
        });

        let encoded = PostcardCodec::encode_request(&request).unwrap();
        let decoded = PostcardCodec::decode_request(&encoded).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn test_codec_response_round_trip() {
        let response = Response::success(123, RpcReply::Image { width: 640, height: 480 });

        let encoded = PostcardCodec::encode_response(&response).unwrap();
        let decoded = PostcardCodec::decode_response(&encoded).unwrap();

        assert_eq!(response, decoded);
    }

    #[test]
    fn test_codec_error_response_round_trip() {
        let response = Response::error(123, RpcError::invalid_argument("vectors must be the same length"));

        let encoded = PostcardCodec::encode_response(&response).unwrap();
        let decoded = PostcardCodec::decode_response(&encoded).unwrap();

        assert_eq!(response, decoded);
        assert!(!decoded.is_success());
    }

    #[test]
    fn test_codec_enum_dispatch() {
        let request = Request::new(RpcRequest::Add { a: 5, b: 10 });
        let codec = Codec::new();

        let encoded = codec.encode_request(&request).unwrap();
        let decoded = codec.decode_request(&encoded).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = PostcardCodec::decode_request(&[0xFF; 3]);
        assert!(result.is_err());
    }
}
