//! Benchmark runner.
//!
//! Drives one operation `repetitions` times over a single long-lived
//! binary-transport connection and reports the average wall-clock latency
//! per call. The run is strictly sequential (one call in flight) and
//! fail-fast: the first error aborts the run and is propagated, never
//! averaged into the result.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::Rng;

use pixrpc_common::protocol::error::{PixrpcError, Result};
use pixrpc_common::protocol::RpcRequest;

use crate::client::RpcClient;

/// Default vector length for `dotProduct` inputs.
pub const DEFAULT_VECTOR_LEN: usize = 100;

/// The operation a benchmark run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchOperation {
    Add,
    RawImage,
    DotProduct,
    JsonImage,
}

impl FromStr for BenchOperation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add" => Ok(BenchOperation::Add),
            "rawImage" => Ok(BenchOperation::RawImage),
            "dotProduct" => Ok(BenchOperation::DotProduct),
            "jsonImage" => Ok(BenchOperation::JsonImage),
            other => Err(format!(
                "unknown command '{}' (expected add, rawImage, dotProduct or jsonImage)",
                other
            )),
        }
    }
}

impl fmt::Display for BenchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BenchOperation::Add => "add",
            BenchOperation::RawImage => "rawImage",
            BenchOperation::DotProduct => "dotProduct",
            BenchOperation::JsonImage => "jsonImage",
        };
        f.write_str(name)
    }
}

/// One benchmark run: target address, operation, and input parameters.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    /// Target server address, e.g. "127.0.0.1:5000"
    pub addr: String,
    /// Operation to invoke each iteration
    pub operation: BenchOperation,
    /// Number of iterations; must be greater than zero
    pub repetitions: u32,
    /// Image file sent by the image operations, read once and reused
    pub image_path: PathBuf,
    /// Length of the freshly generated random vectors for `dotProduct`
    pub vector_len: usize,
}

/// Result of a completed benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkResult {
    /// Total wall-clock time divided evenly across repetitions; includes
    /// serialization and network cost, not handler-only compute time
    pub average_latency_ms: f64,
}

impl BenchmarkRun {
    /// Executes the run: connect, invoke `repetitions` times, report the
    /// average latency.
    pub fn execute(&self) -> Result<BenchmarkResult> {
        if self.repetitions == 0 {
            return Err(PixrpcError::InvalidRequest(
                "repetitions must be greater than zero".to_string(),
            ));
        }

        // Image payloads are read and encoded once, before the clock
        // starts; dot-product vectors are regenerated per iteration.
        let payload = self.prepare_payload()?;

        let mut client = RpcClient::connect(&self.addr)?;
        tracing::debug!("connected to {}", self.addr);

        let mut rng = rand::thread_rng();

        let start = Instant::now();
        for _ in 0..self.repetitions {
            let op = self.next_request(&payload, &mut rng);
            client.call(op)?;
        }
        let total_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(BenchmarkResult {
            average_latency_ms: total_ms / f64::from(self.repetitions),
        })
    }

    /// Loads the per-run fixed payload, if the operation needs one.
    fn prepare_payload(&self) -> Result<Option<FixedPayload>> {
        match self.operation {
            BenchOperation::Add | BenchOperation::DotProduct => Ok(None),
            BenchOperation::RawImage => {
                let bytes = self.read_image()?;
                Ok(Some(FixedPayload::Raw(bytes)))
            }
            BenchOperation::JsonImage => {
                let bytes = self.read_image()?;
                Ok(Some(FixedPayload::Base64(BASE64.encode(bytes))))
            }
        }
    }

    fn read_image(&self) -> Result<Vec<u8>> {
        fs::read(&self.image_path).map_err(|e| {
            PixrpcError::InvalidRequest(format!(
                "cannot read image file {}: {}",
                self.image_path.display(),
                e
            ))
        })
    }

    /// Builds the request for one iteration.
    fn next_request(&self, payload: &Option<FixedPayload>, rng: &mut impl Rng) -> RpcRequest {
        match (self.operation, payload) {
            (BenchOperation::Add, _) => RpcRequest::Add { a: 5, b: 10 },
            (BenchOperation::DotProduct, _) => RpcRequest::DotProduct {
                a: random_vector(self.vector_len, rng),
                b: random_vector(self.vector_len, rng),
            },
            (BenchOperation::RawImage, Some(FixedPayload::Raw(bytes))) => RpcRequest::RawImage {
                img: bytes.clone(),
            },
            (BenchOperation::JsonImage, Some(FixedPayload::Base64(text))) => RpcRequest::JsonImage {
                img: text.clone(),
            },
            // prepare_payload() pairs every image operation with its payload
            _ => unreachable!("image operation without a prepared payload"),
        }
    }
}

enum FixedPayload {
    Raw(Vec<u8>),
    Base64(String),
}

fn random_vector(len: usize, rng: &mut impl Rng) -> Vec<f64> {
    (0..len).map(|_| rng.gen::<f64>()).collect()
}
