//! PixRPC Client
//!
//! This crate provides the binary-transport RPC client and the benchmark
//! runner that drives one operation repeatedly against a running service
//! and reports average round-trip latency.

pub mod bench;
pub mod client;

pub use bench::{BenchOperation, BenchmarkResult, BenchmarkRun};
pub use client::RpcClient;
