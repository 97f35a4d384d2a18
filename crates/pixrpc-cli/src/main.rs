//! # PixRPC CLI Entry Point
//!
//! Main binary for the PixRPC service. Provides a command-line interface
//! for starting the server (both transports) and for benchmarking a
//! running instance.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server: binary RPC on :5000, JSON/HTTP on :8000
//! pixrpc serve
//!
//! # Custom bind addresses
//! pixrpc serve --rpc-bind 0.0.0.0:5000 --http-bind 0.0.0.0:8000
//!
//! # Benchmark an operation: 100 repetitions of add against localhost
//! pixrpc bench localhost add 100
//!
//! # Image benchmarks send a local file with every iteration
//! pixrpc bench localhost rawImage 100 --image sample.jpg
//! ```

use anyhow::Result;
use argh::FromArgs;
use std::net::SocketAddr;
use std::path::PathBuf;

use pixrpc_client::{BenchOperation, BenchmarkRun};
use pixrpc_server::{HttpServer, RpcService};

/// Main CLI structure parsed from command-line arguments.
///
/// Uses `argh` for declarative argument parsing. The top-level command
/// dispatches to one of the two subcommands: serve or bench.
#[derive(FromArgs)]
/// PixRPC - dual-transport RPC service and benchmark harness
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

/// Available CLI subcommands.
#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Serve(ServeArgs),
    Bench(BenchArgs),
}

/// Arguments for starting the PixRPC server.
///
/// Both transport adapters are started concurrently over the same handler
/// set; either listener failing to bind is a fatal startup error.
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
/// start the binary RPC and JSON/HTTP servers
struct ServeArgs {
    /// address to bind the binary RPC listener to
    #[argh(option, long = "rpc-bind", default = "\"0.0.0.0:5000\".into()")]
    rpc_bind: String,

    /// address to bind the JSON/HTTP listener to
    #[argh(option, long = "http-bind", default = "\"0.0.0.0:8000\".into()")]
    http_bind: String,
}

/// Arguments for benchmarking a running server.
///
/// Invokes one operation `repetitions` times over a single binary-transport
/// connection and prints the average per-operation latency in milliseconds.
/// Exits nonzero on an unknown command, a missing image file, or any
/// transport failure.
#[derive(FromArgs)]
#[argh(subcommand, name = "bench")]
/// benchmark one operation against a running server
struct BenchArgs {
    /// host running the RPC server
    #[argh(positional)]
    host: String,

    /// operation to benchmark: add, rawImage, dotProduct or jsonImage
    #[argh(positional)]
    command: BenchOperation,

    /// number of repetitions
    #[argh(positional)]
    repetitions: u32,

    /// RPC port on the target host
    #[argh(option, short = 'p', default = "5000")]
    port: u16,

    /// image file sent by the image operations
    #[argh(option, default = "\"sample.jpg\".into()")]
    image: PathBuf,

    /// vector length for dotProduct inputs
    #[argh(option, long = "vector-len", default = "100")]
    vector_len: usize,
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        Commands::Serve(args) => {
            // Logging is initialized for the server only; bench keeps its
            // stdout clean so the report can be piped into other tools.
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .init();

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_serve(args))
        }
        Commands::Bench(args) => run_bench(args),
    }
}

/// Executes the `serve` subcommand: both transports over the same
/// handlers, concurrently, until the process is killed.
async fn run_serve(args: ServeArgs) -> Result<()> {
    let http_addr: SocketAddr = args.http_bind.parse()
        .map_err(|e| anyhow::anyhow!("Invalid HTTP bind address {}: {}", args.http_bind, e))?;

    tracing::info!("Starting PixRPC server");

    let http_server = HttpServer::bind(http_addr).await?;

    tokio::try_join!(RpcService::run(&args.rpc_bind), http_server.run())?;

    Ok(())
}

/// Executes the `bench` subcommand.
fn run_bench(args: BenchArgs) -> Result<()> {
    let addr = format!("{}:{}", args.host, args.port);

    let run = BenchmarkRun {
        addr: addr.clone(),
        operation: args.command,
        repetitions: args.repetitions,
        image_path: args.image,
        vector_len: args.vector_len,
    };

    println!(
        "Running {} reps against {} ({})",
        args.repetitions, addr, args.command
    );

    let result = run.execute()?;

    println!("Took {:.3} ms per operation", result.average_latency_ms);

    Ok(())
}

/// CLI argument parsing tests.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let args: Cli = Cli::from_args(&["pixrpc"], &["serve"]).unwrap();
        match args.command {
            Commands::Serve(ServeArgs { rpc_bind, http_bind }) => {
                assert_eq!(rpc_bind, "0.0.0.0:5000");
                assert_eq!(http_bind, "0.0.0.0:8000");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_custom_binds() {
        let args: Cli = Cli::from_args(
            &["pixrpc"],
            &["serve", "--rpc-bind", "127.0.0.1:6000", "--http-bind", "127.0.0.1:6001"],
        )
        .unwrap();
        match args.command {
            Commands::Serve(ServeArgs { rpc_bind, http_bind }) => {
                assert_eq!(rpc_bind, "127.0.0.1:6000");
                assert_eq!(http_bind, "127.0.0.1:6001");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_bench() {
        let args: Cli = Cli::from_args(&["pixrpc"], &["bench", "localhost", "add", "100"]).unwrap();
        match args.command {
            Commands::Bench(BenchArgs { host, command, repetitions, port, vector_len, .. }) => {
                assert_eq!(host, "localhost");
                assert_eq!(command, BenchOperation::Add);
                assert_eq!(repetitions, 100);
                assert_eq!(port, 5000); // default
                assert_eq!(vector_len, 100); // default
            }
            _ => panic!("Expected Bench command"),
        }
    }

    #[test]
    fn test_cli_parse_bench_camel_case_commands() {
        for (name, expected) in [
            ("rawImage", BenchOperation::RawImage),
            ("dotProduct", BenchOperation::DotProduct),
            ("jsonImage", BenchOperation::JsonImage),
        ] {
            let args: Cli =
                Cli::from_args(&["pixrpc"], &["bench", "localhost", name, "10"]).unwrap();
            match args.command {
                Commands::Bench(BenchArgs { command, .. }) => assert_eq!(command, expected),
                _ => panic!("Expected Bench command"),
            }
        }
    }

    #[test]
    fn test_cli_parse_bench_with_options() {
        let args: Cli = Cli::from_args(
            &["pixrpc"],
            &[
                "bench", "localhost", "rawImage", "50",
                "-p", "6000",
                "--image", "photo.png",
                "--vector-len", "256",
            ],
        )
        .unwrap();
        match args.command {
            Commands::Bench(BenchArgs { command, repetitions, port, image, vector_len, .. }) => {
                assert_eq!(command, BenchOperation::RawImage);
                assert_eq!(repetitions, 50);
                assert_eq!(port, 6000);
                assert_eq!(image, PathBuf::from("photo.png"));
                assert_eq!(vector_len, 256);
            }
            _ => panic!("Expected Bench command"),
        }
    }

    #[test]
    fn test_cli_parse_bench_unknown_command_fails() {
        let result = Cli::from_args(&["pixrpc"], &["bench", "localhost", "multiply", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_bench_missing_arguments_fails() {
        let result = Cli::from_args(&["pixrpc"], &["bench", "localhost"]);
        assert!(result.is_err());
    }
}
