//! minftp Server Binary
//!
//! Serves the start directory to one client at a time.

use clap::Parser;
use minftp::{Config, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// minftp Server
#[derive(Parser, Debug)]
#[command(name = "minftp-server")]
#[command(about = "Minimal line-based remote filesystem server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:2121")]
    listen: String,

    /// Port to listen on (overrides the port in --listen)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory every session starts in
    #[arg(short, long, default_value = ".")]
    root: String,

    /// Maximum command line length in bytes
    #[arg(long, default_value = "4096")]
    max_line_len: usize,

    /// Blob streaming chunk size in bytes
    #[arg(long, default_value = "8192")]
    chunk_size: usize,

    /// Idle read timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,minftp=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let listen = match args.port {
        Some(port) => with_port(&args.listen, port),
        None => args.listen.clone(),
    };

    tracing::info!("minftp server v{}", minftp::VERSION);
    tracing::info!("Root directory: {}", args.root);

    let config = match Config::builder()
        .listen_addr(listen)
        .root_dir(&args.root)
        .max_line_len(args.max_line_len)
        .chunk_size(args.chunk_size)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Replace the port of a `host:port` address
fn with_port(listen: &str, port: u16) -> String {
    let host = listen.rsplit_once(':').map_or(listen, |(host, _)| host);
    format!("{}:{}", host, port)
}
