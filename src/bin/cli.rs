//! minftp Client Binary
//!
//! Interactive prompt for a minftp server.

use std::io::{self, BufRead, Write};

use clap::Parser;
use minftp::network::Flow;
use minftp::{Client, ClientConfig};
use tracing_subscriber::{fmt, EnvFilter};

const PROMPT: &str = "minftp> ";

/// minftp Client
#[derive(Parser, Debug)]
#[command(name = "minftp-client")]
#[command(about = "Interactive client for a minftp server")]
#[command(version)]
struct Args {
    /// Server host
    host: String,

    /// Server port
    port: u16,

    /// Directory for downloads and relative upload paths
    #[arg(short, long, default_value = ".")]
    local_dir: String,
}

fn main() {
    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match ClientConfig::builder()
        .server_addr(format!("{}:{}", args.host, args.port))
        .local_dir(&args.local_dir)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let mut client = match Client::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();

        input.clear();
        // End of console input behaves as `quit`
        let line = match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => "quit",
            Ok(_) => input.as_str(),
        };

        let result = client.run_command(line, &mut io::stdout().lock(), &mut io::stderr().lock());
        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                eprintln!("Connection lost: {}", e);
                std::process::exit(1);
            }
        }
    }
}
