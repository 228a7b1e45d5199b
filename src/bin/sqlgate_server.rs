//!
//! sqlgate server binary
//! ---------------------
//! Command-line entry point for starting the sqlgate HTTP parse service.
//! Supports configuration via CLI flags and environment variables.

use anyhow::Result;
use std::env;

fn parse_port_env(name: &str) -> Option<u16> {
    match env::var(name) {
        Ok(val) => val.parse::<u16>().ok(),
        Err(_) => None,
    }
}

fn parse_port_arg(args: &[String], flag: &str) -> Option<u16> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag
            && i + 1 < args.len() {
                return args[i + 1].parse::<u16>().ok();
            }
        i += 1;
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

#[tokio::main]
async fn main() -> Result<()> {
    println!(r"                _            _
  ___  __ _| | __ _  __ _| |_ ___
 / __|/ _` | |/ _` |/ _` | __/ _ \
 \__ \ (_| | | (_| | (_| | ||  __/
 |___/\__, |_|\__, |\__,_|\__\___|
         |_|   |___/              ");

    // Initialize tracing subscriber with env filter if provided
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().collect();

    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("sqlgate Server\n\nUSAGE:\n  sqlgate_server [--http-port N]\n\nOPTIONS:\n  --http-port N       HTTP API port (env: SQLGATE_HTTP_PORT, default 7979)\n");
        return Ok(());
    }

    let default_http: u16 = 7979;
    let env_http = parse_port_env("SQLGATE_HTTP_PORT");
    let arg_http = parse_port_arg(&args, "--http-port");
    let http_port = arg_http.or(env_http).unwrap_or(default_http);

    println!("sqlgate starting using port: http={}", http_port);
    tracing::info!("Using port: http={}", http_port);
    sqlgate::server::run_with_port(http_port).await
}
