//! ClauseLens CLI
//!
//! Starts the contract review web server.

use anyhow::Context;
use clauselens_analyzer::Analyzer;
use clauselens_llm::GroqProvider;
use clauselens_web::config::{load_api_key, ServerConfig, API_KEY_VAR};
use clauselens_web::{init_tracing, start_server};
use std::env;
use std::process;
use std::sync::Arc;
use tracing::warn;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else {
        ServerConfig::default()
    };

    init_tracing();

    let api_key = load_api_key().unwrap_or_else(|| {
        warn!("{} is not set; analysis requests will fail", API_KEY_VAR);
        String::new()
    });

    // The blocking HTTP client must be built and dropped outside the runtime
    let provider = GroqProvider::with_endpoint(&config.analyzer.endpoint, &api_key)
        .context("creating completion provider")?;
    let analyzer = Analyzer::new(provider, config.analyzer.clone())
        .context("invalid analyzer configuration")?;
    let analyzer = Arc::new(analyzer);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(start_server(&config, Arc::clone(&analyzer)))?;
    drop(runtime);

    Ok(())
}

fn print_help() {
    println!("ClauseLens - AI contract review");
    println!();
    println!("USAGE:");
    println!("    clauselens [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}       Provider credential (also read from .env)", API_KEY_VAR);
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 8080)");
    println!("    - max_upload_bytes: Request body limit (default 20 MiB)");
    println!("    - [analyzer] model, endpoint, temperature, max_tokens,");
    println!("      chunk_size, chunk_mode ('single' or 'per_chunk')");
    println!();
}
