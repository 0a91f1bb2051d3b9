//! x402 Bazaar command-line client
//!
//! Runs the plugin commands against the marketplace from a terminal.
//! `X402_BAZAAR_URL` and `X402_BAZAAR_TIMEOUT` override the defaults.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::process::ExitCode;
use x402_bazaar::{
    BazaarPlugin, ClientConfig, Command, CommandHooks, HttpMethod, Params, Result, X402Client,
    X402Error,
};

#[derive(Debug, Parser)]
#[command(name = "x402-bazaar", version, about = "Discover and call x402 Bazaar APIs")]
struct Cli {
    /// Marketplace origin
    #[arg(long, env = "X402_BAZAAR_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "X402_BAZAAR_TIMEOUT")]
    timeout: Option<u64>,

    /// Print machine-readable fields instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List all available APIs
    List,
    /// Search APIs by keyword
    Search { query: String },
    /// Call an API endpoint
    Call {
        endpoint: String,
        /// Parameter as key=value, repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        #[arg(short, long, default_value = "GET")]
        method: HttpMethod,
        /// Transaction hash proving payment
        #[arg(long)]
        tx_hash: Option<String>,
    },
    /// Show marketplace information
    Info,
    /// Show public marketplace statistics
    Stats,
    /// Check that the marketplace is reachable
    Ping,
    /// Print the plugin report
    Report,
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn build_client(cli: &Cli) -> Result<X402Client> {
    let mut config = match &cli.base_url {
        Some(url) => ClientConfig::new(url.as_str()),
        None => ClientConfig::default(),
    };
    if let Some(seconds) = cli.timeout {
        config = config.with_timeout_secs(seconds);
    }
    X402Client::new(config)
}

async fn run(cli: Cli) -> Result<bool> {
    let client = build_client(&cli)?;

    let command = match cli.command {
        Action::List => Command::List,
        Action::Search { query } => Command::Search { query },
        Action::Info => Command::Info,
        Action::Call {
            endpoint,
            params,
            method,
            tx_hash,
        } => Command::Call {
            endpoint,
            params: params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<Params>(),
            method,
            payment_proof: tx_hash,
        },
        Action::Stats => {
            let stats = client.get_public_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(true);
        }
        Action::Ping => {
            let reachable = client.test_connection().await;
            println!(
                "{}: {}",
                client.base_url(),
                if reachable { "OK" } else { "FAILED" }
            );
            return Ok(reachable);
        }
        Action::Report => {
            println!("{}", BazaarPlugin::new(client).report().await);
            return Ok(true);
        }
    };

    let mut plugin = BazaarPlugin::new(client);
    let output = plugin.execute(command).await?;
    let response = if cli.json {
        serde_json::to_string_pretty(&output.fields)?
    } else {
        output.text
    };
    println!("{}", plugin.on_response(response));

    Ok(output.fields.get("status").and_then(Value::as_str) != Some("error"))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            if let X402Error::Usage { .. } = err {
                eprintln!("usage: {}", err);
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}
