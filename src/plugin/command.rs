//! Commands the agent host can dispatch to the plugin

use crate::client::Params;
use crate::types::HttpMethod;
use crate::{Result, X402Error};
use serde_json::Value;

/// Prefix shared by every command name the plugin answers to
pub const COMMAND_PREFIX: &str = "x402_";

/// A parsed host command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// List every service in the catalog
    List,
    /// Search the catalog by keyword
    Search { query: String },
    /// Call an endpoint, optionally with a payment proof
    Call {
        endpoint: String,
        params: Params,
        method: HttpMethod,
        payment_proof: Option<String>,
    },
    /// Show the marketplace info document
    Info,
}

impl Command {
    /// Parse a command from its name and JSON arguments.
    ///
    /// Both `x402_call` and the bare `call` are accepted.
    pub fn parse(name: &str, args: &Value) -> Result<Self> {
        let name = name.trim();
        let subcommand = name.strip_prefix(COMMAND_PREFIX).unwrap_or(name);

        match subcommand {
            "list" => Ok(Command::List),
            "info" => Ok(Command::Info),
            "search" => Ok(Command::Search {
                query: required_str(args, "query")?,
            }),
            "call" => {
                let endpoint = required_str(args, "endpoint")?;

                let params = match args.get("params") {
                    None | Some(Value::Null) => Params::new(),
                    Some(Value::Object(map)) => map.clone(),
                    Some(_) => return Err(X402Error::usage("'params' must be an object")),
                };

                let method = match args.get("method").and_then(Value::as_str) {
                    Some(method) => method.parse()?,
                    None => HttpMethod::Get,
                };

                let payment_proof = args
                    .get("payment_tx_hash")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|hash| !hash.is_empty())
                    .map(str::to_string);

                Ok(Command::Call {
                    endpoint,
                    params,
                    method,
                    payment_proof,
                })
            }
            _ => Err(X402Error::usage(format!("Unknown command: {}", name))),
        }
    }

    /// Canonical host-facing name
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "x402_list",
            Command::Search { .. } => "x402_search",
            Command::Call { .. } => "x402_call",
            Command::Info => "x402_info",
        }
    }
}

fn required_str(args: &Value, key: &str) -> Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| X402Error::usage(format!("Missing required parameter: {}", key)))
}
