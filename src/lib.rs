//! # x402 Bazaar client
//!
//! A typed client for the **x402 Bazaar** paid-API marketplace, plus a command
//! adapter that exposes it to an autonomous-agent host.
//!
//! ## Features
//!
//! - 🔎 **Service discovery**: Fetch and search the free marketplace catalog
//! - 💳 **HTTP 402 handling**: Classify every call as success, payment required or error
//! - 🔁 **Payment-proof retry**: Re-issue a call with a transaction hash attached
//! - 🤖 **Agent plugin**: `x402_list`, `x402_search`, `x402_call` and `x402_info` commands
//!   with host lifecycle hooks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use x402_bazaar::{CallOutcome, ClientConfig, X402Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = X402Client::new(ClientConfig::new("https://x402-api.onrender.com"))?;
//!
//!     for service in client.search_services("weather").await? {
//!         println!("{} -> {}", service.name, service.endpoint);
//!     }
//!
//!     match client.call_crypto_api("BTC", None).await {
//!         CallOutcome::Success { data, .. } => println!("{}", data),
//!         CallOutcome::PaymentRequired(details) => {
//!             println!("Pay {} {} to {}", details.amount, details.token, details.address)
//!         }
//!         CallOutcome::Error(err) => eprintln!("{}", err),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Configuration, service descriptors and call outcomes
//! - **`client`**: HTTP client with 402 classification and payment-proof headers
//! - **`plugin`**: Command adapter and host lifecycle hooks
//! - **`error`**: Error taxonomy
//!
//! ## Payment flow
//!
//! 1. Call an endpoint without proof and receive [`CallOutcome::PaymentRequired`]
//! 2. Send the quoted amount out of band (the client never signs or sends funds)
//! 3. Call the same endpoint again with the transaction hash; it is sent as
//!    `X-Payment-TxHash` together with `X-Payment-Chain: base`

pub mod client;
pub mod error;
pub mod plugin;
pub mod types;

// Re-exports for convenience
pub use client::{Params, X402Client};
pub use error::{Result, X402Error};
pub use plugin::{BazaarPlugin, Command, CommandHooks, CommandOutput};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
