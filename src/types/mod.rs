//! Core types for the x402 Bazaar client
//!
//! - [`config`] - Client configuration
//! - [`constants`] - Endpoints, headers and chain identifiers
//! - [`method`] - Supported HTTP methods
//! - [`outcome`] - Classified call results and payment details
//! - [`service`] - Service catalog entries
//!
//! # Examples
//!
//! ```
//! use x402_bazaar::types::{ClientConfig, HttpMethod};
//!
//! # fn example() -> x402_bazaar::Result<()> {
//! let config = ClientConfig::new("http://localhost:3000").with_timeout_secs(5);
//! config.validate()?;
//!
//! let method: HttpMethod = "post".parse()?;
//! assert!(method.sends_body());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod method;
pub mod outcome;
pub mod service;

pub use config::ClientConfig;
pub use constants::{endpoints, headers, networks};
pub use method::HttpMethod;
pub use outcome::{CallOutcome, PaymentDetails, PaymentStatus};
pub use service::{Cost, ServiceDescriptor};
