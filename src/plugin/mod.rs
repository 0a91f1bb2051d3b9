//! Command adapter exposing the marketplace client to an agent host
//!
//! The host dispatches `x402_list`, `x402_search`, `x402_call` and `x402_info`
//! through [`CommandHooks::pre_command`], and calls the remaining hooks around
//! each dispatch. [`BazaarPlugin`] keeps only the record of the last
//! `x402_call`, which [`CommandHooks::on_response`] logs and clears.

use crate::client::X402Client;
use crate::types::CallOutcome;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub mod command;
pub mod render;


pub use command::{Command, COMMAND_PREFIX};
pub use render::CommandOutput;

/// Lifecycle callbacks invoked by the agent host around each command
#[async_trait]
pub trait CommandHooks: Send + Sync {
    /// Dispatch a command before the host runs it; `None` when it is not ours
    async fn pre_command(&mut self, command: &str, args: &Value) -> Result<Option<CommandOutput>>;

    /// Decorate a command's response after it ran
    async fn post_command(&self, command: &str, response: String) -> String;

    /// Observe a response on its way back to the agent
    fn on_response(&mut self, response: String) -> String;

    /// Summarize plugin and marketplace state
    async fn report(&self) -> String;
}

/// Summary of the last `x402_call`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub endpoint: String,
    /// Amount quoted by a 402 response, if any
    pub cost: Option<String>,
    /// `free`, `completed`, `payment_required` or `error`
    pub payment_status: String,
    pub completed_at: DateTime<Utc>,
}

impl CallRecord {
    fn from_outcome(endpoint: &str, outcome: &CallOutcome) -> Self {
        let (cost, payment_status) = match outcome {
            CallOutcome::Success { payment_status, .. } => (None, payment_status.to_string()),
            CallOutcome::PaymentRequired(details) => {
                (Some(details.amount.clone()), "payment_required".to_string())
            }
            CallOutcome::Error(_) => (None, "error".to_string()),
        };

        Self {
            endpoint: endpoint.to_string(),
            cost,
            payment_status,
            completed_at: Utc::now(),
        }
    }
}

/// Agent-host plugin for the x402 Bazaar marketplace
#[derive(Debug)]
pub struct BazaarPlugin {
    client: X402Client,
    enabled: bool,
    last_call: Option<CallRecord>,
}

impl BazaarPlugin {
    /// Plugin name reported to the host
    pub const NAME: &'static str = "x402-bazaar";

    /// Plugin description reported to the host
    pub const DESCRIPTION: &'static str = "Access paid APIs via the x402 Bazaar marketplace \
        with USDC payments on Base: web search, weather, crypto prices, AI image \
        generation, web scraping and more.";

    /// Create a plugin around an existing client
    pub fn new(client: X402Client) -> Self {
        Self {
            client,
            enabled: true,
            last_call: None,
        }
    }

    /// Create a plugin whose client is configured from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(X402Client::from_env()?))
    }

    pub fn client(&self) -> &X402Client {
        &self.client
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the plugin; disabled hooks pass everything through
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record of the last `x402_call` not yet consumed by `on_response`
    pub fn last_call(&self) -> Option<&CallRecord> {
        self.last_call.as_ref()
    }

    /// Run a command against the marketplace.
    ///
    /// Call outcomes of every variant render as output; only catalog and info
    /// failures surface as errors.
    pub async fn execute(&mut self, command: Command) -> Result<CommandOutput> {
        match command {
            Command::List => {
                let services = self.client.discover_services().await?;
                render::service_list(&services)
            }
            Command::Search { query } => {
                let services = self.client.search_services(&query).await?;
                render::search_results(&query, &services)
            }
            Command::Call {
                endpoint,
                params,
                method,
                payment_proof,
            } => {
                tracing::info!("[x402 Bazaar] Calling {} {}...", method, endpoint);
                let outcome = self
                    .client
                    .call(&endpoint, &params, method, payment_proof.as_deref())
                    .await;
                self.last_call = Some(CallRecord::from_outcome(&endpoint, &outcome));
                render::call_outcome(&outcome)
            }
            Command::Info => {
                let info = self.client.get_marketplace_info().await?;
                render::marketplace_info(&info)
            }
        }
    }

    async fn build_report(&self) -> Result<String> {
        let info = self.client.get_marketplace_info().await?;
        let services = self.client.discover_services().await?;

        let mut lines = vec![
            "=== x402 Bazaar Plugin Report ===".to_string(),
            format!(
                "Status: {}",
                if self.enabled { "Enabled" } else { "Disabled" }
            ),
            format!("Version: {}", crate::VERSION),
            format!(
                "Marketplace: {}",
                info.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("x402 Bazaar")
            ),
            format!("Available APIs: {}", services.len()),
            format!("Base URL: {}", self.client.base_url()),
            String::new(),
            "Top Categories:".to_string(),
        ];

        let mut categories: HashMap<&str, usize> = HashMap::new();
        for service in &services {
            *categories
                .entry(service.category.as_deref().unwrap_or("Other"))
                .or_insert(0) += 1;
        }
        let mut ranked: Vec<(&str, usize)> = categories.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (category, count) in ranked.into_iter().take(5) {
            lines.push(format!("  - {}: {} APIs", category, count));
        }

        lines.extend([
            String::new(),
            "Commands:".to_string(),
            "  - x402_list: List all available APIs".to_string(),
            "  - x402_search: Search for APIs by keyword".to_string(),
            "  - x402_call: Call an API endpoint (with payment handling)".to_string(),
            "  - x402_info: Get marketplace information".to_string(),
        ]);

        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl CommandHooks for BazaarPlugin {
    async fn pre_command(&mut self, command: &str, args: &Value) -> Result<Option<CommandOutput>> {
        if !self.enabled || !command.starts_with(COMMAND_PREFIX) {
            return Ok(None);
        }

        let command = Command::parse(command, args)?;
        self.execute(command).await.map(Some)
    }

    async fn post_command(&self, command: &str, mut response: String) -> String {
        if !self.enabled {
            return response;
        }

        let command = command.to_lowercase();
        let ours = command.contains("x402") || command.contains("api");
        if ours && command.contains("search") {
            match self.client.discover_services().await {
                Ok(services) if !services.is_empty() => {
                    response.push_str(&format!(
                        "\n\n[x402 Bazaar] {} APIs available. Use 'x402 list' to see all services.",
                        services.len()
                    ));
                }
                Ok(_) => {}
                Err(err) => tracing::debug!("Skipping service count: {}", err),
            }
        }

        response
    }

    fn on_response(&mut self, response: String) -> String {
        if !self.enabled {
            return response;
        }

        if let Some(record) = self.last_call.take() {
            tracing::info!(
                endpoint = %record.endpoint,
                cost = record.cost.as_deref().unwrap_or("unknown"),
                payment = %record.payment_status,
                "[x402 Bazaar] API call completed"
            );
        }

        response
    }

    async fn report(&self) -> String {
        match self.build_report().await {
            Ok(report) => report,
            Err(err) => format!("Error generating report: {}", err),
        }
    }
}
