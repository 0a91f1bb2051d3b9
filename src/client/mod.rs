//! HTTP client for the x402 Bazaar marketplace
//!
//! [`X402Client`] issues one request per call, classifies the response into a
//! [`CallOutcome`] and, when given a transaction hash, attaches the payment-proof
//! headers. It never retries on its own: after a
//! [`CallOutcome::PaymentRequired`] the caller pays out of band and invokes the
//! same call again with the hash.
//!
//! # Examples
//!
//! ```no_run
//! use x402_bazaar::{CallOutcome, X402Client};
//!
//! # async fn example() -> x402_bazaar::Result<()> {
//! let client = X402Client::with_defaults()?;
//!
//! match client.call_weather_api("Paris", None).await {
//!     CallOutcome::Success { data, .. } => println!("{}", data),
//!     CallOutcome::PaymentRequired(details) => {
//!         for step in details.instructions() {
//!             println!("{}", step);
//!         }
//!         // ... user sends funds, then:
//!         let paid = client.call_weather_api("Paris", Some("0xabc")).await;
//!         println!("paid call succeeded: {}", paid.is_success());
//!     }
//!     CallOutcome::Error(err) => eprintln!("{}", err),
//! }
//! # Ok(())
//! # }
//! ```

use crate::types::constants::{endpoints, headers, networks};
use crate::types::{
    CallOutcome, ClientConfig, HttpMethod, PaymentDetails, PaymentStatus, ServiceDescriptor,
};
use crate::{Result, X402Error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde_json::{json, Map, Value};
use std::time::Duration;


/// Call parameters: string keys mapped to primitive JSON values
pub type Params = Map<String, Value>;

/// Client for the x402 Bazaar marketplace
#[derive(Clone)]
pub struct X402Client {
    config: ClientConfig,
    http: Client,
}

impl std::fmt::Debug for X402Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X402Client")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl X402Client {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers)
            .build()
            .map_err(|e| X402Error::config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("X402Client initialized with base URL: {}", config.base_url);

        Ok(Self { config, http })
    }

    /// Create a client for the production marketplace with default settings
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the marketplace origin
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Get the full configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Call a marketplace endpoint.
    ///
    /// Parameters become query parameters for GET/DELETE and a JSON body for
    /// POST/PUT. When `payment_proof` is given, the transaction hash and chain
    /// headers are attached. Exactly one request is sent.
    pub async fn call(
        &self,
        endpoint: &str,
        params: &Params,
        method: HttpMethod,
        payment_proof: Option<&str>,
    ) -> CallOutcome {
        let payment_proof = payment_proof.filter(|proof| !proof.trim().is_empty());

        match self.send(endpoint, params, method, payment_proof).await {
            Ok((status, body)) => classify(status, &body, endpoint, method, payment_proof),
            Err(err) => CallOutcome::Error(err),
        }
    }

    /// Same as [`call`](Self::call) with the method given by name.
    ///
    /// An unrecognized method is reported as a usage error without touching the network.
    pub async fn call_with_method_str(
        &self,
        endpoint: &str,
        params: &Params,
        method: &str,
        payment_proof: Option<&str>,
    ) -> CallOutcome {
        match method.parse::<HttpMethod>() {
            Ok(method) => self.call(endpoint, params, method, payment_proof).await,
            Err(err) => {
                tracing::warn!("Rejected call to {}: {}", endpoint, err);
                CallOutcome::Error(err)
            }
        }
    }

    /// Fetch the service catalog, in server order
    pub async fn discover_services(&self) -> Result<Vec<ServiceDescriptor>> {
        let url = self.url(endpoints::SERVICES);
        tracing::info!("Discovering services from {}", url);

        let data = self.get_free(endpoints::SERVICES).await.map_err(|e| {
            tracing::error!("Error discovering services: {}", e);
            e
        })?;
        let services: Vec<ServiceDescriptor> = serde_json::from_value(data)?;

        tracing::info!("Discovered {} services", services.len());
        Ok(services)
    }

    /// Services whose name or description contains `query`, case-insensitively
    pub async fn search_services(&self, query: &str) -> Result<Vec<ServiceDescriptor>> {
        tracing::info!("Searching services with query: {}", query);

        let needle = query.to_lowercase();
        let results: Vec<ServiceDescriptor> = self
            .discover_services()
            .await?
            .into_iter()
            .filter(|service| service.matches(&needle))
            .collect();

        tracing::info!("Found {} services matching '{}'", results.len(), query);
        Ok(results)
    }

    /// Look up a single service by exact name, ignoring case
    pub async fn get_service_details(&self, name: &str) -> Result<Option<ServiceDescriptor>> {
        let wanted = name.to_lowercase();
        Ok(self
            .discover_services()
            .await?
            .into_iter()
            .find(|service| service.name.to_lowercase() == wanted))
    }

    /// Fetch the marketplace info document.
    ///
    /// A landing page that is not JSON is summarized instead of rejected.
    pub async fn get_marketplace_info(&self) -> Result<Value> {
        tracing::info!("Fetching marketplace info");

        let (status, body) = self
            .send(endpoints::ROOT, &Params::new(), HttpMethod::Get, None)
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let info = serde_json::from_str(&body).unwrap_or_else(|_| {
            json!({
                "name": "x402 Bazaar",
                "status": "online",
                "html": truncate(&body, 500),
            })
        });

        tracing::info!("Marketplace info retrieved successfully");
        Ok(info)
    }

    /// Fetch public marketplace statistics
    pub async fn get_public_stats(&self) -> Result<Value> {
        tracing::info!("Fetching public stats");
        self.get_free(endpoints::PUBLIC_STATS).await
    }

    /// Check that the marketplace catalog is reachable and returns JSON
    pub async fn test_connection(&self) -> bool {
        match self
            .call(endpoints::SERVICES, &Params::new(), HttpMethod::Get, None)
            .await
        {
            CallOutcome::Success { .. } => true,
            CallOutcome::PaymentRequired(_) => {
                tracing::error!("Connection test failed: catalog demanded payment");
                false
            }
            CallOutcome::Error(err) => {
                tracing::error!("Connection test failed: {}", err);
                false
            }
        }
    }

    /// Weather for a city (`GET /api/weather?city=`)
    pub async fn call_weather_api(&self, city: &str, payment_proof: Option<&str>) -> CallOutcome {
        self.call_single(endpoints::WEATHER, "city", city, HttpMethod::Get, payment_proof)
            .await
    }

    /// Web search (`GET /api/search?q=`)
    pub async fn call_search_api(&self, query: &str, payment_proof: Option<&str>) -> CallOutcome {
        self.call_single(endpoints::SEARCH, "q", query, HttpMethod::Get, payment_proof)
            .await
    }

    /// Crypto price (`GET /api/crypto?symbol=`)
    pub async fn call_crypto_api(&self, symbol: &str, payment_proof: Option<&str>) -> CallOutcome {
        self.call_single(endpoints::CRYPTO, "symbol", symbol, HttpMethod::Get, payment_proof)
            .await
    }

    /// AI image generation (`POST /api/image` with `{"prompt": ...}`)
    pub async fn call_image_api(&self, prompt: &str, payment_proof: Option<&str>) -> CallOutcome {
        self.call_single(endpoints::IMAGE, "prompt", prompt, HttpMethod::Post, payment_proof)
            .await
    }

    /// URL scraper (`GET /api/scrape?url=`)
    pub async fn call_scraper_api(&self, url: &str, payment_proof: Option<&str>) -> CallOutcome {
        self.call_single(endpoints::SCRAPE, "url", url, HttpMethod::Get, payment_proof)
            .await
    }

    async fn call_single(
        &self,
        endpoint: &str,
        key: &str,
        value: &str,
        method: HttpMethod,
        payment_proof: Option<&str>,
    ) -> CallOutcome {
        if value.trim().is_empty() {
            return CallOutcome::Error(X402Error::usage(format!(
                "Missing required parameter: {}",
                key
            )));
        }

        let mut params = Params::new();
        params.insert(key.to_string(), Value::String(value.to_string()));
        self.call(endpoint, &params, method, payment_proof).await
    }

    /// GET a free endpoint and return its JSON body
    async fn get_free(&self, endpoint: &str) -> Result<Value> {
        match self
            .call(endpoint, &Params::new(), HttpMethod::Get, None)
            .await
        {
            CallOutcome::Success { data, .. } => Ok(data),
            CallOutcome::PaymentRequired(_) => Err(X402Error::UnexpectedPayment {
                endpoint: endpoint.to_string(),
            }),
            CallOutcome::Error(err) => Err(err),
        }
    }

    /// Send one request and read the whole body
    async fn send(
        &self,
        endpoint: &str,
        params: &Params,
        method: HttpMethod,
        payment_proof: Option<&str>,
    ) -> Result<(StatusCode, String)> {
        if endpoint.trim().is_empty() {
            return Err(X402Error::usage("Missing required parameter: endpoint"));
        }
        validate_params(params)?;

        let url = self.url(endpoint);
        tracing::info!("Calling {} {}", method, url);

        let mut request = self.http.request(method.into(), &url);

        if method.sends_body() {
            request = request.json(params);
        } else {
            let query = query_pairs(params);
            if !query.is_empty() {
                tracing::debug!("Query parameters: {:?}", query);
                request = request.query(&query);
            }
        }

        if let Some(proof) = payment_proof {
            let tx_hash = HeaderValue::from_str(proof)
                .map_err(|_| X402Error::usage("Payment proof is not a valid header value"))?;
            request = request
                .header(headers::PAYMENT_TX_HASH, tx_hash)
                .header(headers::PAYMENT_CHAIN, networks::PAYMENT_CHAIN);
            tracing::info!("Including payment headers");
            tracing::debug!("Payment tx hash: {}", proof);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        Ok((status, body))
    }

    fn transport_error(&self, err: reqwest::Error) -> X402Error {
        if err.is_timeout() {
            tracing::error!("Request timeout");
            X402Error::Timeout {
                seconds: self.config.timeout_secs(),
            }
        } else {
            tracing::error!("Request error: {}", err);
            X402Error::Network { source: err }
        }
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.config.base_url, endpoint)
        } else {
            format!("{}/{}", self.config.base_url, endpoint)
        }
    }
}

/// Turn a status and body into exactly one outcome variant
fn classify(
    status: StatusCode,
    body: &str,
    endpoint: &str,
    method: HttpMethod,
    payment_proof: Option<&str>,
) -> CallOutcome {
    if status.is_success() {
        tracing::info!("API call successful ({})", status);
        return match serde_json::from_str::<Value>(body) {
            Ok(data) => CallOutcome::Success {
                data,
                endpoint: endpoint.to_string(),
                method,
                payment_status: if payment_proof.is_some() {
                    PaymentStatus::Completed
                } else {
                    PaymentStatus::Free
                },
            },
            Err(source) => {
                tracing::error!("Response from {} is not valid JSON", endpoint);
                CallOutcome::Error(X402Error::InvalidJson {
                    status: status.as_u16(),
                    source,
                })
            }
        };
    }

    if status == StatusCode::PAYMENT_REQUIRED {
        tracing::info!("Payment required (402)");
        let parsed = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
        return match PaymentDetails::from_body(&parsed) {
            Ok(details) => CallOutcome::PaymentRequired(details),
            Err(err) => {
                tracing::error!("Unusable payment details from {}: {}", endpoint, err);
                CallOutcome::Error(err)
            }
        };
    }

    CallOutcome::Error(status_error(status, body))
}

fn status_error(status: StatusCode, body: &str) -> X402Error {
    match status.as_u16() {
        400 => tracing::warn!("Bad request (400)"),
        429 => tracing::warn!("Rate limited (429)"),
        code if code >= 500 => tracing::error!("Server error ({})", code),
        code => tracing::error!("Unexpected status code: {}", code),
    }

    let message = match status.as_u16() {
        429 => "Rate limit exceeded. Please try again later.".to_string(),
        500 => "Server error. Please try again later.".to_string(),
        _ => match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => match object.get("error") {
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
                None => status
                    .canonical_reason()
                    .unwrap_or("Unexpected status code")
                    .to_string(),
            },
            _ if !body.trim().is_empty() => truncate(body, 200),
            _ => status
                .canonical_reason()
                .unwrap_or("Unexpected status code")
                .to_string(),
        },
    };

    X402Error::Status {
        status: status.as_u16(),
        message,
    }
}

fn validate_params(params: &Params) -> Result<()> {
    for (key, value) in params {
        if value.is_array() || value.is_object() {
            return Err(X402Error::usage(format!(
                "Parameter '{}' must be a string, number or boolean",
                key
            )));
        }
    }
    Ok(())
}

fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
