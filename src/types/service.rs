//! Service catalog types

use super::constants::PAYMENT_TOKEN;
use super::method::HttpMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Price of a single call to a marketplace service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cost {
    /// Amount in whole token units (e.g., 0.005 USDC)
    pub amount: Decimal,
    /// Currency unit the amount is expressed in
    pub currency: &'static str,
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}

/// Catalog entry describing one callable marketplace endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Unique service name (e.g., "Weather API")
    pub name: String,
    /// Human-readable description
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    /// Endpoint path relative to the marketplace origin
    #[serde(default, deserialize_with = "deserialize_text")]
    pub endpoint: String,
    /// Cost per call in USDC; absent or unparsable prices are treated as free
    #[serde(
        default,
        deserialize_with = "deserialize_cost",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_usdc: Option<Decimal>,
    /// HTTP method the endpoint expects
    #[serde(default, deserialize_with = "deserialize_method")]
    pub method: HttpMethod,
    /// Catalog category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags
    #[serde(
        default,
        deserialize_with = "deserialize_tags",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

impl ServiceDescriptor {
    /// Per-call cost, or `None` when the service is free
    pub fn cost(&self) -> Option<Cost> {
        self.cost_usdc.map(|amount| Cost {
            amount,
            currency: PAYMENT_TOKEN,
        })
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

fn deserialize_cost<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    })
}

// Catalog entries with an unknown method still list; calls go through as GET
fn deserialize_method<'de, D>(deserializer: D) -> Result<HttpMethod, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(m)) => m.parse::<HttpMethod>().unwrap_or_default(),
        _ => HttpMethod::default(),
    })
}

// `null` reads as empty, like a missing key
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        Some(Value::String(tag)) if !tag.trim().is_empty() => vec![tag],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_from_catalog_json() {
        let service: ServiceDescriptor = serde_json::from_value(json!({
            "name": "Weather API",
            "description": "Current weather for any city",
            "endpoint": "/api/weather",
            "cost_usdc": 0.005,
            "method": "get",
            "category": "Data",
            "tags": ["weather", "forecast"]
        }))
        .unwrap();

        assert_eq!(service.name, "Weather API");
        assert_eq!(service.endpoint, "/api/weather");
        assert_eq!(service.method, HttpMethod::Get);
        assert_eq!(service.category.as_deref(), Some("Data"));

        let cost = service.cost().unwrap();
        assert_eq!(cost.amount, Decimal::from_str("0.005").unwrap());
        assert_eq!(cost.to_string(), "0.005 USDC");
    }

    #[test]
    fn test_descriptor_tolerates_sparse_entries() {
        let service: ServiceDescriptor = serde_json::from_value(json!({
            "name": "Mystery",
            "cost_usdc": "Free",
            "method": "PATCH"
        }))
        .unwrap();

        assert_eq!(service.description, "");
        assert!(service.cost().is_none());
        assert_eq!(service.method, HttpMethod::Get);
        assert!(service.tags.is_empty());
    }

    #[test]
    fn test_descriptor_tolerates_null_and_odd_fields() {
        let service: ServiceDescriptor = serde_json::from_value(json!({
            "name": "Beta",
            "description": null,
            "endpoint": null,
            "cost_usdc": null,
            "method": 7,
            "category": null,
            "tags": ["beta", 3, null]
        }))
        .unwrap();

        assert_eq!(service.description, "");
        assert_eq!(service.endpoint, "");
        assert!(service.cost().is_none());
        assert_eq!(service.method, HttpMethod::Get);
        assert!(service.category.is_none());
        assert_eq!(service.tags, vec!["beta"]);

        let service: ServiceDescriptor =
            serde_json::from_value(json!({"name": "Gamma", "tags": null})).unwrap();
        assert!(service.tags.is_empty());
    }

    #[test]
    fn test_string_cost() {
        let service: ServiceDescriptor = serde_json::from_value(json!({
            "name": "Image API",
            "cost_usdc": "0.05",
            "method": "POST"
        }))
        .unwrap();
        assert_eq!(service.cost_usdc, Some(Decimal::from_str("0.05").unwrap()));
        assert_eq!(service.method, HttpMethod::Post);
    }

    #[test]
    fn test_matches_name_or_description() {
        let service: ServiceDescriptor = serde_json::from_value(json!({
            "name": "Crypto Prices",
            "description": "Live token quotes"
        }))
        .unwrap();
        assert!(service.matches("crypto"));
        assert!(service.matches("token"));
        assert!(!service.matches("weather"));
    }
}
