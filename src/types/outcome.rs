//! Classified result of a single marketplace call

use super::constants::payment_keys;
use super::method::HttpMethod;
use crate::X402Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Whether a successful call was paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment proof was attached
    Free,
    /// The call was retried with a payment proof and accepted
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Free => "free",
            PaymentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment instructions extracted from a 402 response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Amount to pay, verbatim from the server
    pub amount: String,
    /// Recipient wallet address
    pub address: String,
    /// Chain identifier (e.g., "base")
    pub chain: String,
    /// Token identifier (e.g., "USDC")
    pub token: String,
}

impl PaymentDetails {
    /// Extract the four payment fields from a 402 body.
    ///
    /// Every missing field is reported; nothing is defaulted.
    pub fn from_body(body: &Value) -> crate::Result<Self> {
        let empty = Map::new();
        let object = body.as_object().unwrap_or(&empty);

        let amount = field_text(object, payment_keys::AMOUNT)
            .or_else(|| field_text(object, payment_keys::AMOUNT_LEGACY));
        let address = field_text(object, payment_keys::ADDRESS);
        let chain = field_text(object, payment_keys::CHAIN);
        let token = field_text(object, payment_keys::TOKEN);

        match (amount, address, chain, token) {
            (Some(amount), Some(address), Some(chain), Some(token)) => Ok(Self {
                amount,
                address,
                chain,
                token,
            }),
            (amount, address, chain, token) => {
                let missing = [
                    (amount.is_none(), payment_keys::AMOUNT),
                    (address.is_none(), payment_keys::ADDRESS),
                    (chain.is_none(), payment_keys::CHAIN),
                    (token.is_none(), payment_keys::TOKEN),
                ]
                .into_iter()
                .filter_map(|(absent, key)| absent.then_some(key))
                .collect();
                Err(X402Error::MalformedPayment { missing })
            }
        }
    }

    /// Human-readable steps for completing the payment out of band
    pub fn instructions(&self) -> Vec<String> {
        vec![
            format!(
                "1. Send {} {} on {} to: {}",
                self.amount,
                self.token,
                self.chain.to_uppercase(),
                self.address
            ),
            "2. Wait for transaction confirmation".to_string(),
            "3. Call this endpoint again with transaction hash".to_string(),
        ]
    }
}

// Strings are taken as-is, numbers by their literal JSON text
fn field_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Outcome of one marketplace call: exactly one of success, payment required or error
#[derive(Debug)]
pub enum CallOutcome {
    /// 2xx response with a JSON body
    Success {
        /// Response body, unchanged
        data: Value,
        /// Endpoint that was called
        endpoint: String,
        /// Method that was used
        method: HttpMethod,
        /// Whether a payment proof accompanied the request
        payment_status: PaymentStatus,
    },
    /// 402 response carrying complete payment instructions
    PaymentRequired(PaymentDetails),
    /// Anything else
    Error(X402Error),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    pub fn is_payment_required(&self) -> bool {
        matches!(self, CallOutcome::PaymentRequired(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CallOutcome::Error(_))
    }

    /// Response payload for successful calls
    pub fn data(&self) -> Option<&Value> {
        match self {
            CallOutcome::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn payment_details(&self) -> Option<&PaymentDetails> {
        match self {
            CallOutcome::PaymentRequired(details) => Some(details),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&X402Error> {
        match self {
            CallOutcome::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Convert into a `Result`, treating a payment requirement as success
    pub fn into_result(self) -> crate::Result<CallOutcome> {
        match self {
            CallOutcome::Error(err) => Err(err),
            other => Ok(other),
        }
    }
}
