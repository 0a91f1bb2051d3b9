//! Text and field rendering of command results

use crate::types::{CallOutcome, ServiceDescriptor};
use crate::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Services shown in full by the list command
pub const LIST_LIMIT: usize = 20;

const TAG: &str = "[x402 Bazaar]";

/// Result of a dispatched command: text for the agent, fields for machines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub text: String,
    pub fields: Value,
}

fn service_entry(service: &ServiceDescriptor) -> String {
    let description = if service.description.is_empty() {
        "No description"
    } else {
        service.description.as_str()
    };
    let cost = service
        .cost()
        .map(|cost| cost.to_string())
        .unwrap_or_else(|| "Free".to_string());

    format!("  • {}\n    {}\n    Cost: {}\n", service.name, description, cost)
}

pub(crate) fn service_list(services: &[ServiceDescriptor]) -> Result<CommandOutput> {
    let mut text = format!("{} {} APIs available:\n\n", TAG, services.len());
    for service in services.iter().take(LIST_LIMIT) {
        text.push_str(&service_entry(service));
        text.push('\n');
    }
    if services.len() > LIST_LIMIT {
        text.push_str(&format!(
            "  ... and {} more APIs\n",
            services.len() - LIST_LIMIT
        ));
    }

    Ok(CommandOutput {
        text,
        fields: json!({
            "count": services.len(),
            "services": serde_json::to_value(services)?,
        }),
    })
}

pub(crate) fn search_results(query: &str, services: &[ServiceDescriptor]) -> Result<CommandOutput> {
    let mut text = format!(
        "{} Found {} APIs matching '{}':\n\n",
        TAG,
        services.len(),
        query
    );
    for service in services {
        text.push_str(&service_entry(service));
        text.push('\n');
    }

    Ok(CommandOutput {
        text,
        fields: json!({
            "query": query,
            "count": services.len(),
            "services": serde_json::to_value(services)?,
        }),
    })
}

pub(crate) fn call_outcome(outcome: &CallOutcome) -> Result<CommandOutput> {
    Ok(match outcome {
        CallOutcome::Success {
            data,
            endpoint,
            method,
            payment_status,
        } => CommandOutput {
            text: format!(
                "{} Success! Response:\n{}",
                TAG,
                serde_json::to_string_pretty(data)?
            ),
            fields: json!({
                "status": "success",
                "endpoint": endpoint,
                "method": method,
                "payment_status": payment_status,
                "data": data,
            }),
        },
        CallOutcome::PaymentRequired(details) => {
            let instructions = details.instructions();
            CommandOutput {
                text: format!(
                    "{} Payment required: {} {}\n{}",
                    TAG,
                    details.amount,
                    details.token,
                    instructions.join("\n")
                ),
                fields: json!({
                    "status": "payment_required",
                    "payment_details": details,
                    "instructions": instructions,
                }),
            }
        }
        CallOutcome::Error(err) => CommandOutput {
            text: format!("{} Error: {}", TAG, err),
            fields: json!({
                "status": "error",
                "error": err.to_string(),
                "status_code": err.status_code(),
            }),
        },
    })
}

pub(crate) fn marketplace_info(info: &Value) -> Result<CommandOutput> {
    Ok(CommandOutput {
        text: format!(
            "{} Marketplace Information:\n{}",
            TAG,
            serde_json::to_string_pretty(info)?
        ),
        fields: info.clone(),
    })
}
