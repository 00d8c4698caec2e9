//! ConvertKit API client
//!
//! Form subscriptions for the newsletter endpoint and best-effort contact
//! tagging for the contact form.

use crate::clients::SubscribeOutcome;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wfa_common::config::ConvertKitConfig;

const CONVERTKIT_BASE_URL: &str = "https://api.convertkit.com/v3";
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// ConvertKit client errors
#[derive(Debug, Error)]
pub enum ConvertKitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct SubscriptionEnvelope {
    subscription: Option<SubscriptionBody>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionBody {
    id: Option<u64>,
}

/// ConvertKit API client
pub struct ConvertKitClient {
    http: reqwest::Client,
    api_key: String,
    form_id: String,
}

impl ConvertKitClient {
    pub fn new(config: &ConvertKitConfig) -> Result<Self, wfa_common::Error> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            form_id: config.form_id.clone(),
        })
    }

    /// Subscribe an address to the configured form
    pub async fn subscribe(
        &self,
        email: &str,
        first_name: Option<&str>,
    ) -> Result<SubscribeOutcome, ConvertKitError> {
        let url = format!("{}/forms/{}/subscribe", CONVERTKIT_BASE_URL, self.form_id);

        let mut payload = serde_json::json!({
            "api_key": self.api_key,
            "email": email,
        });
        if let Some(name) = first_name {
            payload["first_name"] = serde_json::json!(name);
        }

        debug!("Subscribing via ConvertKit form {}", self.form_id);

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ConvertKitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConvertKitError::Api(status.as_u16(), body));
        }

        let envelope: SubscriptionEnvelope = response
            .json()
            .await
            .map_err(|e| ConvertKitError::Parse(e.to_string()))?;

        info!(
            subscription_id = envelope.subscription.and_then(|s| s.id),
            "ConvertKit subscription accepted"
        );
        Ok(SubscribeOutcome::Subscribed)
    }

    /// Tag a contact by email. Best-effort: callers log failures and move on.
    pub async fn tag_contact(&self, email: &str, tag: &str) -> Result<(), ConvertKitError> {
        let url = format!("{}/tags/{}/subscribe", CONVERTKIT_BASE_URL, tag);

        let payload = serde_json::json!({
            "api_key": self.api_key,
            "email": email,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ConvertKitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConvertKitError::Api(status.as_u16(), body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ConvertKitConfig {
            api_key: "ck_key".to_string(),
            form_id: "12345".to_string(),
        };
        assert!(ConvertKitClient::new(&config).is_ok());
    }
}
