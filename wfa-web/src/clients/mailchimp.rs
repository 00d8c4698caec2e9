//! Mailchimp API client
//!
//! List-member subscription against the datacenter host derived from the
//! server prefix. The "Member Exists" API error is mapped to an
//! already-subscribed success, everything else surfaces as an error.

use crate::clients::SubscribeOutcome;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wfa_common::config::MailchimpConfig;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Mailchimp client errors
#[derive(Debug, Error)]
pub enum MailchimpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),
}

/// Mailchimp error response body
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// Mailchimp API client
pub struct MailchimpClient {
    http: reqwest::Client,
    api_key: String,
    members_url: String,
}

impl MailchimpClient {
    pub fn new(config: &MailchimpConfig) -> Result<Self, wfa_common::Error> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            members_url: format!(
                "https://{}.api.mailchimp.com/3.0/lists/{}/members",
                config.server_prefix, config.list_id
            ),
        })
    }

    /// Add an address to the list with "subscribed" status
    pub async fn add_member(
        &self,
        email: &str,
        first_name: Option<&str>,
    ) -> Result<SubscribeOutcome, MailchimpError> {
        let mut payload = serde_json::json!({
            "email_address": email,
            "status": "subscribed",
        });
        if let Some(name) = first_name {
            payload["merge_fields"] = serde_json::json!({ "FNAME": name });
        }

        debug!("Adding list member via Mailchimp");

        let response = self
            .http
            .post(&self.members_url)
            .basic_auth("anystring", Some(&self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailchimpError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("Mailchimp subscription accepted");
            return Ok(SubscribeOutcome::Subscribed);
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(error_body) = serde_json::from_str::<ApiErrorBody>(&body) {
            // Duplicate signup is success for a marketing form
            if error_body.title == "Member Exists" {
                info!("Mailchimp member already subscribed");
                return Ok(SubscribeOutcome::AlreadySubscribed);
            }
            return Err(MailchimpError::Api(
                status.as_u16(),
                format!("{}: {}", error_body.title, error_body.detail),
            ));
        }

        Err(MailchimpError::Api(status.as_u16(), body))
    }
}
