//! Configuration loading with tiered resolution
//!
//! Every key resolves in priority order:
//! 1. Environment variable (highest priority)
//! 2. TOML config file (`WFA_CONFIG` path, or the platform config dir)
//! 3. Compiled default (fallback)
//!
//! Missing optional integrations (ConvertKit, Mailchimp, Stripe, content
//! store write token) degrade gracefully: the affected endpoint logs a
//! warning and skips the integration rather than aborting startup.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// HTTP server bind configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Hosted content store (Sanity-shaped) connection settings
#[derive(Debug, Clone)]
pub struct ContentStoreConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Write token for mutations (user-review submissions). Optional:
    /// without it submissions fall back to the in-memory moderation queue.
    pub api_token: Option<String>,
    /// Shared secret for change-notification webhook verification.
    /// Unset skips verification entirely.
    pub webhook_secret: Option<String>,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            project_id: "wfa-demo".to_string(),
            dataset: "production".to_string(),
            api_version: "v2024-01-01".to_string(),
            api_token: None,
            webhook_secret: None,
        }
    }
}

/// ConvertKit newsletter integration credentials
#[derive(Debug, Clone)]
pub struct ConvertKitConfig {
    pub api_key: String,
    pub form_id: String,
}

/// Mailchimp newsletter integration credentials
#[derive(Debug, Clone)]
pub struct MailchimpConfig {
    pub api_key: String,
    pub list_id: String,
    /// Datacenter prefix, e.g. "us21" → us21.api.mailchimp.com
    pub server_prefix: String,
}

/// Top-level site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub server: ServerConfig,
    /// Public base URL used for canonical links and mock checkout URLs
    pub site_url: String,
    pub content_store: ContentStoreConfig,
    pub convertkit: Option<ConvertKitConfig>,
    pub mailchimp: Option<MailchimpConfig>,
    pub stripe_webhook_secret: Option<String>,
    /// Page cache time-based revalidation interval (seconds)
    pub revalidate_interval_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site_url: "http://localhost:8080".to_string(),
            content_store: ContentStoreConfig::default(),
            convertkit: None,
            mailchimp: None,
            stripe_webhook_secret: None,
            revalidate_interval_secs: 3600,
        }
    }
}

/// TOML file schema (all keys optional; env vars override)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub site_url: Option<String>,
    pub sanity_project_id: Option<String>,
    pub sanity_dataset: Option<String>,
    pub sanity_api_version: Option<String>,
    pub sanity_api_token: Option<String>,
    pub sanity_webhook_secret: Option<String>,
    pub convertkit_api_key: Option<String>,
    pub convertkit_form_id: Option<String>,
    pub mailchimp_api_key: Option<String>,
    pub mailchimp_list_id: Option<String>,
    pub mailchimp_server_prefix: Option<String>,
    pub stripe_webhook_secret: Option<String>,
    pub revalidate_interval_secs: Option<u64>,
}

impl TomlConfig {
    /// Load the TOML config file if one exists.
    ///
    /// Path resolution: `WFA_CONFIG` env var, then the platform config
    /// directory (`~/.config/wfa/config.toml` on Linux). A missing file is
    /// not an error; a malformed file is.
    pub fn load() -> Result<Self> {
        let path = match config_file_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Resolve the config file path (does not check existence)
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WFA_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("wfa").join("config.toml"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl SiteConfig {
    /// Load configuration with env → TOML → default resolution per key
    pub fn load() -> Result<Self> {
        let toml_config = TomlConfig::load()?;
        Ok(Self::resolve(&toml_config))
    }

    /// Resolve against an already-loaded TOML layer (testable seam)
    pub fn resolve(toml: &TomlConfig) -> Self {
        let defaults = SiteConfig::default();

        let server = ServerConfig {
            host: env_var("WFA_HOST")
                .or_else(|| toml.host.clone())
                .unwrap_or(defaults.server.host),
            port: env_var("WFA_PORT")
                .and_then(|v| v.parse().ok())
                .or(toml.port)
                .unwrap_or(defaults.server.port),
        };

        let content_store = ContentStoreConfig {
            project_id: env_var("SANITY_PROJECT_ID")
                .or_else(|| toml.sanity_project_id.clone())
                .unwrap_or(defaults.content_store.project_id),
            dataset: env_var("SANITY_DATASET")
                .or_else(|| toml.sanity_dataset.clone())
                .unwrap_or(defaults.content_store.dataset),
            api_version: env_var("SANITY_API_VERSION")
                .or_else(|| toml.sanity_api_version.clone())
                .unwrap_or(defaults.content_store.api_version),
            api_token: env_var("SANITY_API_TOKEN").or_else(|| toml.sanity_api_token.clone()),
            webhook_secret: env_var("SANITY_WEBHOOK_SECRET")
                .or_else(|| toml.sanity_webhook_secret.clone()),
        };

        let convertkit = match (
            env_var("CONVERTKIT_API_KEY").or_else(|| toml.convertkit_api_key.clone()),
            env_var("CONVERTKIT_FORM_ID").or_else(|| toml.convertkit_form_id.clone()),
        ) {
            (Some(api_key), Some(form_id)) => Some(ConvertKitConfig { api_key, form_id }),
            (Some(_), None) => {
                warn!("CONVERTKIT_API_KEY set without CONVERTKIT_FORM_ID; ConvertKit disabled");
                None
            }
            _ => None,
        };

        let mailchimp = match (
            env_var("MAILCHIMP_API_KEY").or_else(|| toml.mailchimp_api_key.clone()),
            env_var("MAILCHIMP_LIST_ID").or_else(|| toml.mailchimp_list_id.clone()),
            env_var("MAILCHIMP_SERVER_PREFIX").or_else(|| toml.mailchimp_server_prefix.clone()),
        ) {
            (Some(api_key), Some(list_id), Some(server_prefix)) => Some(MailchimpConfig {
                api_key,
                list_id,
                server_prefix,
            }),
            (Some(_), _, _) => {
                warn!("MAILCHIMP_API_KEY set but list id or server prefix missing; Mailchimp disabled");
                None
            }
            _ => None,
        };

        SiteConfig {
            server,
            site_url: env_var("SITE_URL")
                .or_else(|| toml.site_url.clone())
                .unwrap_or(defaults.site_url),
            content_store,
            convertkit,
            mailchimp,
            stripe_webhook_secret: env_var("STRIPE_WEBHOOK_SECRET")
                .or_else(|| toml.stripe_webhook_secret.clone()),
            revalidate_interval_secs: env_var("WFA_REVALIDATE_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .or(toml.revalidate_interval_secs)
                .unwrap_or(defaults.revalidate_interval_secs),
        }
    }

    /// Bind address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
