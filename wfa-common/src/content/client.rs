//! Content store query/mutation client
//!
//! Thin HTTP client over the hosted content store's query and mutation
//! endpoints. Every request is bounded by a fixed 5-second timeout; there
//! are no retries — callers surface upstream failures as generic errors.

use super::models::{Author, BlogPost, Category, Guide, ReviewSummary, SoftwareReview, UserReview};
use super::queries;
use crate::config::ContentStoreConfig;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Upstream request timeout (content store and marketing services alike)
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Query response envelope
#[derive(Debug, Deserialize)]
struct QueryEnvelope<T> {
    result: T,
}

/// Mutation response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutateEnvelope {
    transaction_id: String,
}

/// Client for the hosted content store
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    query_url: String,
    mutate_url: String,
    api_token: Option<String>,
}

impl ContentClient {
    pub fn new(config: &ContentStoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        let base = format!(
            "https://{}.api.sanity.io/{}",
            config.project_id, config.api_version
        );

        Ok(Self {
            http,
            query_url: format!("{}/data/query/{}", base, config.dataset),
            mutate_url: format!("{}/data/mutate/{}", base, config.dataset),
            api_token: config.api_token.clone(),
        })
    }

    /// Execute a named query with `$name`-style parameters.
    ///
    /// Parameter values are JSON-encoded on the wire, so string params
    /// arrive quoted as the query language expects.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut request = self.http.get(&self.query_url).query(&[("query", groq)]);

        for (name, value) in params {
            let encoded = serde_json::to_string(value)
                .map_err(|e| Error::Internal(format!("Failed to encode query param: {}", e)))?;
            request = request.query(&[(format!("${}", name), encoded)]);
        }

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        debug!(params = params.len(), "Content store query");

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Content store query failed ({}): {}",
                status, body
            )));
        }

        let envelope: QueryEnvelope<T> = response.json().await?;
        Ok(envelope.result)
    }

    /// Create a document via the mutation endpoint. Requires the write token.
    pub async fn create_document(&self, document: serde_json::Value) -> Result<String> {
        let token = self.api_token.as_ref().ok_or_else(|| {
            Error::Config("Content store write token not configured".to_string())
        })?;

        let payload = serde_json::json!({
            "mutations": [{ "create": document }]
        });

        let response = self
            .http
            .post(&self.mutate_url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Content store mutation failed ({}): {}",
                status, body
            )));
        }

        let envelope: MutateEnvelope = response.json().await?;
        Ok(envelope.transaction_id)
    }

    // ------------------------------------------------------------------
    // Typed query helpers, one per page type
    // ------------------------------------------------------------------

    pub async fn review_by_slug(&self, slug: &str) -> Result<Option<SoftwareReview>> {
        self.query(queries::REVIEW_BY_SLUG, &[("slug", slug)]).await
    }

    pub async fn guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        self.query(queries::GUIDE_BY_SLUG, &[("slug", slug)]).await
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        self.query(queries::POST_BY_SLUG, &[("slug", slug)]).await
    }

    pub async fn recent_posts(&self) -> Result<Vec<BlogPost>> {
        self.query(queries::RECENT_POSTS, &[]).await
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.query(queries::CATEGORY_BY_SLUG, &[("slug", slug)])
            .await
    }

    pub async fn posts_by_category(&self, slug: &str) -> Result<Vec<BlogPost>> {
        self.query(queries::POSTS_BY_CATEGORY, &[("slug", slug)])
            .await
    }

    pub async fn author_by_slug(&self, slug: &str) -> Result<Option<Author>> {
        self.query(queries::AUTHOR_BY_SLUG, &[("slug", slug)]).await
    }

    pub async fn posts_by_author(&self, slug: &str) -> Result<Vec<BlogPost>> {
        self.query(queries::POSTS_BY_AUTHOR, &[("slug", slug)]).await
    }

    pub async fn featured_reviews(&self) -> Result<Vec<ReviewSummary>> {
        self.query(queries::FEATURED_REVIEWS, &[]).await
    }

    pub async fn recent_guides(&self) -> Result<Vec<Guide>> {
        self.query(queries::RECENT_GUIDES, &[]).await
    }

    pub async fn approved_user_reviews(&self, slug: &str) -> Result<Vec<UserReview>> {
        self.query(queries::APPROVED_USER_REVIEWS, &[("slug", slug)])
            .await
    }

    /// Enumerate all slugs of a document type (static path generation)
    pub async fn all_slugs(&self, doc_type: &str) -> Result<Vec<String>> {
        self.query(queries::ALL_SLUGS_BY_TYPE, &[("type", doc_type)])
            .await
    }

    /// Raw document dump for a type (maintenance CLI)
    pub async fn all_documents(&self, doc_type: &str) -> Result<Vec<serde_json::Value>> {
        self.query(queries::ALL_DOCUMENTS_BY_TYPE, &[("type", doc_type)])
            .await
    }

    /// All guides with item summaries (maintenance CLI audit)
    pub async fn all_guides(&self) -> Result<Vec<Guide>> {
        self.query(queries::ALL_GUIDES, &[]).await
    }

    /// Submit a user review as a pending moderation document
    pub async fn submit_user_review(&self, review: &UserReview) -> Result<String> {
        self.create_document(review.to_document()).await
    }
}
