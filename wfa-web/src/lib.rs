//! wfa-web library - content platform web service
//!
//! Server-rendered page composers backed by the hosted content store, an
//! in-process revalidation cache, and the lead-capture / webhook API
//! surface.

use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use wfa_common::config::SiteConfig;
use wfa_common::content::{ContentClient, UserReview};
use wfa_common::Result;

pub mod api;
pub mod cache;
pub mod clients;
pub mod pages;
pub mod revalidate;
pub mod roi;
pub mod seo;
pub mod tabs;

use api::membership::Membership;
use cache::PageCache;
use clients::convertkit::ConvertKitClient;
use clients::mailchimp::MailchimpClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    /// Content store query/mutation client
    pub content: Arc<ContentClient>,
    /// Rendered-page cache with TTL + webhook invalidation
    pub cache: PageCache,
    /// Newsletter providers; None when the integration is not configured
    pub convertkit: Option<Arc<ConvertKitClient>>,
    pub mailchimp: Option<Arc<MailchimpClient>>,
    /// Mock membership store (no persistence by design)
    pub memberships: Arc<RwLock<HashMap<Uuid, Membership>>>,
    /// Moderation queue for user-review submissions when no content store
    /// write token is configured
    pub pending_reviews: Arc<RwLock<Vec<UserReview>>>,
}

impl AppState {
    /// Create application state from resolved configuration
    pub fn new(config: SiteConfig) -> Result<Self> {
        let content = ContentClient::new(&config.content_store)?;

        let convertkit = config
            .convertkit
            .as_ref()
            .map(ConvertKitClient::new)
            .transpose()?
            .map(Arc::new);

        let mailchimp = config
            .mailchimp
            .as_ref()
            .map(MailchimpClient::new)
            .transpose()?
            .map(Arc::new);

        let cache = PageCache::new(std::time::Duration::from_secs(
            config.revalidate_interval_secs,
        ));

        Ok(Self {
            config: Arc::new(config),
            content: Arc::new(content),
            cache,
            convertkit,
            mailchimp,
            memberships: Arc::new(RwLock::new(HashMap::new())),
            pending_reviews: Arc::new(RwLock::new(Vec::new())),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // Form/webhook API surface
    let api = Router::new()
        .route("/api/newsletter", post(api::newsletter::subscribe))
        .route("/api/contact", post(api::contact::submit))
        .route(
            "/api/membership",
            get(api::membership::lookup)
                .post(api::membership::create)
                .delete(api::membership::remove),
        )
        .route(
            "/api/payment",
            get(api::payment::checkout_session).post(api::payment::webhook),
        )
        .route("/api/reviews/submit", post(api::reviews::submit))
        // One revalidation handler mounted on both historical paths
        .route("/api/webhook", post(api::webhook::revalidate))
        .route("/api/webhook/sanity", post(api::webhook::revalidate))
        .route("/api/analytics", post(api::analytics::ingest))
        .route("/api/roi", get(roi::calculate));

    // Server-rendered pages
    let site = Router::new()
        .route("/", get(pages::home::home_page))
        .route("/reviews/:slug", get(pages::review::review_page))
        .route("/guides/:slug", get(pages::guide::guide_page))
        .route("/blog", get(pages::blog::blog_index))
        .route("/blog/:slug", get(pages::blog::post_page))
        .route("/category/:slug", get(pages::category::category_page))
        .route("/author/:slug", get(pages::author::author_page));

    Router::new()
        .merge(api)
        .merge(site)
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
