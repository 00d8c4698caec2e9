//! wfa-web - Workflow Automation review platform web service
//!
//! Serves the content-driven site (reviews, guides, blog) with incremental
//! page caching, the lead-capture API endpoints, and the content store
//! revalidation webhook.

use anyhow::Result;
use tracing::info;
use wfa_common::config::SiteConfig;
use wfa_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting WFA web service (wfa-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = SiteConfig::load()?;
    info!(
        "Content store: project={} dataset={}",
        config.content_store.project_id, config.content_store.dataset
    );
    if config.convertkit.is_none() && config.mailchimp.is_none() {
        info!("No newsletter provider configured; /api/newsletter will report upstream failure");
    }
    if config.content_store.webhook_secret.is_none() {
        info!("SANITY_WEBHOOK_SECRET not set; revalidation webhook signature checks disabled");
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("wfa-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
