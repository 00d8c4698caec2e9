//! In-process rendered-page cache with incremental revalidation
//!
//! Two overlapping, uncoordinated staleness controls (matching the
//! platform behavior the site relies on):
//! - time-based expiry: entries older than the TTL are treated as absent,
//!   so the next request re-renders;
//! - explicit invalidation: the revalidation webhook marks entries stale by
//!   path or tag.
//!
//! Invalidation is mark-stale, not compute-and-store, so concurrent or
//! duplicate invalidations of the same path are safe no-ops.

use crate::revalidate::InvalidationSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct CacheEntry {
    html: String,
    tags: Vec<String>,
    rendered_at: Instant,
    stale: bool,
}

/// Shared rendered-page cache
#[derive(Clone)]
pub struct PageCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Fetch a fresh, non-stale entry
    pub async fn get(&self, path: &str) -> Option<String> {
        let entries = self.inner.read().await;
        let entry = entries.get(path)?;
        if entry.stale || entry.rendered_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.html.clone())
    }

    /// Store a freshly rendered page under its path, tagged for webhook
    /// invalidation
    pub async fn insert(&self, path: &str, html: String, tags: Vec<String>) {
        let mut entries = self.inner.write().await;
        entries.insert(
            path.to_string(),
            CacheEntry {
                html,
                tags,
                rendered_at: Instant::now(),
                stale: false,
            },
        );
    }

    /// Mark a single path stale. No-op when the path was never rendered.
    pub async fn invalidate_path(&self, path: &str) {
        let mut entries = self.inner.write().await;
        if let Some(entry) = entries.get_mut(path) {
            entry.stale = true;
            debug!(path, "Cache entry marked stale");
        }
    }

    /// Mark every entry carrying the tag stale; returns the count touched
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.inner.write().await;
        let mut touched = 0;
        for entry in entries.values_mut() {
            if entry.tags.iter().any(|t| t == tag) {
                entry.stale = true;
                touched += 1;
            }
        }
        touched
    }

    /// Apply a webhook invalidation set (paths then tags)
    pub async fn apply(&self, set: &InvalidationSet) {
        for path in &set.paths {
            self.invalidate_path(path).await;
        }
        for tag in &set.tags {
            self.invalidate_tag(tag).await;
        }
    }

    /// Number of entries currently held (fresh or stale)
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
