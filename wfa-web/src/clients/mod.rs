//! Upstream marketing-service clients
//!
//! Best-effort integrations: fixed 5-second timeouts, no retries, no
//! idempotency keys. A dropped request is simply lost.

pub mod convertkit;
pub mod mailchimp;

/// Terminal state of a subscription attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    /// The list already contains this address; treated as success
    AlreadySubscribed,
}
