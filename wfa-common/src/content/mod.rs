//! Content store integration: document models, rich-text blocks, named
//! queries, and the query/mutation client.

pub mod blocks;
pub mod client;
pub mod models;
pub mod queries;

pub use blocks::{ContentBlock, Span};
pub use client::ContentClient;
pub use models::{
    Author, BlogPost, Category, Guide, GuideItem, GuideOverrides, PricingTier, ReviewStatus,
    ReviewSummary, ScoreSet, Screenshot, Slug, SoftwareReview, UserReview,
};
