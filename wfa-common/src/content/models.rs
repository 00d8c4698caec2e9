//! Typed content store document models
//!
//! The application defines the shapes it expects; documents live in the
//! external content store and are read-only here (except user-submitted
//! reviews, which are created pending moderation). No referential
//! integrity is enforced in this layer: a broken reference deserializes to
//! `None` and is rendered as "Unknown" by the page composers.

use super::blocks::ContentBlock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document slug wrapper (`{"_type": "slug", "current": "..."}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

/// Per-criterion review scores, 0-10 scale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    #[serde(default)]
    pub overall: f64,
    #[serde(default)]
    pub ease_of_use: f64,
    #[serde(default)]
    pub features: f64,
    #[serde(default)]
    pub value_for_money: f64,
    #[serde(default)]
    pub support: f64,
}

/// A single pricing tier on a review page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub name: String,
    /// Display price ("$29", "Free", "Custom")
    #[serde(default)]
    pub price: String,
    /// Billing period ("per month", "per user/month")
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
}

/// Product screenshot with optional caption
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A full software review document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareReview {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub scores: ScoreSet,
    #[serde(default)]
    pub pricing: Vec<PricingTier>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    /// One-line "best for" positioning statement
    #[serde(default)]
    pub best_for: Option<String>,
    /// Outbound tracking URL for revenue attribution
    #[serde(default)]
    pub affiliate_link: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub body: Vec<ContentBlock>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Projection of a review embedded in a guide item reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub scores: ScoreSet,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub best_for: Option<String>,
    #[serde(default)]
    pub affiliate_link: Option<String>,
}

/// Guide-specific field overrides on a ranked item.
///
/// When present, an override field takes precedence over the referenced
/// review's own field. Per-field coalesce, not a deep merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideOverrides {
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub custom_description: Option<String>,
    #[serde(default)]
    pub custom_best_for: Option<String>,
    #[serde(default)]
    pub custom_affiliate_link: Option<String>,
    #[serde(default)]
    pub custom_pros: Option<Vec<String>>,
    #[serde(default)]
    pub custom_cons: Option<Vec<String>>,
}

/// One ranked entry in a comparison guide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideItem {
    /// Positive rank; uniqueness/contiguity left to CMS editors
    #[serde(default)]
    pub rank: u32,
    /// Referenced review; `None` when the item uses a custom title or the
    /// reference is broken
    #[serde(default)]
    pub review: Option<ReviewSummary>,
    #[serde(default)]
    pub custom_title: Option<String>,
    /// Editor's verdict line for this entry
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub overrides: Option<GuideOverrides>,
}

impl GuideItem {
    fn overrides(&self) -> Option<&GuideOverrides> {
        self.overrides.as_ref()
    }

    /// Display title: override → custom title → referenced review name →
    /// "Unknown" (broken reference)
    pub fn title(&self) -> &str {
        self.overrides()
            .and_then(|o| o.custom_title.as_deref())
            .or(self.custom_title.as_deref())
            .or(self.review.as_ref().map(|r| r.name.as_str()))
            .unwrap_or("Unknown")
    }

    /// Description: override → referenced review tagline
    pub fn description(&self) -> Option<&str> {
        self.overrides()
            .and_then(|o| o.custom_description.as_deref())
            .or(self.review.as_ref().and_then(|r| r.tagline.as_deref()))
    }

    /// "Best for" line: override → referenced review field
    pub fn best_for(&self) -> Option<&str> {
        self.overrides()
            .and_then(|o| o.custom_best_for.as_deref())
            .or(self.review.as_ref().and_then(|r| r.best_for.as_deref()))
    }

    /// Affiliate link: override → referenced review field
    pub fn affiliate_link(&self) -> Option<&str> {
        self.overrides()
            .and_then(|o| o.custom_affiliate_link.as_deref())
            .or(self
                .review
                .as_ref()
                .and_then(|r| r.affiliate_link.as_deref()))
    }

    /// Pros list: override → referenced review list → empty
    pub fn pros(&self) -> &[String] {
        self.overrides()
            .and_then(|o| o.custom_pros.as_deref())
            .or(self.review.as_ref().map(|r| r.pros.as_slice()))
            .unwrap_or(&[])
    }

    /// Cons list: override → referenced review list → empty
    pub fn cons(&self) -> &[String] {
        self.overrides()
            .and_then(|o| o.custom_cons.as_deref())
            .or(self.review.as_ref().map(|r| r.cons.as_slice()))
            .unwrap_or(&[])
    }
}

/// A ranked "Top N" comparison guide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub items: Vec<GuideItem>,
    /// Methodology text shown below the ranking
    #[serde(default)]
    pub methodology: Vec<ContentBlock>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Guide {
    /// Items sorted by rank ascending; rank ties keep document order
    pub fn ranked_items(&self) -> Vec<&GuideItem> {
        let mut items: Vec<&GuideItem> = self.items.iter().collect();
        items.sort_by_key(|i| i.rank);
        items
    }
}

/// Editorial blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Vec<ContentBlock>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Grouping taxonomy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
}

/// Byline metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

/// Moderation status of a user-submitted review
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// End-user-submitted review, created via form POST and moderated
/// out-of-band
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    pub id: Uuid,
    /// Slug of the reviewed software
    pub software_slug: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    /// 1-5 star rating
    pub rating: u8,
    pub headline: String,
    pub pros: String,
    pub cons: String,
    pub status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
}

impl UserReview {
    /// Content store create-mutation payload for this submission
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::json!({
            "_type": "userReview",
            "id": self.id,
            "softwareSlug": self.software_slug,
            "reviewerName": self.reviewer_name,
            "reviewerEmail": self.reviewer_email,
            "rating": self.rating,
            "headline": self.headline,
            "pros": self.pros,
            "cons": self.cons,
            "status": "pending",
            "submittedAt": self.submitted_at.to_rfc3339(),
        })
    }
}
