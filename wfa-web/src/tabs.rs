//! Review body tab partitioning
//!
//! Splits a flat list of rich-content blocks into the review page's tabs
//! (Overview / Features / Pricing / Alternatives / Reviews). Known custom
//! block types map directly; everything else is classified by keyword
//! containment against the block's serialized text. A block can land in
//! several tabs; a block matching nothing falls back to Overview. The
//! heuristic is intentionally loose — misclassification costs a paragraph
//! in the wrong tab, nothing more.

use wfa_common::content::ContentBlock;

/// Review page tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewTab {
    Overview,
    Features,
    Pricing,
    Alternatives,
    Reviews,
}

impl ReviewTab {
    pub const ALL: [ReviewTab; 5] = [
        ReviewTab::Overview,
        ReviewTab::Features,
        ReviewTab::Pricing,
        ReviewTab::Alternatives,
        ReviewTab::Reviews,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewTab::Overview => "Overview",
            ReviewTab::Features => "Features",
            ReviewTab::Pricing => "Pricing",
            ReviewTab::Alternatives => "Alternatives",
            ReviewTab::Reviews => "Reviews",
        }
    }

    pub fn anchor(&self) -> &'static str {
        match self {
            ReviewTab::Overview => "overview",
            ReviewTab::Features => "features",
            ReviewTab::Pricing => "pricing",
            ReviewTab::Alternatives => "alternatives",
            ReviewTab::Reviews => "reviews",
        }
    }
}

const FEATURE_KEYWORDS: &[&str] = &[
    "feature",
    "capabilit",
    "integration",
    "automation builder",
    "workflow editor",
];

const PRICING_KEYWORDS: &[&str] = &[
    "price", "pricing", "cost", "plan", "tier", "billing", "free trial",
];

const ALTERNATIVES_KEYWORDS: &[&str] = &[
    "alternative",
    "competitor",
    "compared to",
    " vs ",
    "versus",
    "switching from",
];

const REVIEWS_KEYWORDS: &[&str] = &[
    "user review",
    "customer feedback",
    "testimonial",
    "verdict",
    "what users say",
];

fn matches_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Classify one block into its tab(s).
///
/// Known block types short-circuit the keyword heuristic; unknown text is
/// matched case-insensitively against the serialized block.
pub fn classify_block(block: &ContentBlock) -> Vec<ReviewTab> {
    match block.kind.as_str() {
        "pricingTable" => return vec![ReviewTab::Pricing],
        "prosConsBlock" | "faqBlock" => return vec![ReviewTab::Overview],
        "screenshotGallery" => return vec![ReviewTab::Features],
        "userReviewList" => return vec![ReviewTab::Reviews],
        _ => {}
    }

    let text = block.serialized_text().to_lowercase();
    let mut tabs = Vec::new();
    if matches_any(&text, FEATURE_KEYWORDS) {
        tabs.push(ReviewTab::Features);
    }
    if matches_any(&text, PRICING_KEYWORDS) {
        tabs.push(ReviewTab::Pricing);
    }
    if matches_any(&text, ALTERNATIVES_KEYWORDS) {
        tabs.push(ReviewTab::Alternatives);
    }
    if matches_any(&text, REVIEWS_KEYWORDS) {
        tabs.push(ReviewTab::Reviews);
    }

    // Overview is the residue tab: only blocks no other tab claimed
    if tabs.is_empty() {
        tabs.push(ReviewTab::Overview);
    }
    tabs
}

/// Partition blocks into tab order, skipping tabs that end up empty
pub fn partition<'a>(blocks: &'a [ContentBlock]) -> Vec<(ReviewTab, Vec<&'a ContentBlock>)> {
    let classified: Vec<(Vec<ReviewTab>, &ContentBlock)> = blocks
        .iter()
        .map(|b| (classify_block(b), b))
        .collect();

    ReviewTab::ALL
        .iter()
        .filter_map(|tab| {
            let members: Vec<&ContentBlock> = classified
                .iter()
                .filter(|(tabs, _)| tabs.contains(tab))
                .map(|(_, b)| *b)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((*tab, members))
            }
        })
        .collect()
}
