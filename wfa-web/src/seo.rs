//! SEO metadata generation
//!
//! Head tags (title, description, canonical, Open Graph) and schema.org
//! JSON-LD payloads for review and article pages.

use wfa_common::content::{BlogPost, SoftwareReview};
use wfa_common::text::escape_html;

/// Page-level metadata for the head section
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Path-only canonical, joined with the site URL at render time
    pub canonical_path: String,
}

impl PageMeta {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        canonical_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            canonical_path: canonical_path.into(),
        }
    }
}

/// Render the head metadata tags
pub fn render_head_meta(meta: &PageMeta, site_url: &str) -> String {
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);
    let canonical = format!("{}{}", site_url.trim_end_matches('/'), meta.canonical_path);

    format!(
        concat!(
            "<title>{title}</title>\n",
            "<meta name=\"description\" content=\"{description}\">\n",
            "<link rel=\"canonical\" href=\"{canonical}\">\n",
            "<meta property=\"og:title\" content=\"{title}\">\n",
            "<meta property=\"og:description\" content=\"{description}\">\n",
            "<meta property=\"og:url\" content=\"{canonical}\">\n",
            "<meta property=\"og:type\" content=\"website\">"
        ),
        title = title,
        description = description,
        canonical = escape_html(&canonical),
    )
}

/// schema.org JSON-LD for a software review page
pub fn review_json_ld(review: &SoftwareReview, site_url: &str) -> String {
    let payload = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": review.name,
        "applicationCategory": "BusinessApplication",
        "url": format!(
            "{}/reviews/{}",
            site_url.trim_end_matches('/'),
            review.slug.current
        ),
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": review.scores.overall,
            "bestRating": 10,
            "worstRating": 0,
            "ratingCount": 1,
        },
        "offers": review.pricing.first().map(|tier| serde_json::json!({
            "@type": "Offer",
            "price": tier.price,
            "name": tier.name,
        })),
    });
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        payload
    )
}

/// schema.org JSON-LD for a blog post
pub fn article_json_ld(post: &BlogPost, site_url: &str) -> String {
    let payload = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": post.title,
        "url": format!(
            "{}/blog/{}",
            site_url.trim_end_matches('/'),
            post.slug.current
        ),
        "datePublished": post.published_at.map(|d| d.to_rfc3339()),
        "author": post.author.as_ref().map(|a| serde_json::json!({
            "@type": "Person",
            "name": a.name,
        })),
    });
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        payload
    )
}
