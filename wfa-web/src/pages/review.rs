//! Software review page composer

use super::layout;
use super::render::render_block;
use super::PageError;
use crate::seo::{render_head_meta, review_json_ld, PageMeta};
use crate::tabs;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use tracing::warn;
use wfa_common::content::{SoftwareReview, UserReview};
use wfa_common::text::escape_html;

/// GET /reviews/:slug
pub async fn review_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let path = format!("/reviews/{}", slug);

    if let Some(html) = state.cache.get(&path).await {
        return Ok(Html(html));
    }

    let review = state
        .content
        .review_by_slug(&slug)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No review for \"{}\"", slug)))?;

    // User reviews are supplementary; a query failure degrades to an empty
    // section rather than failing the page
    let user_reviews = match state.content.approved_user_reviews(&slug).await {
        Ok(reviews) => reviews,
        Err(e) => {
            warn!("User review query failed (rendering without): {}", e);
            Vec::new()
        }
    };

    let html = render_review(&state.config.site_url, &review, &user_reviews);
    state
        .cache
        .insert(&path, html.clone(), vec!["review".to_string()])
        .await;

    Ok(Html(html))
}

fn scores_table(review: &SoftwareReview) -> String {
    let rows = [
        ("Ease of use", review.scores.ease_of_use),
        ("Features", review.scores.features),
        ("Value for money", review.scores.value_for_money),
        ("Support", review.scores.support),
    ];
    let body: String = rows
        .iter()
        .map(|(label, score)| format!("<tr><th>{}</th><td>{:.1}</td></tr>", label, score))
        .collect();
    format!(
        "<table class=\"scores\"><caption>Overall: {:.1}/10</caption>{}</table>",
        review.scores.overall, body
    )
}

fn pros_cons(pros: &[String], cons: &[String]) -> String {
    let list = |items: &[String]| -> String {
        items
            .iter()
            .map(|i| format!("<li>{}</li>", escape_html(i)))
            .collect()
    };
    format!(
        "<div class=\"pros-cons\"><div class=\"pros\"><h3>Pros</h3><ul>{}</ul></div>\
         <div class=\"cons\"><h3>Cons</h3><ul>{}</ul></div></div>",
        list(pros),
        list(cons)
    )
}

fn pricing_tiers(review: &SoftwareReview) -> String {
    if review.pricing.is_empty() {
        return String::new();
    }
    let tiers: String = review
        .pricing
        .iter()
        .map(|tier| {
            let features: String = tier
                .features
                .iter()
                .map(|f| format!("<li>{}</li>", escape_html(f)))
                .collect();
            format!(
                "<div class=\"tier{}\"><h3>{}</h3><p class=\"price\">{}{}</p><ul>{}</ul></div>",
                if tier.highlighted { " highlighted" } else { "" },
                escape_html(&tier.name),
                escape_html(&tier.price),
                tier.period
                    .as_deref()
                    .map(|p| format!(" <small>{}</small>", escape_html(p)))
                    .unwrap_or_default(),
                features,
            )
        })
        .collect();
    format!("<section class=\"pricing\">{}</section>", tiers)
}

fn tabbed_body(review: &SoftwareReview) -> String {
    let partitioned = tabs::partition(&review.body);
    if partitioned.is_empty() {
        return String::new();
    }

    let nav: String = partitioned
        .iter()
        .map(|(tab, _)| format!("<a href=\"#{}\">{}</a>", tab.anchor(), tab.label()))
        .collect();

    let sections: String = partitioned
        .iter()
        .map(|(tab, blocks)| {
            let content: String = blocks.iter().map(|b| render_block(b)).collect();
            format!(
                "<section id=\"{}\" class=\"tab-panel\"><h2>{}</h2>{}</section>",
                tab.anchor(),
                tab.label(),
                content
            )
        })
        .collect();

    format!("<nav class=\"tabs\">{}</nav>{}", nav, sections)
}

fn user_review_section(user_reviews: &[UserReview]) -> String {
    if user_reviews.is_empty() {
        return String::new();
    }
    let entries: String = user_reviews
        .iter()
        .map(|r| {
            format!(
                "<article class=\"user-review\"><h3>{} <span class=\"stars\">{}/5</span></h3>\
                 <p class=\"byline\">{}</p><p><strong>Pros:</strong> {}</p>\
                 <p><strong>Cons:</strong> {}</p></article>",
                escape_html(&r.headline),
                r.rating,
                escape_html(&r.reviewer_name),
                escape_html(&r.pros),
                escape_html(&r.cons),
            )
        })
        .collect();
    format!(
        "<section class=\"user-reviews\"><h2>Reader reviews</h2>{}</section>",
        entries
    )
}

pub fn render_review(
    site_url: &str,
    review: &SoftwareReview,
    user_reviews: &[UserReview],
) -> String {
    let affiliate_cta = review
        .affiliate_link
        .as_deref()
        .map(|link| {
            format!(
                "<a class=\"cta\" href=\"{}\" rel=\"sponsored nofollow\">Try {}</a>",
                escape_html(link),
                escape_html(&review.name)
            )
        })
        .unwrap_or_default();

    let screenshots: String = review
        .screenshots
        .iter()
        .map(|s| {
            format!(
                "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\"><figcaption>{}</figcaption></figure>",
                escape_html(&s.url),
                escape_html(&review.name),
                escape_html(s.caption.as_deref().unwrap_or("")),
            )
        })
        .collect();

    let body = format!(
        "<article class=\"review\">\
         <header><h1>{name} review</h1><p class=\"tagline\">{tagline}</p>{cta}</header>\
         {scores}{tabs}{pricing}{pros_cons}\
         <section class=\"screenshots\">{screenshots}</section>\
         {user_reviews}\
         </article>",
        name = escape_html(&review.name),
        tagline = escape_html(review.tagline.as_deref().unwrap_or("")),
        cta = affiliate_cta,
        scores = scores_table(review),
        tabs = tabbed_body(review),
        pricing = pricing_tiers(review),
        pros_cons = pros_cons(&review.pros, &review.cons),
        screenshots = screenshots,
        user_reviews = user_review_section(user_reviews),
    );

    let meta = PageMeta::new(
        format!("{} review", review.name),
        review
            .tagline
            .clone()
            .unwrap_or_else(|| format!("Hands-on review of {}", review.name)),
        format!("/reviews/{}", review.slug.current),
    );
    let head = format!(
        "{}\n{}",
        render_head_meta(&meta, site_url),
        review_json_ld(review, site_url)
    );
    layout::page("", &head, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_common::content::{ContentBlock, PricingTier, ScoreSet, Slug};

    fn sample_review() -> SoftwareReview {
        SoftwareReview {
            name: "FlowBot".to_string(),
            slug: Slug::new("flowbot"),
            tagline: Some("Automation for everyone".to_string()),
            scores: ScoreSet {
                overall: 8.7,
                ease_of_use: 9.0,
                features: 8.5,
                value_for_money: 8.0,
                support: 9.2,
            },
            pricing: vec![PricingTier {
                name: "Starter".to_string(),
                price: "$29".to_string(),
                period: Some("per month".to_string()),
                features: vec!["5 workflows".to_string()],
                highlighted: true,
            }],
            pros: vec!["Easy setup".to_string()],
            cons: vec!["Limited API".to_string()],
            affiliate_link: Some("https://example.com/ref/flowbot".to_string()),
            body: vec![
                ContentBlock::paragraph("FlowBot is a workflow automation platform."),
                ContentBlock::paragraph("Pricing starts at $29 per month."),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_review_includes_core_sections() {
        let html = render_review("https://wfa.example.com", &sample_review(), &[]);
        assert!(html.contains("FlowBot review"));
        assert!(html.contains("Overall: 8.7/10"));
        assert!(html.contains("rel=\"sponsored nofollow\""));
        assert!(html.contains("id=\"pricing\""));
        assert!(html.contains("SoftwareApplication"));
    }

    #[test]
    fn test_render_review_without_affiliate_link() {
        let mut review = sample_review();
        review.affiliate_link = None;
        let html = render_review("https://wfa.example.com", &review, &[]);
        assert!(!html.contains("class=\"cta\""));
    }

    #[test]
    fn test_user_reviews_rendered_when_present() {
        use chrono::Utc;
        use uuid::Uuid;
        use wfa_common::content::ReviewStatus;

        let user_reviews = vec![UserReview {
            id: Uuid::new_v4(),
            software_slug: "flowbot".to_string(),
            reviewer_name: "Sam".to_string(),
            reviewer_email: "sam@example.com".to_string(),
            rating: 4,
            headline: "Does the job".to_string(),
            pros: "p".repeat(60),
            cons: "c".repeat(60),
            status: ReviewStatus::Approved,
            submitted_at: Utc::now(),
        }];
        let html = render_review("https://wfa.example.com", &sample_review(), &user_reviews);
        assert!(html.contains("Reader reviews"));
        assert!(html.contains("Does the job"));
    }
}
