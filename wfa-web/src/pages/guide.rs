//! Comparison guide page composer
//!
//! Ranked items are rendered through the per-field override coalesce on
//! `GuideItem`; a broken review reference renders as "Unknown" rather than
//! failing the page.

use super::layout;
use super::render::render_blocks;
use super::PageError;
use crate::seo::{render_head_meta, PageMeta};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use wfa_common::content::{Guide, GuideItem};
use wfa_common::text::escape_html;

/// GET /guides/:slug
pub async fn guide_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let path = format!("/guides/{}", slug);

    if let Some(html) = state.cache.get(&path).await {
        return Ok(Html(html));
    }

    let guide = state
        .content
        .guide_by_slug(&slug)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No guide for \"{}\"", slug)))?;

    let html = render_guide(&state.config.site_url, &guide);
    state
        .cache
        .insert(
            &path,
            html.clone(),
            // Guides embed review fields, so review edits invalidate them too
            vec!["guide".to_string(), "review".to_string()],
        )
        .await;

    Ok(Html(html))
}

fn render_item(item: &GuideItem) -> String {
    let review_link = item
        .review
        .as_ref()
        .map(|r| {
            format!(
                " <a class=\"full-review\" href=\"/reviews/{}\">Read the full review</a>",
                escape_html(&r.slug.current)
            )
        })
        .unwrap_or_default();

    let affiliate = item
        .affiliate_link()
        .map(|link| {
            format!(
                "<a class=\"cta\" href=\"{}\" rel=\"sponsored nofollow\">Visit site</a>",
                escape_html(link)
            )
        })
        .unwrap_or_default();

    let best_for = item
        .best_for()
        .map(|b| format!("<p class=\"best-for\"><strong>Best for:</strong> {}</p>", escape_html(b)))
        .unwrap_or_default();

    let list = |items: &[String]| -> String {
        items
            .iter()
            .map(|i| format!("<li>{}</li>", escape_html(i)))
            .collect()
    };

    format!(
        "<li class=\"guide-item\"><h2>#{rank} {title}</h2>\
         {description}{best_for}\
         <div class=\"pros-cons\"><ul class=\"pros\">{pros}</ul><ul class=\"cons\">{cons}</ul></div>\
         {verdict}{affiliate}{review_link}</li>",
        rank = item.rank,
        title = escape_html(item.title()),
        description = item
            .description()
            .map(|d| format!("<p>{}</p>", escape_html(d)))
            .unwrap_or_default(),
        best_for = best_for,
        pros = list(item.pros()),
        cons = list(item.cons()),
        verdict = item
            .verdict
            .as_deref()
            .map(|v| format!("<p class=\"verdict\">{}</p>", escape_html(v)))
            .unwrap_or_default(),
        affiliate = affiliate,
        review_link = review_link,
    )
}

pub fn render_guide(site_url: &str, guide: &Guide) -> String {
    let items: String = guide.ranked_items().iter().map(|i| render_item(i)).collect();

    let methodology = if guide.methodology.is_empty() {
        String::new()
    } else {
        format!(
            "<section class=\"methodology\"><h2>How we ranked</h2>{}</section>",
            render_blocks(&guide.methodology)
        )
    };

    let body = format!(
        "<article class=\"guide\"><header><h1>{title}</h1>{intro}</header>\
         <ol class=\"ranking\">{items}</ol>{methodology}</article>",
        title = escape_html(&guide.title),
        intro = guide
            .intro
            .as_deref()
            .map(|i| format!("<p class=\"intro\">{}</p>", escape_html(i)))
            .unwrap_or_default(),
        items = items,
        methodology = methodology,
    );

    let meta = PageMeta::new(
        guide.title.clone(),
        guide
            .intro
            .clone()
            .unwrap_or_else(|| format!("{} — ranked and compared", guide.title)),
        format!("/guides/{}", guide.slug.current),
    );
    layout::page("", &render_head_meta(&meta, site_url), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_common::content::{GuideOverrides, ReviewSummary, Slug};

    #[test]
    fn test_override_best_for_wins_over_review_field() {
        let guide = Guide {
            title: "Top automation tools".to_string(),
            slug: Slug::new("top-automation-tools"),
            items: vec![GuideItem {
                rank: 1,
                review: Some(ReviewSummary {
                    name: "FlowBot".to_string(),
                    slug: Slug::new("flowbot"),
                    best_for: Some("Small teams".to_string()),
                    ..Default::default()
                }),
                overrides: Some(GuideOverrides {
                    custom_best_for: Some("Enterprise ops".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let html = render_guide("https://wfa.example.com", &guide);
        assert!(html.contains("Enterprise ops"));
        assert!(!html.contains("Small teams"));
    }

    #[test]
    fn test_broken_reference_renders_unknown() {
        let guide = Guide {
            title: "Top tools".to_string(),
            slug: Slug::new("top-tools"),
            items: vec![GuideItem {
                rank: 2,
                ..Default::default()
            }],
            ..Default::default()
        };
        let html = render_guide("https://wfa.example.com", &guide);
        assert!(html.contains("#2 Unknown"));
    }

    #[test]
    fn test_items_render_in_rank_order() {
        let item = |rank: u32, title: &str| GuideItem {
            rank,
            custom_title: Some(title.to_string()),
            ..Default::default()
        };
        let guide = Guide {
            title: "Ordering".to_string(),
            slug: Slug::new("ordering"),
            items: vec![item(2, "Second"), item(1, "First")],
            ..Default::default()
        };
        let html = render_guide("https://wfa.example.com", &guide);
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
    }
}
