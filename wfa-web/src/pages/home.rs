//! Homepage composer

use super::layout;
use super::PageError;
use crate::seo::{render_head_meta, PageMeta};
use crate::AppState;
use axum::extract::State;
use axum::response::Html;
use wfa_common::content::{BlogPost, Guide, ReviewSummary};
use wfa_common::text::escape_html;

/// GET /
pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    const PATH: &str = "/";

    if let Some(html) = state.cache.get(PATH).await {
        return Ok(Html(html));
    }

    let featured = state.content.featured_reviews().await?;
    let guides = state.content.recent_guides().await?;
    let posts = state.content.recent_posts().await?;

    let html = render_home(&state.config.site_url, &featured, &guides, &posts);
    state
        .cache
        .insert(
            PATH,
            html.clone(),
            vec![
                "review".to_string(),
                "guide".to_string(),
                "post".to_string(),
            ],
        )
        .await;

    Ok(Html(html))
}

fn review_card(review: &ReviewSummary) -> String {
    format!(
        "<article class=\"card\"><h3><a href=\"/reviews/{slug}\">{name}</a></h3>\
         <p class=\"score\">{score:.1}/10</p><p>{tagline}</p></article>",
        slug = escape_html(&review.slug.current),
        name = escape_html(&review.name),
        score = review.scores.overall,
        tagline = escape_html(review.tagline.as_deref().unwrap_or("")),
    )
}

pub fn render_home(
    site_url: &str,
    featured: &[ReviewSummary],
    guides: &[Guide],
    posts: &[BlogPost],
) -> String {
    let reviews_html: String = featured.iter().map(review_card).collect();

    let guides_html: String = guides
        .iter()
        .map(|g| {
            format!(
                "<li><a href=\"/guides/{}\">{}</a></li>",
                escape_html(&g.slug.current),
                escape_html(&g.title),
            )
        })
        .collect();

    let posts_html: String = posts
        .iter()
        .take(5)
        .map(|p| {
            format!(
                "<li><a href=\"/blog/{}\">{}</a></li>",
                escape_html(&p.slug.current),
                escape_html(&p.title),
            )
        })
        .collect();

    let body = format!(
        "<section class=\"hero\"><h1>Find the right workflow automation software</h1>\
         <p>Independent reviews, hands-on comparisons, and buying guides.</p></section>\
         <section id=\"reviews\"><h2>Top rated software</h2>{}</section>\
         <section id=\"guides\"><h2>Latest guides</h2><ul>{}</ul></section>\
         <section id=\"blog\"><h2>From the blog</h2><ul>{}</ul></section>",
        reviews_html, guides_html, posts_html,
    );

    let meta = PageMeta::new(
        "Workflow Automation HQ — software reviews and comparisons",
        "Independent reviews, comparisons, and guides for workflow automation software.",
        "/",
    );
    layout::page("", &render_head_meta(&meta, site_url), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_common::content::{ScoreSet, Slug};

    #[test]
    fn test_render_home_lists_sections() {
        let featured = vec![ReviewSummary {
            name: "FlowBot".to_string(),
            slug: Slug::new("flowbot"),
            scores: ScoreSet {
                overall: 9.1,
                ..Default::default()
            },
            ..Default::default()
        }];
        let html = render_home("https://wfa.example.com", &featured, &[], &[]);
        assert!(html.contains("href=\"/reviews/flowbot\""));
        assert!(html.contains("9.1/10"));
        assert!(html.contains("Top rated software"));
    }
}
