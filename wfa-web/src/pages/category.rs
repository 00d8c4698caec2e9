//! Category listing page composer

use super::blog::post_list_item;
use super::layout;
use super::PageError;
use crate::seo::{render_head_meta, PageMeta};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use wfa_common::content::{BlogPost, Category};
use wfa_common::text::escape_html;

/// GET /category/:slug
pub async fn category_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let path = format!("/category/{}", slug);

    if let Some(html) = state.cache.get(&path).await {
        return Ok(Html(html));
    }

    let category = state
        .content
        .category_by_slug(&slug)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No category for \"{}\"", slug)))?;
    let posts = state.content.posts_by_category(&slug).await?;

    let html = render_category(&state.config.site_url, &category, &posts);
    state
        .cache
        .insert(
            &path,
            html.clone(),
            vec!["category".to_string(), "post".to_string()],
        )
        .await;

    Ok(Html(html))
}

pub fn render_category(site_url: &str, category: &Category, posts: &[BlogPost]) -> String {
    let entries: String = posts.iter().map(post_list_item).collect();
    let body = format!(
        "<section class=\"category\"><h1>{name}</h1>{description}\
         {listing}</section>",
        name = escape_html(&category.name),
        description = category
            .description
            .as_deref()
            .map(|d| format!("<p>{}</p>", escape_html(d)))
            .unwrap_or_default(),
        listing = if posts.is_empty() {
            "<p>No articles in this category yet.</p>".to_string()
        } else {
            format!("<ul>{}</ul>", entries)
        },
    );

    let meta = PageMeta::new(
        format!("{} — Workflow Automation HQ", category.name),
        category
            .description
            .clone()
            .unwrap_or_else(|| format!("Articles about {}", category.name)),
        format!("/category/{}", category.slug.current),
    );
    layout::page("", &render_head_meta(&meta, site_url), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_common::content::Slug;

    #[test]
    fn test_empty_category_renders_placeholder() {
        let category = Category {
            name: "Integrations".to_string(),
            slug: Slug::new("integrations"),
            description: None,
        };
        let html = render_category("https://wfa.example.com", &category, &[]);
        assert!(html.contains("No articles in this category yet."));
    }
}
