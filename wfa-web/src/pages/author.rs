//! Author listing page composer

use super::blog::post_list_item;
use super::layout;
use super::PageError;
use crate::seo::{render_head_meta, PageMeta};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use wfa_common::content::{Author, BlogPost};
use wfa_common::text::escape_html;

/// GET /author/:slug
pub async fn author_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let path = format!("/author/{}", slug);

    if let Some(html) = state.cache.get(&path).await {
        return Ok(Html(html));
    }

    let author = state
        .content
        .author_by_slug(&slug)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No author for \"{}\"", slug)))?;
    let posts = state.content.posts_by_author(&slug).await?;

    let html = render_author(&state.config.site_url, &author, &posts);
    state
        .cache
        .insert(
            &path,
            html.clone(),
            vec!["author".to_string(), "post".to_string()],
        )
        .await;

    Ok(Html(html))
}

pub fn render_author(site_url: &str, author: &Author, posts: &[BlogPost]) -> String {
    let socials: String = [
        ("Twitter", author.twitter.as_deref()),
        ("LinkedIn", author.linkedin.as_deref()),
    ]
    .iter()
    .filter_map(|(label, url)| {
        url.map(|u| format!("<a href=\"{}\">{}</a>", escape_html(u), label))
    })
    .collect::<Vec<_>>()
    .join(" · ");

    let entries: String = posts.iter().map(post_list_item).collect();

    let body = format!(
        "<section class=\"author\"><header>{avatar}<h1>{name}</h1>{bio}\
         <p class=\"socials\">{socials}</p></header>\
         <h2>Articles</h2><ul>{entries}</ul></section>",
        avatar = author
            .avatar_url
            .as_deref()
            .map(|u| format!("<img class=\"avatar\" src=\"{}\" alt=\"{}\">", escape_html(u), escape_html(&author.name)))
            .unwrap_or_default(),
        name = escape_html(&author.name),
        bio = author
            .bio
            .as_deref()
            .map(|b| format!("<p>{}</p>", escape_html(b)))
            .unwrap_or_default(),
        socials = socials,
        entries = entries,
    );

    let meta = PageMeta::new(
        format!("{} — Workflow Automation HQ", author.name),
        author
            .bio
            .clone()
            .unwrap_or_else(|| format!("Articles by {}", author.name)),
        format!("/author/{}", author.slug.current),
    );
    layout::page("", &render_head_meta(&meta, site_url), &body)
}
