//! Blog index and post page composers

use super::layout;
use super::render::render_blocks;
use super::PageError;
use crate::seo::{article_json_ld, render_head_meta, PageMeta};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use wfa_common::content::BlogPost;
use wfa_common::text::{escape_html, reading_time_minutes};
use wfa_common::time::format_display_date;

/// GET /blog
pub async fn blog_index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    const PATH: &str = "/blog";

    if let Some(html) = state.cache.get(PATH).await {
        return Ok(Html(html));
    }

    let posts = state.content.recent_posts().await?;
    let html = render_index(&state.config.site_url, &posts);
    state
        .cache
        .insert(PATH, html.clone(), vec!["post".to_string()])
        .await;

    Ok(Html(html))
}

/// GET /blog/:slug
pub async fn post_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let path = format!("/blog/{}", slug);

    if let Some(html) = state.cache.get(&path).await {
        return Ok(Html(html));
    }

    let post = state
        .content
        .post_by_slug(&slug)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No post for \"{}\"", slug)))?;

    let html = render_post(&state.config.site_url, &post);
    state
        .cache
        .insert(&path, html.clone(), vec!["post".to_string()])
        .await;

    Ok(Html(html))
}

/// One entry in a post listing (blog index, category, author pages)
pub fn post_list_item(post: &BlogPost) -> String {
    format!(
        "<li class=\"post-entry\"><a href=\"/blog/{slug}\">{title}</a>{date}{excerpt}</li>",
        slug = escape_html(&post.slug.current),
        title = escape_html(&post.title),
        date = post
            .published_at
            .as_ref()
            .map(|d| format!(" <time>{}</time>", format_display_date(d)))
            .unwrap_or_default(),
        excerpt = post
            .excerpt
            .as_deref()
            .map(|e| format!("<p>{}</p>", escape_html(e)))
            .unwrap_or_default(),
    )
}

fn render_index(site_url: &str, posts: &[BlogPost]) -> String {
    let entries: String = posts.iter().map(post_list_item).collect();
    let body = format!(
        "<section class=\"blog-index\"><h1>Blog</h1><ul>{}</ul></section>",
        entries
    );
    let meta = PageMeta::new(
        "Blog — Workflow Automation HQ",
        "Articles on workflow automation, tooling, and process design.",
        "/blog",
    );
    layout::page("", &render_head_meta(&meta, site_url), &body)
}

pub fn render_post(site_url: &str, post: &BlogPost) -> String {
    let byline = post
        .author
        .as_ref()
        .map(|a| {
            format!(
                "<a href=\"/author/{}\">{}</a>",
                escape_html(&a.slug.current),
                escape_html(&a.name)
            )
        })
        .unwrap_or_else(|| "Editorial team".to_string());

    let date = post
        .published_at
        .as_ref()
        .map(|d| format_display_date(d))
        .unwrap_or_default();

    let full_text: String = post
        .body
        .iter()
        .map(|b| b.plain_text())
        .collect::<Vec<_>>()
        .join(" ");

    let categories: String = post
        .categories
        .iter()
        .map(|c| {
            format!(
                "<a class=\"category\" href=\"/category/{}\">{}</a>",
                escape_html(&c.slug.current),
                escape_html(&c.name)
            )
        })
        .collect();

    let body = format!(
        "<article class=\"post\"><header><h1>{title}</h1>\
         <p class=\"byline\">By {byline} · {date} · {minutes} min read</p>\
         <p class=\"categories\">{categories}</p></header>{content}</article>",
        title = escape_html(&post.title),
        byline = byline,
        date = date,
        minutes = reading_time_minutes(&full_text),
        categories = categories,
        content = render_blocks(&post.body),
    );

    let meta = PageMeta::new(
        post.title.clone(),
        post.excerpt.clone().unwrap_or_else(|| post.title.clone()),
        format!("/blog/{}", post.slug.current),
    );
    let head = format!(
        "{}\n{}",
        render_head_meta(&meta, site_url),
        article_json_ld(post, site_url)
    );
    layout::page("", &head, &body)
}
