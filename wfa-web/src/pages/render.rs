//! Rich-content block → HTML rendering

use wfa_common::content::{ContentBlock, Span};
use wfa_common::text::escape_html;

fn render_span(span: &Span) -> String {
    let mut html = escape_html(&span.text);
    for mark in &span.marks {
        html = match mark.as_str() {
            "strong" => format!("<strong>{}</strong>", html),
            "em" => format!("<em>{}</em>", html),
            "code" => format!("<code>{}</code>", html),
            // Unknown marks (annotations, links without modeled targets)
            // render as plain text
            _ => html,
        };
    }
    html
}

fn render_text_block(block: &ContentBlock) -> String {
    let inner: String = block.children.iter().map(render_span).collect();
    match block.style.as_deref() {
        Some("h2") => format!("<h2>{}</h2>", inner),
        Some("h3") => format!("<h3>{}</h3>", inner),
        Some("h4") => format!("<h4>{}</h4>", inner),
        Some("blockquote") => format!("<blockquote>{}</blockquote>", inner),
        _ => format!("<p>{}</p>", inner),
    }
}

fn render_faq_block(block: &ContentBlock) -> String {
    let Some(items) = block.extra.get("items").and_then(|v| v.as_array()) else {
        return String::new();
    };
    let entries: String = items
        .iter()
        .map(|item| {
            format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                escape_html(item["question"].as_str().unwrap_or("")),
                escape_html(item["answer"].as_str().unwrap_or("")),
            )
        })
        .collect();
    format!("<section class=\"faq\">{}</section>", entries)
}

/// Render one block. Custom block types without a renderer are dropped
/// silently — the typed review fields (pricing, pros/cons, screenshots)
/// are rendered from the document model, not from body blocks.
pub fn render_block(block: &ContentBlock) -> String {
    match block.kind.as_str() {
        "block" => render_text_block(block),
        "faqBlock" => render_faq_block(block),
        _ => String::new(),
    }
}

/// Render a block sequence
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(render_block).collect()
}
