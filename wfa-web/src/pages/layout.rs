//! Layout chrome shared by every page

use wfa_common::text::escape_html;

/// Wrap rendered body content in the site chrome.
///
/// `head_extra` carries page-specific metadata (SEO tags, JSON-LD) and is
/// interpolated verbatim — callers are responsible for escaping anything
/// user-derived inside it.
pub fn page(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head_extra}
</head>
<body>
<header class="site-header">
  <a class="logo" href="/">Workflow Automation HQ</a>
  <nav>
    <a href="/blog">Blog</a>
    <a href="/#reviews">Reviews</a>
    <a href="/#guides">Guides</a>
  </nav>
</header>
<main>
{body}
</main>
<footer class="site-footer">
  <p>&copy; Workflow Automation HQ. Independent reviews of workflow automation software.</p>
  <p><small>Some outbound links are affiliate links; they never affect our scores.</small></p>
</footer>
</body>
</html>"#,
        head_extra = if head_extra.is_empty() {
            format!("<title>{}</title>", escape_html(title))
        } else {
            head_extra.to_string()
        },
        body = body,
    )
}
