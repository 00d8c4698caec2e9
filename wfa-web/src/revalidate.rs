//! Document-change → cache-invalidation dispatch
//!
//! Maps a content store change notification (document type + slug) to the
//! fixed set of cached paths and tags to mark stale. A simple dispatch
//! table; an unrecognized type falls back to invalidating the homepage.
//! Identical payloads always produce identical sets, so duplicate webhook
//! deliveries are harmless.

/// Paths and tags to mark stale for one change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationSet {
    pub paths: Vec<String>,
    pub tags: Vec<String>,
}

/// Compute the invalidation set for a changed document
pub fn invalidation_for(doc_type: &str, slug: Option<&str>) -> InvalidationSet {
    let slug_path = |prefix: &str| slug.map(|s| format!("{}/{}", prefix, s));

    match doc_type {
        "post" => InvalidationSet {
            paths: std::iter::once("/blog".to_string())
                .chain(slug_path("/blog"))
                .collect(),
            tags: vec!["post".to_string()],
        },
        "softwareReview" => InvalidationSet {
            paths: std::iter::once("/".to_string())
                .chain(slug_path("/reviews"))
                .collect(),
            // Guides embed review fields, so a review edit staleness-taints
            // every guide page too
            tags: vec!["review".to_string(), "guide".to_string()],
        },
        "guide" => InvalidationSet {
            paths: std::iter::once("/".to_string())
                .chain(slug_path("/guides"))
                .collect(),
            tags: vec!["guide".to_string()],
        },
        "category" => InvalidationSet {
            paths: std::iter::once("/blog".to_string())
                .chain(slug_path("/category"))
                .collect(),
            tags: vec!["category".to_string()],
        },
        "author" => InvalidationSet {
            paths: slug_path("/author").into_iter().collect(),
            tags: vec!["author".to_string()],
        },
        _ => InvalidationSet {
            paths: vec!["/".to_string()],
            tags: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_invalidates_blog_index_and_post_page() {
        let set = invalidation_for("post", Some("x"));
        assert_eq!(set.paths, vec!["/blog", "/blog/x"]);
        assert_eq!(set.tags, vec!["post"]);
    }

    #[test]
    fn test_post_without_slug_still_invalidates_index() {
        let set = invalidation_for("post", None);
        assert_eq!(set.paths, vec!["/blog"]);
    }

    #[test]
    fn test_review_invalidates_home_review_page_and_guides() {
        let set = invalidation_for("softwareReview", Some("flowbot"));
        assert_eq!(set.paths, vec!["/", "/reviews/flowbot"]);
        assert!(set.tags.contains(&"guide".to_string()));
    }

    #[test]
    fn test_unrecognized_type_falls_back_to_homepage() {
        let set = invalidation_for("siteSettings", Some("x"));
        assert_eq!(set.paths, vec!["/"]);
        assert!(set.tags.is_empty());
    }

    #[test]
    fn test_identical_payloads_produce_identical_sets() {
        let a = invalidation_for("post", Some("hello"));
        let b = invalidation_for("post", Some("hello"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_author_change_does_not_touch_homepage() {
        let set = invalidation_for("author", Some("sam"));
        assert_eq!(set.paths, vec!["/author/sam"]);
    }
}
