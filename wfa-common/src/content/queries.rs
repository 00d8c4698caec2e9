//! Named content store queries
//!
//! Declarative (GROQ) queries, one per page type, parameterized by `$slug`.
//! Reference fields are dereferenced in the projection so composers receive
//! fully-shaped documents in a single round trip. A broken reference
//! projects to null and deserializes as `None`.

/// Full review document by slug
pub const REVIEW_BY_SLUG: &str = r#"*[_type == "softwareReview" && slug.current == $slug][0]{
  name, slug, tagline, logoUrl, scores, pricing, pros, cons, bestFor,
  affiliateLink, screenshots, body,
  "categories": categories[]->{name, slug, description},
  "updatedAt": _updatedAt
}"#;

/// Guide by slug, with each ranked item's review reference dereferenced to
/// the summary projection
pub const GUIDE_BY_SLUG: &str = r#"*[_type == "guide" && slug.current == $slug][0]{
  title, slug, intro, methodology, "updatedAt": _updatedAt,
  items[]{
    rank, customTitle, verdict, overrides,
    "review": review->{name, slug, tagline, logoUrl, scores, pros, cons, bestFor, affiliateLink}
  }
}"#;

/// Blog post by slug with author and categories dereferenced
pub const POST_BY_SLUG: &str = r#"*[_type == "post" && slug.current == $slug][0]{
  title, slug, excerpt, body, "publishedAt": publishedAt,
  "author": author->{name, slug, bio, avatarUrl, twitter, linkedin},
  "categories": categories[]->{name, slug, description}
}"#;

/// Recent posts for the blog index, newest first
pub const RECENT_POSTS: &str = r#"*[_type == "post"] | order(publishedAt desc)[0...20]{
  title, slug, excerpt, "publishedAt": publishedAt,
  "author": author->{name, slug},
  "categories": categories[]->{name, slug}
}"#;

/// Category document by slug
pub const CATEGORY_BY_SLUG: &str =
    r#"*[_type == "category" && slug.current == $slug][0]{name, slug, description}"#;

/// Posts belonging to a category, newest first
pub const POSTS_BY_CATEGORY: &str = r#"*[_type == "post" && $slug in categories[]->slug.current]
  | order(publishedAt desc){
  title, slug, excerpt, "publishedAt": publishedAt,
  "author": author->{name, slug}
}"#;

/// Author document by slug
pub const AUTHOR_BY_SLUG: &str =
    r#"*[_type == "author" && slug.current == $slug][0]{name, slug, bio, avatarUrl, twitter, linkedin}"#;

/// Posts bylined by an author, newest first
pub const POSTS_BY_AUTHOR: &str = r#"*[_type == "post" && author->slug.current == $slug]
  | order(publishedAt desc){title, slug, excerpt, "publishedAt": publishedAt}"#;

/// Featured content for the homepage: top-scored reviews and recent guides
pub const FEATURED_REVIEWS: &str = r#"*[_type == "softwareReview"]
  | order(scores.overall desc)[0...6]{
  name, slug, tagline, logoUrl, scores, bestFor, affiliateLink
}"#;

/// Recent guides for the homepage
pub const RECENT_GUIDES: &str = r#"*[_type == "guide"] | order(_updatedAt desc)[0...4]{
  title, slug, intro, "updatedAt": _updatedAt
}"#;

/// Approved user reviews for a software slug, newest first
pub const APPROVED_USER_REVIEWS: &str = r#"*[_type == "userReview"
  && softwareSlug == $slug && status == "approved"]
  | order(submittedAt desc){
  id, softwareSlug, reviewerName, reviewerEmail, rating, headline, pros, cons,
  status, submittedAt
}"#;

/// Slug enumeration for static path generation, one per document type
pub const ALL_SLUGS_BY_TYPE: &str = r#"*[_type == $type].slug.current"#;

/// Every document of a type, raw (used by the maintenance CLI)
pub const ALL_DOCUMENTS_BY_TYPE: &str = r#"*[_type == $type]"#;

/// All guides with dereferenced item summaries (used by the CLI audit)
pub const ALL_GUIDES: &str = r#"*[_type == "guide"]{
  title, slug, items[]{
    rank, customTitle, verdict, overrides,
    "review": review->{name, slug, tagline, scores, pros, cons, bestFor, affiliateLink}
  }
}"#;
