//! Portable-text-shaped rich content blocks
//!
//! Document bodies arrive as a flat list of blocks. Standard text blocks
//! (`_type: "block"`) carry span children; custom block types (pricing
//! tables, pros/cons, screenshot galleries, FAQ groups) carry arbitrary
//! fields which are retained un-modeled in `extra` so nothing is lost on a
//! round trip.

use serde::{Deserialize, Serialize};

/// Inline text span within a standard block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

/// A single rich-content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block type discriminator ("block", "pricingTable", "prosConsBlock", ...)
    #[serde(rename = "_type")]
    pub kind: String,

    /// Text style for standard blocks ("normal", "h2", "h3", "blockquote")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Span children for standard text blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Span>,

    /// Unmodeled fields of custom block types
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentBlock {
    /// Construct a plain paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "block".to_string(),
            style: Some("normal".to_string()),
            children: vec![Span {
                text: text.into(),
                marks: Vec::new(),
            }],
            extra: serde_json::Map::new(),
        }
    }

    /// Construct a custom-typed block with no children
    pub fn custom(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            style: None,
            children: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// True for heading-styled text blocks (h2..h4)
    pub fn is_heading(&self) -> bool {
        matches!(self.style.as_deref(), Some("h2") | Some("h3") | Some("h4"))
    }

    /// Concatenated span text (spans abut, no separator inserted)
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    /// Plain text plus the serialized unmodeled fields.
    ///
    /// This is the haystack the tab classifier matches keywords against, so
    /// custom block payloads (e.g. a pricing table's tier names) participate
    /// in classification even without a typed model.
    pub fn serialized_text(&self) -> String {
        let mut text = self.plain_text();
        if !self.extra.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            // Map serialization over a JSON map cannot fail
            text.push_str(&serde_json::to_string(&self.extra).unwrap_or_default());
        }
        text
    }
}
