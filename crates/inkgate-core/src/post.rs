//! Post documents served from the headless content API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paragraph separator used when flattening rich-text content.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A full post as fetched from the content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug, unique per post.
    pub slug: String,

    /// Plain-text title.
    pub title: String,

    /// Body text; paragraphs joined by [`PARAGRAPH_SEPARATOR`].
    pub content: String,

    /// Last publication time reported by the content API.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// The first paragraph of the body, used as the list excerpt and as the
    /// preview shown to readers without an active subscription.
    #[must_use]
    pub fn excerpt(&self) -> &str {
        self.content
            .split(PARAGRAPH_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Summarize for the post list.
    #[must_use]
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt().to_string(),
            updated_at: self.updated_at,
        }
    }
}

/// A post list entry: title plus the first paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// URL slug, unique per post.
    pub slug: String,

    /// Plain-text title.
    pub title: String,

    /// First paragraph of the body; empty when the post has no paragraphs.
    pub excerpt: String,

    /// Last publication time reported by the content API.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        Post {
            slug: "my-new-post".into(),
            title: "My New Post".into(),
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn excerpt_is_first_paragraph() {
        let p = post("First paragraph.\n\nSecond paragraph.");
        assert_eq!(p.excerpt(), "First paragraph.");
    }

    #[test]
    fn excerpt_of_single_paragraph_is_whole_body() {
        let p = post("Only paragraph.");
        assert_eq!(p.excerpt(), "Only paragraph.");
    }

    #[test]
    fn excerpt_of_empty_body_is_empty() {
        let p = post("");
        assert_eq!(p.excerpt(), "");
    }

    #[test]
    fn summary_carries_excerpt() {
        let p = post("Intro.\n\nRest of the story.");
        let summary = p.summary();
        assert_eq!(summary.slug, p.slug);
        assert_eq!(summary.excerpt, "Intro.");
    }
}
