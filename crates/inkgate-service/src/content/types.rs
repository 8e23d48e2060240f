//! Content API response types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use inkgate_core::{Post, PARAGRAPH_SEPARATOR};

/// A document as returned by the content API.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDocument {
    /// Document UID; becomes the post slug.
    pub uid: String,
    /// Rich-text fields.
    pub data: DocumentData,
    /// Last publication time.
    pub last_publication_date: DateTime<Utc>,
}

/// Rich-text fields of a post document.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentData {
    /// Title blocks (usually a single heading).
    #[serde(default)]
    pub title: Vec<RichTextBlock>,
    /// Body blocks.
    #[serde(default)]
    pub content: Vec<RichTextBlock>,
}

/// One block of rich text.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextBlock {
    /// Block type (`heading`, `paragraph`, `image`, …).
    #[serde(rename = "type")]
    pub block_type: String,
    /// Plain text of the block, when it has any.
    #[serde(default)]
    pub text: String,
}

/// Envelope for document list queries.
#[derive(Debug, Deserialize)]
pub struct DocumentList {
    /// The matching documents.
    pub results: Vec<ContentDocument>,
}

impl ContentDocument {
    /// Flatten the rich-text document into a domain [`Post`].
    ///
    /// The title is the concatenated text of the title blocks; the body keeps
    /// paragraph blocks only, joined by [`PARAGRAPH_SEPARATOR`].
    #[must_use]
    pub fn into_post(self) -> Post {
        let title = self
            .data
            .title
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let content = self
            .data
            .content
            .iter()
            .filter(|block| block.block_type == "paragraph")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR);

        Post {
            slug: self.uid,
            title,
            content,
            updated_at: self.last_publication_date,
        }
    }
}
