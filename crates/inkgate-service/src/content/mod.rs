//! Headless content API integration.

pub mod client;
pub mod types;

pub use client::{ContentClient, ContentError};
pub use types::{ContentDocument, RichTextBlock};
