//! Content API client implementation.

use reqwest::Client;
use std::time::Duration;

use inkgate_core::Post;

use super::types::{ContentDocument, DocumentList};

/// Document type queried from the content API.
const POST_DOCUMENT_TYPE: &str = "post";

/// Page size for post list queries.
const LIST_PAGE_SIZE: u32 = 100;

/// Error type for content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content API returned an error.
    #[error("content API error: HTTP {status}")]
    Api {
        /// HTTP status code.
        status: u16,
    },
}

/// Headless content API client.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ContentClient {
    /// Create a new content client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Content API URL (e.g., `"https://cms.example.com/api"`)
    /// * `access_token` - Optional repository access token
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// List published posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        let url = format!("{}/documents", self.base_url);

        let mut request = self.client.get(&url).query(&[
            ("type", POST_DOCUMENT_TYPE.to_string()),
            ("page_size", LIST_PAGE_SIZE.to_string()),
        ]);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response = request.send().await?;
        let list: DocumentList = Self::handle_response(response).await?;

        Ok(list
            .results
            .into_iter()
            .map(ContentDocument::into_post)
            .collect())
    }

    /// Fetch a single post by slug. Returns `None` when the document does not
    /// exist.
    pub async fn get_post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let url = format!("{}/documents/{}", self.base_url, slug);

        let mut request = self
            .client
            .get(&url)
            .query(&[("type", POST_DOCUMENT_TYPE)]);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: ContentDocument = Self::handle_response(response).await?;
        Ok(Some(document.into_post()))
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ContentError> {
        let status = response.status();

        if !status.is_success() {
            return Err(ContentError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
