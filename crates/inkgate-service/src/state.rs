//! Application state.

use std::sync::Arc;

use inkgate_store::Store;

use crate::config::ServiceConfig;
use crate::content::ContentClient;
use crate::stripe::StripeClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Headless content API client (optional).
    pub content: Option<Arc<ContentClient>>,

    /// Stripe client for checkout (optional).
    pub stripe: Option<Arc<StripeClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        // Create content client if configured
        let content = config.content_api_url.as_ref().map(|url| {
            tracing::info!(content_api_url = %url, "Content API integration enabled");
            Arc::new(ContentClient::new(
                url.clone(),
                config.content_access_token.clone(),
            ))
        });

        if content.is_none() {
            tracing::warn!("Content API not configured - post endpoints will be unavailable");
        }

        // Create Stripe client if configured
        let stripe = config.stripe_api_key.as_ref().map(|key| {
            tracing::info!("Stripe integration enabled");
            Arc::new(StripeClient::new(key.clone()))
        });

        if stripe.is_none() {
            tracing::warn!("Stripe not configured - checkout will not be available");
        }

        Self {
            store,
            config,
            content,
            stripe,
        }
    }

    /// Check if the content API is configured.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Check if Stripe is configured.
    #[must_use]
    pub fn has_stripe(&self) -> bool {
        self.stripe.is_some()
    }
}
