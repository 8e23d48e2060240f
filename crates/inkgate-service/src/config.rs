//! Service configuration.

use serde::Deserialize;
use std::path::Path;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to the `RocksDB` data directory (default: "/data/inkgate").
    pub data_dir: String,

    /// Secret for validating session JWTs (HS256). Without it only the
    /// test-auth bypass can authenticate.
    pub session_secret: Option<String>,

    /// Stripe API key (optional).
    pub stripe_api_key: Option<String>,

    /// Stripe webhook signing secret (optional).
    pub stripe_webhook_secret: Option<String>,

    /// Stripe price ID for the subscription checkout.
    pub stripe_price_id: Option<String>,

    /// Headless content API base URL (optional).
    pub content_api_url: Option<String>,

    /// Access token for the content API (optional).
    pub content_access_token: Option<String>,

    /// Frontend URL for checkout redirects.
    pub frontend_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    api_key: String,
    #[serde(default)]
    webhook_secret: Option<String>,
    #[serde(default)]
    price_id: Option<String>,
}

/// Content API secrets file structure.
#[derive(Debug, Deserialize)]
struct ContentSecrets {
    api_url: String,
    #[serde(default)]
    access_token: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load secrets from files first, then fall back to env vars
        let (stripe_api_key, stripe_webhook_secret, stripe_price_id) = load_stripe_secrets();
        let (content_api_url, content_access_token) = load_content_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/inkgate".into()),
            session_secret: std::env::var("SESSION_SECRET").ok(),
            stripe_api_key,
            stripe_webhook_secret,
            stripe_price_id,
            content_api_url,
            content_access_token,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

/// Load Stripe secrets from file or environment.
fn load_stripe_secrets() -> (Option<String>, Option<String>, Option<String>) {
    let secret_paths = [
        ".secrets/stripe.json",
        "inkgate/.secrets/stripe.json",
        "../.secrets/stripe.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<StripeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Stripe secrets from file");
            return (
                Some(secrets.api_key),
                secrets.webhook_secret,
                secrets.price_id,
            );
        }
    }

    tracing::debug!("Stripe secrets file not found, using environment variables");
    (
        std::env::var("STRIPE_API_KEY").ok(),
        std::env::var("STRIPE_WEBHOOK_SECRET").ok(),
        std::env::var("STRIPE_PRICE_ID").ok(),
    )
}

/// Load content API secrets from file or environment.
fn load_content_secrets() -> (Option<String>, Option<String>) {
    let secret_paths = [
        ".secrets/content.json",
        "inkgate/.secrets/content.json",
        "../.secrets/content.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<ContentSecrets>(path) {
            tracing::info!(path = %path, "Loaded content API secrets from file");
            return (Some(secrets.api_url), secrets.access_token);
        }
    }

    tracing::debug!("Content secrets file not found, using environment variables");
    (
        std::env::var("CONTENT_API_URL").ok(),
        std::env::var("CONTENT_ACCESS_TOKEN").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/inkgate".into(),
            session_secret: None,
            stripe_api_key: None,
            stripe_webhook_secret: None,
            stripe_price_id: None,
            content_api_url: None,
            content_access_token: None,
            frontend_url: "http://localhost:3000".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
