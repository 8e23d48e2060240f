//! Inkgate HTTP API Service.
//!
//! This crate provides the HTTP API for the inkgate content-subscription
//! service, including:
//!
//! - Post listing and subscription-gated post content
//! - Subscription checkout (Stripe)
//! - Stripe webhook ingestion and subscription reconciliation
//!
//! # Authentication
//!
//! Readers authenticate with a bearer session token (JWT). The posts
//! endpoints degrade to preview content for anonymous callers; the subscribe
//! endpoint requires a session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Webhook handlers need async for consistency

pub mod auth;
pub mod config;
pub mod content;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use content::{ContentClient, ContentError};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
