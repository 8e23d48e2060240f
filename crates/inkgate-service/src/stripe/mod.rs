//! Stripe integration: webhook event types, signature verification, and the
//! checkout client.

pub mod client;
pub mod event;
pub mod signature;
pub mod types;

pub use client::{StripeClient, StripeError};
pub use event::{EventKind, SubscriptionChange, WebhookEvent};
pub use signature::SignatureError;
pub use types::{CheckoutSession, Customer};
