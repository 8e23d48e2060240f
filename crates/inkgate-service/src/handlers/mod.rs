//! HTTP request handlers.

pub mod health;
pub mod posts;
pub mod subscribe;
pub mod webhooks;
