//! Core types for inkgate.
//!
//! This crate provides the foundational types used throughout the inkgate
//! platform:
//!
//! - **Identifiers**: `UserId`, `SubscriptionId`, `CustomerId`
//! - **Accounts**: `Account` (links a user to a payment-provider customer)
//! - **Subscriptions**: `SubscriptionRecord` (per-customer active flag)
//! - **Posts**: `Post`, `PostSummary` (content served from the headless CMS)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod ids;
pub mod post;
pub mod subscription;

pub use account::Account;
pub use ids::{CustomerId, IdError, SubscriptionId, UserId};
pub use post::{Post, PostSummary, PARAGRAPH_SEPARATOR};
pub use subscription::SubscriptionRecord;
