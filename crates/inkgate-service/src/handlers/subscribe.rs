//! Subscription checkout.
//!
//! Creates the provider-side customer on first use, then hands the reader a
//! hosted checkout URL. The subscription itself lands later via webhook.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use inkgate_core::{Account, CustomerId};

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::StripeError;

/// Response for a started checkout.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    /// Checkout session ID.
    pub session_id: String,
    /// Hosted checkout URL to redirect the reader to.
    pub checkout_url: String,
}

/// Start a subscription checkout for the authenticated reader.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    user: AuthedUser,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let stripe = state
        .stripe
        .as_deref()
        .ok_or_else(|| ApiError::ExternalService("Stripe not configured".into()))?;
    let price_id = state
        .config
        .stripe_price_id
        .as_deref()
        .ok_or_else(|| ApiError::ExternalService("subscription price not configured".into()))?;

    let mut account = state
        .store
        .get_account(&user.user_id)?
        .unwrap_or_else(|| Account::new(user.user_id));
    if account.email.is_none() {
        account.email.clone_from(&user.email);
    }

    let customer_id = match account.stripe_customer_id.clone() {
        Some(id) => id,
        None => {
            let customer = stripe
                .create_customer(&user.user_id.to_string(), account.email.as_deref())
                .await
                .map_err(stripe_failed)?;

            let id = CustomerId::new(customer.id).map_err(|e| {
                ApiError::Internal(format!("provider returned invalid customer id: {e}"))
            })?;

            account.link_customer(id.clone());
            state.store.put_account(&account)?;

            tracing::info!(
                user_id = %user.user_id,
                customer_id = %id,
                "Created Stripe customer"
            );
            id
        }
    };

    let success_url = format!("{}/posts", state.config.frontend_url);
    let cancel_url = state.config.frontend_url.clone();

    let session = stripe
        .create_subscription_checkout(customer_id.as_str(), price_id, &success_url, &cancel_url)
        .await
        .map_err(stripe_failed)?;

    let checkout_url = session
        .url
        .ok_or_else(|| ApiError::ExternalService("checkout session has no URL".into()))?;

    tracing::info!(
        user_id = %user.user_id,
        session_id = %session.id,
        "Checkout session created"
    );

    Ok(Json(SubscribeResponse {
        session_id: session.id,
        checkout_url,
    }))
}

fn stripe_failed(err: StripeError) -> ApiError {
    tracing::error!(error = %err, "Stripe request failed");
    ApiError::ExternalService("payment provider request failed".into())
}
