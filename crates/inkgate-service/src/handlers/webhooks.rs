//! Stripe webhook ingress.
//!
//! Flow: buffer the raw body, verify the signature over the exact bytes,
//! parse the envelope, filter against the allow-list, then hand the decoded
//! change to the store's reconciler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use inkgate_store::StoreError;

use crate::state::AppState;
use crate::stripe::event::{EventError, EventKind, SubscriptionChange, WebhookEvent};
use crate::stripe::signature::{self, SignatureError, DEFAULT_TOLERANCE};

/// Webhook acknowledgment body.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    /// Whether the delivery was received.
    pub received: bool,
}

/// Failures that reject a delivery outright (client error, no ack).
#[derive(Debug, thiserror::Error)]
enum IngressError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failures while handling an accepted, allow-listed event.
#[derive(Debug, thiserror::Error)]
enum HandlerError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle a Stripe webhook delivery.
///
/// Registered for `POST` only; axum answers other methods with `405` and an
/// `Allow: POST` header.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = match accept(&state, &headers, &body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected webhook delivery");
            return (StatusCode::BAD_REQUEST, format!("Webhook error: {err}")).into_response();
        }
    };

    tracing::info!(
        event_type = %event.event_type,
        event_id = %event.id,
        "Received Stripe webhook"
    );

    let Some(kind) = EventKind::from_type(&event.event_type) else {
        // Ack so the provider does not retry events we have no use for.
        tracing::debug!(event_type = %event.event_type, "Event outside allow-list, ignoring");
        return Json(WebhookAck { received: true }).into_response();
    };

    match reconcile(&state, kind, &event.data.object) {
        Ok(()) => Json(WebhookAck { received: true }).into_response(),
        Err(err) => {
            // Acked with a 200 despite the failure; the body carries a generic
            // error instead. Kept for compatibility with existing consumers,
            // even though it stops the provider from redelivering.
            tracing::error!(
                event_type = %event.event_type,
                event_id = %event.id,
                error = %err,
                "Webhook handler failed"
            );
            Json(json!({"error": "Webhook handler failed."})).into_response()
        }
    }
}

/// Verify the delivery and parse the envelope.
///
/// Verification runs over the exact body bytes; parsing only happens after
/// the signature checks out.
fn accept(state: &AppState, headers: &HeaderMap, body: &Bytes) -> Result<WebhookEvent, IngressError> {
    if let Some(secret) = &state.config.stripe_webhook_secret {
        let header = headers
            .get("stripe-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or(SignatureError::MissingHeader)?;

        signature::verify(body, header, secret, DEFAULT_TOLERANCE)?;
    } else {
        // Development mode only.
        tracing::warn!("stripe_webhook_secret not configured - skipping signature verification");
    }

    Ok(serde_json::from_slice(body)?)
}

/// Decode the reconciler input and upsert the subscription record.
fn reconcile(
    state: &AppState,
    kind: EventKind,
    object: &serde_json::Value,
) -> Result<(), HandlerError> {
    let change = SubscriptionChange::from_object(kind, object)?;

    let record = state.store.reconcile_subscription(
        &change.subscription_id,
        &change.customer_id,
        change.active,
    )?;

    tracing::info!(
        event_type = %kind.as_str(),
        subscription_id = %record.subscription_id,
        customer_id = %record.customer_id,
        active = %record.active,
        "Subscription reconciled"
    );

    Ok(())
}
