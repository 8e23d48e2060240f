//! Webhook event envelope and the allow-listed event kinds.

use serde::Deserialize;

use inkgate_core::{CustomerId, IdError, SubscriptionId};

/// Stripe webhook payload envelope.
///
/// Parsed only after signature verification; `data.object`'s shape depends on
/// the event type and is decoded by [`SubscriptionChange::from_object`].
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    /// Event type tag (open-ended vocabulary).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event ID.
    pub id: String,
    /// Event data.
    pub data: EventData,
}

/// Event data container.
#[derive(Debug, Deserialize)]
pub struct EventData {
    /// Event object; shape depends on the event type.
    pub object: serde_json::Value,
}

/// The fixed set of event kinds this service acts upon.
///
/// Every other event type is acknowledged and ignored, so the provider does
/// not retry deliveries we have no use for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `checkout.session.completed`
    CheckoutSessionCompleted,
    /// `customer.subscription.created`
    SubscriptionCreated,
    /// `customer.subscription.updated`
    SubscriptionUpdated,
    /// `customer.subscription.deleted`
    SubscriptionDeleted,
}

impl EventKind {
    /// Map an event type tag to an allow-listed kind, `None` for everything
    /// else.
    #[must_use]
    pub fn from_type(event_type: &str) -> Option<Self> {
        match event_type {
            "checkout.session.completed" => Some(Self::CheckoutSessionCompleted),
            "customer.subscription.created" => Some(Self::SubscriptionCreated),
            "customer.subscription.updated" => Some(Self::SubscriptionUpdated),
            "customer.subscription.deleted" => Some(Self::SubscriptionDeleted),
            _ => None,
        }
    }

    /// The provider's type tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
        }
    }
}

/// The reconciler input decoded from an allow-listed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    /// The provider's subscription identifier.
    pub subscription_id: SubscriptionId,
    /// The provider's customer identifier.
    pub customer_id: CustomerId,
    /// Whether the subscription is active after this event.
    pub active: bool,
}

/// Errors decoding `data.object` into a [`SubscriptionChange`].
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// A required field is absent or has an unexpected shape.
    #[error("missing or malformed field `{0}`")]
    MissingField(&'static str),

    /// A field is present but is not a usable identifier.
    #[error("invalid identifier in field `{field}`: {source}")]
    InvalidId {
        /// The offending field.
        field: &'static str,
        /// The underlying parse error.
        source: IdError,
    },
}

impl SubscriptionChange {
    /// Decode the reconciler input from a verified event object.
    ///
    /// Subscription lifecycle events carry the subscription in `object.id`
    /// and the customer in `object.customer`; checkout completion carries
    /// both under `object.subscription` and `object.customer`. Created and
    /// updated events mark the subscription active; deletion marks it
    /// inactive without removing the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not carry the expected fields.
    pub fn from_object(kind: EventKind, object: &serde_json::Value) -> Result<Self, EventError> {
        let (subscription_field, active) = match kind {
            EventKind::SubscriptionCreated | EventKind::SubscriptionUpdated => ("id", true),
            EventKind::SubscriptionDeleted => ("id", false),
            EventKind::CheckoutSessionCompleted => ("subscription", true),
        };

        let subscription_id = id_field(object, subscription_field)?
            .parse::<SubscriptionId>()
            .map_err(|source| EventError::InvalidId {
                field: subscription_field,
                source,
            })?;

        let customer_id = id_field(object, "customer")?
            .parse::<CustomerId>()
            .map_err(|source| EventError::InvalidId {
                field: "customer",
                source,
            })?;

        Ok(Self {
            subscription_id,
            customer_id,
            active,
        })
    }
}

/// Read an identifier field that the provider sends either as a plain string
/// or, when expansion is requested, as an object with an `id`.
fn id_field<'a>(
    object: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a str, EventError> {
    let value = object.get(field).ok_or(EventError::MissingField(field))?;

    value
        .as_str()
        .or_else(|| value.get("id").and_then(serde_json::Value::as_str))
        .ok_or(EventError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn allow_list_roundtrip() {
        for kind in [
            EventKind::CheckoutSessionCompleted,
            EventKind::SubscriptionCreated,
            EventKind::SubscriptionUpdated,
            EventKind::SubscriptionDeleted,
        ] {
            assert_eq!(EventKind::from_type(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_types_are_not_allow_listed() {
        assert_eq!(EventKind::from_type("invoice.payment_failed"), None);
        assert_eq!(EventKind::from_type("payment_intent.succeeded"), None);
        assert_eq!(EventKind::from_type(""), None);
    }

    #[test]
    fn decodes_subscription_created() {
        let object = json!({"id": "sub_1", "customer": "cus_1", "status": "active"});
        let change =
            SubscriptionChange::from_object(EventKind::SubscriptionCreated, &object).unwrap();

        assert_eq!(change.subscription_id.as_str(), "sub_1");
        assert_eq!(change.customer_id.as_str(), "cus_1");
        assert!(change.active);
    }

    #[test]
    fn decodes_subscription_deleted_as_inactive() {
        let object = json!({"id": "sub_1", "customer": "cus_1"});
        let change =
            SubscriptionChange::from_object(EventKind::SubscriptionDeleted, &object).unwrap();
        assert!(!change.active);
    }

    #[test]
    fn decodes_checkout_session() {
        let object = json!({"id": "cs_1", "subscription": "sub_2", "customer": "cus_2"});
        let change =
            SubscriptionChange::from_object(EventKind::CheckoutSessionCompleted, &object).unwrap();

        assert_eq!(change.subscription_id.as_str(), "sub_2");
        assert_eq!(change.customer_id.as_str(), "cus_2");
        assert!(change.active);
    }

    #[test]
    fn accepts_expanded_customer_object() {
        let object = json!({"id": "sub_1", "customer": {"id": "cus_1", "email": "r@example.com"}});
        let change =
            SubscriptionChange::from_object(EventKind::SubscriptionUpdated, &object).unwrap();
        assert_eq!(change.customer_id.as_str(), "cus_1");
    }

    #[test]
    fn missing_customer_is_an_error() {
        let object = json!({"id": "sub_1"});
        let err =
            SubscriptionChange::from_object(EventKind::SubscriptionCreated, &object).unwrap_err();
        assert!(matches!(err, EventError::MissingField("customer")));
    }

    #[test]
    fn null_subscription_on_checkout_is_an_error() {
        // One-time payment checkouts have no subscription attached.
        let object = json!({"id": "cs_1", "subscription": null, "customer": "cus_2"});
        let err = SubscriptionChange::from_object(EventKind::CheckoutSessionCompleted, &object)
            .unwrap_err();
        assert!(matches!(err, EventError::MissingField("subscription")));
    }

    #[test]
    fn envelope_parses() {
        let raw = json!({
            "id": "evt_1",
            "type": "customer.subscription.created",
            "data": {"object": {"id": "sub_1", "customer": "cus_1"}}
        });
        let event: WebhookEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.event_type, "customer.subscription.created");
        assert_eq!(event.id, "evt_1");
    }
}
