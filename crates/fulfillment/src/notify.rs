//! Customer notification seam.
//!
//! Notifications are dispatched fire-and-forget: the order actor spawns
//! the delivery attempt and moves on, so a slow or broken channel can
//! never roll back an order mutation. Failures are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::model::OrderId;

#[derive(Debug, thiserror::Error)]
#[error("Notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Snapshot of the order fields a notification template needs.
#[derive(Debug, Clone, Serialize)]
pub struct OrderNotification {
    pub order_id: OrderId,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub amount: f64,
    pub cod: bool,
}

/// Delivery channel for customer notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sent once payment is verified, or immediately for cash on delivery.
    async fn order_confirmed(&self, event: OrderNotification) -> Result<(), NotifyError>;

    /// Sent when the aggregate status first reaches `Delivered`.
    async fn order_delivered(&self, event: OrderNotification) -> Result<(), NotifyError>;
}

/// Logs notifications instead of sending them. The default channel for
/// local runs.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn order_confirmed(&self, event: OrderNotification) -> Result<(), NotifyError> {
        info!(
            order_id = %event.order_id,
            email = %event.email,
            amount = event.amount,
            cod = event.cod,
            "Order confirmed"
        );
        Ok(())
    }

    async fn order_delivered(&self, event: OrderNotification) -> Result<(), NotifyError> {
        info!(
            order_id = %event.order_id,
            email = %event.email,
            "Order delivered"
        );
        Ok(())
    }
}

pub fn dispatch_confirmed(notifier: Arc<dyn Notifier>, event: OrderNotification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.order_confirmed(event).await {
            warn!(error = %e, "Order-confirmed notification dropped");
        }
    });
}

pub fn dispatch_delivered(notifier: Arc<dyn Notifier>, event: OrderNotification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.order_delivered(event).await {
            warn!(error = %e, "Order-delivered notification dropped");
        }
    });
}
