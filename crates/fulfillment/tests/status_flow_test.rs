use std::sync::Arc;
use std::time::Duration;

use actor_store::EntityClient;
use async_trait::async_trait;
use fulfillment::config::FulfillmentConfig;
use fulfillment::directory::InMemoryDirectory;
use fulfillment::lifecycle::FulfillmentSystem;
use fulfillment::model::order::{Address, LineItem, OrderCreate, PaymentOutcome};
use fulfillment::model::{CustomerId, FoodId, FulfillmentStatus, OrderId, RestaurantId};
use fulfillment::notify::{Notifier, NotifyError, OrderNotification};
use fulfillment::order_actor::OrderError;
use tokio::sync::mpsc;
use tokio::time::timeout;

#[derive(Debug, PartialEq, Eq)]
enum Event {
    Confirmed(OrderId),
    Delivered(OrderId),
}

/// Forwards notifications into a channel so tests can assert on exactly
/// what was sent.
struct ChannelNotifier {
    events: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn order_confirmed(&self, event: OrderNotification) -> Result<(), NotifyError> {
        self.events
            .send(Event::Confirmed(event.order_id))
            .map_err(|e| NotifyError(e.to_string()))
    }

    async fn order_delivered(&self, event: OrderNotification) -> Result<(), NotifyError> {
        self.events
            .send(Event::Delivered(event.order_id))
            .map_err(|e| NotifyError(e.to_string()))
    }
}

fn address() -> Address {
    Address {
        name: "Lan Pham".to_string(),
        email: "lan@example.com".to_string(),
        phone: "0900000000".to_string(),
        street: "12 Le Loi".to_string(),
        district: "District 1".to_string(),
        city: "Ho Chi Minh City".to_string(),
    }
}

fn cart(restaurants: &[u32]) -> OrderCreate {
    OrderCreate {
        customer_id: CustomerId(1),
        items: restaurants
            .iter()
            .map(|restaurant| LineItem {
                food_id: FoodId(*restaurant),
                name: format!("dish {restaurant}"),
                price: 10.0,
                quantity: 1,
                restaurant_id: Some(RestaurantId(*restaurant)),
            })
            .collect(),
        address: address(),
        cod: false,
    }
}

async fn system_with_events() -> (FulfillmentSystem, mpsc::UnboundedReceiver<Event>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let directory = Arc::new(InMemoryDirectory::new());
    directory.insert(RestaurantId(1), "District 1").await;
    directory.insert(RestaurantId(2), "District 1").await;

    let system = FulfillmentSystem::new(
        FulfillmentConfig::default(),
        directory,
        Arc::new(ChannelNotifier { events: sender }),
    );
    (system, receiver)
}

async fn next_event(receiver: &mut mpsc::UnboundedReceiver<Event>) -> Event {
    timeout(Duration::from_secs(1), receiver.recv())
        .await
        .expect("Timed out waiting for a notification")
        .expect("Notification channel closed")
}

/// Lets already-spawned notification tasks run before asserting that no
/// further event arrives.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_payment_verification_confirms_and_notifies() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");

    let verification = system
        .order_client
        .verify_payment(receipt.order_id.clone(), PaymentOutcome::Succeeded)
        .await
        .expect("Failed to verify payment");
    assert!(verification.confirmed);
    assert_eq!(verification.message, "Payment confirmed. Order placed.");

    assert_eq!(
        next_event(&mut events).await,
        Event::Confirmed(receipt.order_id.clone())
    );

    let paid = system
        .order_client
        .paid_orders()
        .await
        .expect("Failed to list paid orders");
    assert_eq!(paid.len(), 1);
    let mine = system
        .order_client
        .orders_for_customer(CustomerId(1))
        .await
        .expect("Failed to list customer orders");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, receipt.order_id);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_failed_payment_cancels_the_order() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");

    let verification = system
        .order_client
        .verify_payment(receipt.order_id.clone(), PaymentOutcome::Failed)
        .await
        .expect("Failed to verify payment");
    assert!(!verification.confirmed);
    assert_eq!(verification.message, "Payment failed. Order cancelled.");

    // The order is gone, and the customer heard nothing.
    let order = system
        .order_client
        .get(receipt.order_id)
        .await
        .expect("Failed to get order");
    assert!(order.is_none());
    settle().await;
    assert!(events.try_recv().is_err());

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_aggregate_tracks_the_slowest_restaurant() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1, 2]))
        .await
        .expect("Failed to place order");
    let order_id = receipt.order_id;

    let report = |restaurant: u32, status: FulfillmentStatus| {
        let client = system.order_client.clone();
        let order_id = order_id.clone();
        async move {
            client
                .update_restaurant_status(order_id, RestaurantId(restaurant), status)
                .await
                .expect("Failed to update restaurant status")
        }
    };

    assert_eq!(
        report(1, FulfillmentStatus::Preparing).await,
        FulfillmentStatus::Preparing
    );
    assert_eq!(
        report(1, FulfillmentStatus::ReadyForPickup).await,
        FulfillmentStatus::ReadyForPickup
    );
    assert_eq!(
        report(1, FulfillmentStatus::OutForDelivery).await,
        FulfillmentStatus::OutForDelivery
    );
    // One bag in the air outranks the other kitchen still cooking.
    assert_eq!(
        report(2, FulfillmentStatus::Preparing).await,
        FulfillmentStatus::OutForDelivery
    );
    // Once every share is at least out for delivery, the order is done.
    assert_eq!(
        report(2, FulfillmentStatus::OutForDelivery).await,
        FulfillmentStatus::Delivered
    );

    assert_eq!(
        next_event(&mut events).await,
        Event::Delivered(order_id.clone())
    );

    // Further reports keep the aggregate at delivered without re-notifying.
    assert_eq!(
        report(1, FulfillmentStatus::Delivered).await,
        FulfillmentStatus::Delivered
    );
    settle().await;
    assert!(
        events.try_recv().is_err(),
        "Delivered must be notified exactly once"
    );

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_single_restaurant_out_for_delivery_completes_the_order() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");

    // With one restaurant there is nothing left to wait for.
    let aggregate = system
        .order_client
        .update_restaurant_status(
            receipt.order_id.clone(),
            RestaurantId(1),
            FulfillmentStatus::OutForDelivery,
        )
        .await
        .expect("Failed to update restaurant status");
    assert_eq!(aggregate, FulfillmentStatus::Delivered);
    assert_eq!(
        next_event(&mut events).await,
        Event::Delivered(receipt.order_id)
    );

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_restaurant_outside_the_order_is_rejected() {
    let (system, _events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");

    let err = system
        .order_client
        .update_restaurant_status(
            receipt.order_id.clone(),
            RestaurantId(9),
            FulfillmentStatus::Preparing,
        )
        .await
        .expect_err("Foreign restaurant must be rejected");
    assert!(matches!(err, OrderError::PermissionDenied(_)));

    // The rejected report changed nothing.
    let order = system
        .order_client
        .get(receipt.order_id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(order.status, FulfillmentStatus::FoodProcessing);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_paid_orders_cannot_be_deleted() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");
    system
        .order_client
        .verify_payment(receipt.order_id.clone(), PaymentOutcome::Succeeded)
        .await
        .expect("Failed to verify payment");
    assert_eq!(
        next_event(&mut events).await,
        Event::Confirmed(receipt.order_id.clone())
    );

    let err = system
        .order_client
        .delete(receipt.order_id.clone())
        .await
        .expect_err("Paid order must refuse deletion");
    assert!(matches!(err, OrderError::Validation(_)));
    assert!(system
        .order_client
        .get(receipt.order_id)
        .await
        .expect("Failed to get order")
        .is_some());

    // An unpaid order deletes cleanly.
    let unpaid = system
        .order_client
        .place_order(cart(&[1]))
        .await
        .expect("Failed to place order");
    system
        .order_client
        .delete(unpaid.order_id.clone())
        .await
        .expect("Unpaid order must delete");
    assert!(system
        .order_client
        .get(unpaid.order_id)
        .await
        .expect("Failed to get order")
        .is_none());

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_cash_on_delivery_confirmation_notifies_without_marking_paid() {
    let (system, mut events) = system_with_events().await;

    let receipt = system
        .order_client
        .place_cod_order(cart(&[1]))
        .await
        .expect("Failed to place order");
    system
        .order_client
        .verify_payment(receipt.order_id.clone(), PaymentOutcome::CashOnDelivery)
        .await
        .expect("Failed to verify payment");

    assert_eq!(
        next_event(&mut events).await,
        Event::Confirmed(receipt.order_id)
    );
    let paid = system
        .order_client
        .paid_orders()
        .await
        .expect("Failed to list paid orders");
    assert!(paid.is_empty());

    system.shutdown().await.expect("Failed to shutdown system");
}
