//! # Order Client
//!
//! High-level API over the order actor: placement with its receipt,
//! payment verification, per-restaurant status updates, and the listing
//! queries used by storefront and kitchen dashboards.

use actor_store::{EntityClient, StoreClient, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::model::order::{
    Order, OrderCreate, OrderFilter, PaymentOutcome, PaymentVerification, PlacementReceipt,
};
use crate::model::zone::DeliveryPlan;
use crate::model::{CustomerId, FulfillmentStatus, OrderId, RestaurantId};
use crate::order_actor::OrderError;

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
    client_domain: String,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>, client_domain: impl Into<String>) -> Self {
        Self {
            inner,
            client_domain: client_domain.into(),
        }
    }
}

#[async_trait]
impl EntityClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e)
    }
}

/// Recovers the typed order error from the boxed entity error, so callers
/// can match on `PermissionDenied` or `Validation` instead of strings.
fn map_store_error(e: StoreError) -> OrderError {
    match e {
        StoreError::NotFound(id) => OrderError::NotFound(id),
        StoreError::Entity(inner) => match inner.downcast::<OrderError>() {
            Ok(domain) => *domain,
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        },
        other => OrderError::ActorCommunicationError(other.to_string()),
    }
}

impl OrderClient {
    /// Places an order and returns the checkout receipt.
    ///
    /// Decomposition, zone building, and hub resolution all happen inside
    /// the actor before this resolves; the returned amount is the
    /// server-computed cart total.
    #[instrument(skip(self, params))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<PlacementReceipt, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .create(params)
            .await
            .map_err(map_store_error)?;
        Ok(self.receipt(&order))
    }

    /// Places a cash-on-delivery order regardless of the payload's flag.
    pub async fn place_cod_order(
        &self,
        params: OrderCreate,
    ) -> Result<PlacementReceipt, OrderError> {
        self.place_order(OrderCreate { cod: true, ..params }).await
    }

    fn receipt(&self, order: &Order) -> PlacementReceipt {
        let (checkout_url, message) = if order.cod {
            (
                format!(
                    "{}/verify?success=ok&orderId={}",
                    self.client_domain, order.id
                ),
                "Order placed. Pay on delivery.".to_string(),
            )
        } else {
            (
                format!(
                    "{}/checkout?orderId={}&amount={}",
                    self.client_domain, order.id, order.amount
                ),
                "Order placed. Complete the payment to confirm.".to_string(),
            )
        };
        PlacementReceipt {
            order_id: order.id.clone(),
            amount: order.amount,
            checkout_url,
            message,
        }
    }

    /// Applies the payment outcome reported after checkout.
    ///
    /// A failed payment deletes the unpaid order; the other outcomes
    /// record the payment state and trigger the confirmation notification.
    #[instrument(skip(self))]
    pub async fn verify_payment(
        &self,
        id: OrderId,
        outcome: PaymentOutcome,
    ) -> Result<PaymentVerification, OrderError> {
        debug!("Sending request");
        match outcome {
            PaymentOutcome::Succeeded => {
                self.record_payment(id, true).await?;
                Ok(PaymentVerification {
                    confirmed: true,
                    message: "Payment confirmed. Order placed.".to_string(),
                })
            }
            PaymentOutcome::CashOnDelivery => {
                self.record_payment(id, false).await?;
                Ok(PaymentVerification {
                    confirmed: true,
                    message: "Order placed. Pay on delivery.".to_string(),
                })
            }
            PaymentOutcome::Failed => {
                self.delete(id).await?;
                Ok(PaymentVerification {
                    confirmed: false,
                    message: "Payment failed. Order cancelled.".to_string(),
                })
            }
        }
    }

    async fn record_payment(&self, id: OrderId, paid: bool) -> Result<(), OrderError> {
        use crate::order_actor::{OrderAction, OrderActionResult};
        match self
            .inner
            .perform_action(id, OrderAction::RecordPayment { paid })
            .await
        {
            Ok(OrderActionResult::PaymentRecorded) => Ok(()),
            Ok(_) => unreachable!("RecordPayment action must return PaymentRecorded result"),
            Err(e) => Err(map_store_error(e)),
        }
    }

    /// Records one restaurant's progress on an order and returns the
    /// re-derived aggregate status.
    #[instrument(skip(self))]
    pub async fn update_restaurant_status(
        &self,
        id: OrderId,
        restaurant_id: RestaurantId,
        status: FulfillmentStatus,
    ) -> Result<FulfillmentStatus, OrderError> {
        debug!("Sending request");
        use crate::order_actor::{OrderAction, OrderActionResult};
        match self
            .inner
            .perform_action(
                id,
                OrderAction::UpdateRestaurantStatus {
                    restaurant_id,
                    status,
                },
            )
            .await
        {
            Ok(OrderActionResult::StatusUpdated(aggregate)) => Ok(aggregate),
            Ok(_) => unreachable!("UpdateRestaurantStatus action must return StatusUpdated result"),
            Err(e) => Err(map_store_error(e)),
        }
    }

    /// The order's per-district delivery plan.
    #[instrument(skip(self))]
    pub async fn delivery_zones(&self, id: OrderId) -> Result<DeliveryPlan, OrderError> {
        debug!("Sending request");
        let order = self
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        Ok(order.delivery_plan())
    }

    /// Orders a restaurant participates in, paid or not.
    pub async fn orders_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Order>, OrderError> {
        self.list(OrderFilter::ForRestaurant(restaurant_id)).await
    }

    /// A customer's paid orders.
    pub async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, OrderError> {
        self.list(OrderFilter::ForCustomer(customer_id)).await
    }

    /// Every paid order, the admin listing.
    pub async fn paid_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list(OrderFilter::Paid).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use actor_store::mock::{expect_action, expect_create, mock_store_pair};
    use chrono::Utc;

    use super::*;
    use crate::model::order::{Address, LineItem};
    use crate::model::FoodId;
    use crate::order_actor::{OrderAction, OrderActionResult};

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

    fn stored_order(id: u32, amount: f64, cod: bool) -> Order {
        Order {
            id: OrderId(id),
            customer_id: CustomerId(1),
            items: Vec::new(),
            amount,
            address: address(),
            status: FulfillmentStatus::FoodProcessing,
            payment: false,
            cod,
            placed_at: Utc::now(),
            restaurant_ids: Vec::new(),
            restaurant_status: BTreeMap::new(),
            restaurant_amounts: BTreeMap::new(),
            restaurant_items: BTreeMap::new(),
            zones: Vec::new(),
        }
    }

    fn create_params(cod: bool) -> OrderCreate {
        OrderCreate {
            customer_id: CustomerId(1),
            items: vec![LineItem {
                food_id: FoodId(1),
                name: "pho".to_string(),
                price: 9.0,
                quantity: 2,
                restaurant_id: Some(RestaurantId(1)),
            }],
            address: address(),
            cod,
        }
    }

    #[tokio::test]
    async fn test_place_order_builds_checkout_url() {
        let (client, mut receiver) = mock_store_pair::<Order>(10);
        let order_client = OrderClient::new(client, "http://localhost:5173");

        let place_task =
            tokio::spawn(async move { order_client.place_order(create_params(false)).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert!(!params.cod);
        responder.send(Ok(stored_order(7, 18.0, false))).unwrap();

        let receipt = place_task.await.unwrap().unwrap();
        assert_eq!(receipt.order_id, OrderId(7));
        assert_eq!(receipt.amount, 18.0);
        assert_eq!(
            receipt.checkout_url,
            "http://localhost:5173/checkout?orderId=order_7&amount=18"
        );
    }

    #[tokio::test]
    async fn test_place_cod_order_overrides_flag_and_links_verify() {
        let (client, mut receiver) = mock_store_pair::<Order>(10);
        let order_client = OrderClient::new(client, "http://localhost:5173");

        let place_task =
            tokio::spawn(async move { order_client.place_cod_order(create_params(false)).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert!(params.cod);
        responder.send(Ok(stored_order(3, 18.0, true))).unwrap();

        let receipt = place_task.await.unwrap().unwrap();
        assert_eq!(
            receipt.checkout_url,
            "http://localhost:5173/verify?success=ok&orderId=order_3"
        );
    }

    #[tokio::test]
    async fn test_update_restaurant_status_returns_aggregate() {
        let (client, mut receiver) = mock_store_pair::<Order>(10);
        let order_client = OrderClient::new(client, "http://localhost:5173");

        let update_task = tokio::spawn(async move {
            order_client
                .update_restaurant_status(
                    OrderId(7),
                    RestaurantId(2),
                    FulfillmentStatus::OutForDelivery,
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(7));
        assert!(matches!(
            action,
            OrderAction::UpdateRestaurantStatus {
                status: FulfillmentStatus::OutForDelivery,
                ..
            }
        ));
        responder
            .send(Ok(OrderActionResult::StatusUpdated(
                FulfillmentStatus::OutForDelivery,
            )))
            .unwrap();

        let aggregate = update_task.await.unwrap().unwrap();
        assert_eq!(aggregate, FulfillmentStatus::OutForDelivery);
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let (client, mut receiver) = mock_store_pair::<Order>(10);
        let order_client = OrderClient::new(client, "http://localhost:5173");

        let update_task = tokio::spawn(async move {
            order_client
                .update_restaurant_status(
                    OrderId(7),
                    RestaurantId(9),
                    FulfillmentStatus::Preparing,
                )
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(StoreError::Entity(Box::new(
                OrderError::PermissionDenied(
                    "You don't have permission to update this order".to_string(),
                ),
            ))))
            .unwrap();

        let err = update_task.await.unwrap().unwrap_err();
        assert!(matches!(err, OrderError::PermissionDenied(_)));
    }
}
