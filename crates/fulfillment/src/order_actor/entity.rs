//! [`StoreEntity`] implementation for [`Order`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use actor_store::StoreEntity;
use async_trait::async_trait;
use chrono::Utc;
use tokio::time::timeout;
use tracing::warn;

use crate::clients::FleetClient;
use crate::config::FulfillmentConfig;
use crate::directory::DistrictIndex;
use crate::model::order::{Order, OrderCreate, OrderFilter, OrderUpdate};
use crate::model::zone::{DeliveryZone, HubAssignment, UnresolvedReason};
use crate::model::{FulfillmentStatus, OrderId};
use crate::notify::{dispatch_confirmed, dispatch_delivered, Notifier};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::planner::decompose::CartBreakdown;
use crate::planner::{capacity, decompose, zones};

/// Dependencies injected into every order hook.
///
/// The fleet client and the district index are read during placement to
/// build delivery zones; the notifier is invoked fire-and-forget on
/// payment confirmation and on the transition to delivered.
#[derive(Clone)]
pub struct OrderContext {
    pub directory: Arc<dyn DistrictIndex>,
    pub fleet: FleetClient,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<FulfillmentConfig>,
}

#[async_trait]
impl StoreEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Filter = OrderFilter;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::Validation("Cart is empty".to_string()));
        }
        if params.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::Validation(
                "Item quantities must be at least 1".to_string(),
            ));
        }
        if params.items.iter().any(|item| item.price < 0.0) {
            return Err(OrderError::Validation(
                "Item prices cannot be negative".to_string(),
            ));
        }
        if params.address.name.trim().is_empty()
            || params.address.email.trim().is_empty()
            || params.address.street.trim().is_empty()
        {
            return Err(OrderError::Validation(
                "Delivery address needs a name, an email, and a street".to_string(),
            ));
        }

        let breakdown = decompose::decompose(&params.items);
        let restaurant_status: BTreeMap<_, _> = breakdown
            .restaurant_ids
            .iter()
            .map(|restaurant| (restaurant.clone(), FulfillmentStatus::FoodProcessing))
            .collect();

        Ok(Order {
            id,
            customer_id: params.customer_id,
            amount: decompose::cart_total(&params.items),
            status: FulfillmentStatus::aggregate(&restaurant_status),
            payment: false,
            cod: params.cod,
            placed_at: Utc::now(),
            restaurant_ids: breakdown.restaurant_ids,
            restaurant_status,
            restaurant_amounts: breakdown.amounts,
            restaurant_items: breakdown.items,
            items: params.items,
            address: params.address,
            zones: Vec::new(),
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::All => true,
            OrderFilter::Paid => self.payment,
            OrderFilter::ForCustomer(customer_id) => {
                self.payment && self.customer_id == *customer_id
            }
            OrderFilter::ForRestaurant(restaurant_id) => {
                self.restaurant_ids.contains(restaurant_id)
            }
        }
    }

    /// Builds the delivery zones.
    ///
    /// Both reads degrade rather than fail: an unreachable district index
    /// leaves the order without zones, and an unreachable hub registry
    /// leaves zones unresolved. Placement itself never blocks on either.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let breakdown = CartBreakdown {
            restaurant_ids: self.restaurant_ids.clone(),
            amounts: self.restaurant_amounts.clone(),
            items: self.restaurant_items.clone(),
        };
        let drafts =
            zones::build_zones(&breakdown, ctx.directory.as_ref(), ctx.config.lookup_timeout)
                .await;

        let mut zones = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let plan = capacity::plan(&draft.items, &ctx.config);
            let hub = resolve_hub(&draft.district, &ctx.fleet, ctx.config.lookup_timeout).await;
            zones.push(DeliveryZone {
                district: draft.district,
                restaurant_ids: draft.restaurant_ids,
                items: draft.items,
                amount: draft.amount,
                hub,
                estimated_weight_kg: plan.estimated_weight_kg,
                recommended_drones: plan.recommended_drones,
            });
        }
        self.zones = zones;
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), OrderError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), OrderError> {
        if self.payment {
            return Err(OrderError::Validation(
                "Paid orders cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::UpdateRestaurantStatus {
                restaurant_id,
                status,
            } => {
                // Only restaurants that joined the order at placement have
                // a slot; the key set never grows afterwards.
                let Some(slot) = self.restaurant_status.get_mut(&restaurant_id) else {
                    return Err(OrderError::PermissionDenied(
                        "You don't have permission to update this order".to_string(),
                    ));
                };
                *slot = status;

                let previous = self.status;
                self.status = FulfillmentStatus::aggregate(&self.restaurant_status);
                if self.status == FulfillmentStatus::Delivered
                    && previous != FulfillmentStatus::Delivered
                {
                    dispatch_delivered(ctx.notifier.clone(), self.notification());
                }
                Ok(OrderActionResult::StatusUpdated(self.status))
            }
            OrderAction::RecordPayment { paid } => {
                self.payment = paid;
                dispatch_confirmed(ctx.notifier.clone(), self.notification());
                Ok(OrderActionResult::PaymentRecorded)
            }
        }
    }
}

/// Picks the least-loaded active hub in the district, or records why none
/// could be picked.
async fn resolve_hub(
    district: &str,
    fleet: &FleetClient,
    lookup_timeout: Duration,
) -> HubAssignment {
    match timeout(
        lookup_timeout,
        fleet.active_hubs_in_district(district.to_string()),
    )
    .await
    {
        Ok(Ok(hubs)) => match hubs.into_iter().next() {
            Some(hub) => HubAssignment::Resolved(hub.id),
            None => HubAssignment::Unresolved(UnresolvedReason::NoActiveHub),
        },
        Ok(Err(e)) => {
            warn!(district, error = %e, "Hub registry lookup failed");
            HubAssignment::Unresolved(UnresolvedReason::RegistryUnavailable)
        }
        Err(_) => {
            warn!(district, "Hub registry lookup timed out");
            HubAssignment::Unresolved(UnresolvedReason::RegistryUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::model::order::{Address, LineItem};
    use crate::model::{CustomerId, FoodId, RestaurantId};
    use crate::notify::LogNotifier;

    fn context() -> OrderContext {
        // The receiver is dropped, so any fleet call would fail; these
        // tests exercise paths that never reach the fleet.
        let (sender, _receiver) = mpsc::channel(8);
        OrderContext {
            directory: Arc::new(InMemoryDirectory::new()),
            fleet: FleetClient::new(sender),
            notifier: Arc::new(LogNotifier),
            config: Arc::new(FulfillmentConfig::default()),
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

    fn item(food: u32, price: f64, quantity: u32, restaurant: Option<u32>) -> LineItem {
        LineItem {
            food_id: FoodId(food),
            name: format!("dish {food}"),
            price,
            quantity,
            restaurant_id: restaurant.map(RestaurantId),
        }
    }

    fn two_restaurant_order() -> Order {
        Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: CustomerId(1),
                items: vec![
                    item(1, 10.0, 2, Some(1)),
                    item(2, 5.0, 1, Some(2)),
                    item(3, 2.0, 1, Some(1)),
                ],
                address: address(),
                cod: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_placement_initializes_every_restaurant_to_food_processing() {
        let order = two_restaurant_order();
        assert_eq!(order.restaurant_ids, vec![RestaurantId(1), RestaurantId(2)]);
        assert!(order
            .restaurant_status
            .values()
            .all(|s| *s == FulfillmentStatus::FoodProcessing));
        assert_eq!(order.status, FulfillmentStatus::FoodProcessing);
        assert_eq!(order.amount, 27.0);
        assert!(!order.payment);
    }

    #[test]
    fn test_per_restaurant_amounts_sum_to_order_total() {
        let order = two_restaurant_order();
        let grouped: f64 = order.restaurant_amounts.values().sum();
        assert!((grouped - order.amount).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: CustomerId(1),
                items: Vec::new(),
                address: address(),
                cod: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: CustomerId(1),
                items: vec![item(1, 10.0, 0, Some(1))],
                address: address(),
                cod: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_blank_address_is_rejected() {
        let err = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: CustomerId(1),
                items: vec![item(1, 10.0, 1, Some(1))],
                address: Address {
                    street: "  ".to_string(),
                    ..address()
                },
                cod: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_restaurant_cannot_report_status() {
        let mut order = two_restaurant_order();
        let err = order
            .handle_action(
                OrderAction::UpdateRestaurantStatus {
                    restaurant_id: RestaurantId(9),
                    status: FulfillmentStatus::Preparing,
                },
                &context(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::PermissionDenied(_)));
        // The rejected update left nothing behind.
        assert_eq!(order.restaurant_status.len(), 2);
        assert_eq!(order.status, FulfillmentStatus::FoodProcessing);
    }

    #[tokio::test]
    async fn test_aggregate_follows_each_report() {
        let mut order = two_restaurant_order();
        let ctx = context();

        let result = order
            .handle_action(
                OrderAction::UpdateRestaurantStatus {
                    restaurant_id: RestaurantId(1),
                    status: FulfillmentStatus::OutForDelivery,
                },
                &ctx,
            )
            .await
            .unwrap();
        // The second restaurant is still cooking, so the order is not done.
        assert_eq!(
            result,
            OrderActionResult::StatusUpdated(FulfillmentStatus::OutForDelivery)
        );

        let result = order
            .handle_action(
                OrderAction::UpdateRestaurantStatus {
                    restaurant_id: RestaurantId(2),
                    status: FulfillmentStatus::OutForDelivery,
                },
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(
            result,
            OrderActionResult::StatusUpdated(FulfillmentStatus::Delivered)
        );
        assert_eq!(order.status, FulfillmentStatus::Delivered);
    }

    #[tokio::test]
    async fn test_record_payment_marks_order_paid() {
        let mut order = two_restaurant_order();
        let result = order
            .handle_action(OrderAction::RecordPayment { paid: true }, &context())
            .await
            .unwrap();
        assert_eq!(result, OrderActionResult::PaymentRecorded);
        assert!(order.payment);
    }

    #[tokio::test]
    async fn test_paid_orders_refuse_deletion() {
        let mut order = two_restaurant_order();
        let ctx = context();
        assert!(order.on_delete(&ctx).await.is_ok());

        order
            .handle_action(OrderAction::RecordPayment { paid: true }, &ctx)
            .await
            .unwrap();
        assert!(order.on_delete(&ctx).await.is_err());
    }

    #[test]
    fn test_filters() {
        let mut order = two_restaurant_order();
        assert!(order.matches(&OrderFilter::All));
        assert!(!order.matches(&OrderFilter::Paid));
        assert!(order.matches(&OrderFilter::ForRestaurant(RestaurantId(2))));
        assert!(!order.matches(&OrderFilter::ForRestaurant(RestaurantId(9))));
        // Customer listings only show paid orders.
        assert!(!order.matches(&OrderFilter::ForCustomer(CustomerId(1))));
        order.payment = true;
        assert!(order.matches(&OrderFilter::ForCustomer(CustomerId(1))));
        assert!(!order.matches(&OrderFilter::ForCustomer(CustomerId(2))));
    }
}
