//! Orders as placed by customers, plus the request and response payloads
//! of the order operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::zone::{DeliveryPlan, DeliveryZone};
use crate::model::{CustomerId, FoodId, FulfillmentStatus, OrderId, RestaurantId};
use crate::notify::OrderNotification;

/// One cart line. `restaurant_id` is absent on carts predating the
/// multi-restaurant checkout, and such lines never join a restaurant group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub food_id: FoodId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub restaurant_id: Option<RestaurantId>,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub district: String,
    pub city: String,
}

/// A placed order with its per-restaurant decomposition and delivery zones.
///
/// The three per-restaurant maps share one key set, which always equals
/// `restaurant_ids`. The maps are populated once at placement and their
/// key set never changes afterwards; only the values in
/// `restaurant_status` move.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<LineItem>,
    /// Total charged to the customer, computed from `items`, never taken
    /// from the request.
    pub amount: f64,
    pub address: Address,
    /// Aggregate status derived from `restaurant_status`.
    pub status: FulfillmentStatus,
    pub payment: bool,
    pub cod: bool,
    pub placed_at: DateTime<Utc>,
    /// Distinct restaurants in the cart, in order of first appearance.
    pub restaurant_ids: Vec<RestaurantId>,
    pub restaurant_status: BTreeMap<RestaurantId, FulfillmentStatus>,
    pub restaurant_amounts: BTreeMap<RestaurantId, f64>,
    pub restaurant_items: BTreeMap<RestaurantId, Vec<LineItem>>,
    pub zones: Vec<DeliveryZone>,
}

impl Order {
    /// Snapshot of the fields the notification channel needs.
    pub fn notification(&self) -> OrderNotification {
        OrderNotification {
            order_id: self.id.clone(),
            customer_name: self.address.name.clone(),
            email: self.address.email.clone(),
            phone: self.address.phone.clone(),
            street: self.address.street.clone(),
            amount: self.amount,
            cod: self.cod,
        }
    }

    /// Summarizes the delivery zones for the zones query.
    pub fn delivery_plan(&self) -> DeliveryPlan {
        let total_recommended_drones = self.zones.iter().map(|z| z.recommended_drones).sum();
        DeliveryPlan {
            order_id: self.id.clone(),
            district_count: self.zones.len(),
            total_recommended_drones,
            zones: self.zones.clone(),
        }
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub items: Vec<LineItem>,
    pub address: Address,
    pub cod: bool,
}

/// No field of an order is editable in place. Every mutation after
/// placement goes through an action, so the update payload is uninhabited.
#[derive(Debug)]
pub enum OrderUpdate {}

/// Listing filters over the order store.
#[derive(Debug, Clone)]
pub enum OrderFilter {
    /// Every order, paid or not.
    All,
    /// Paid orders, the admin listing.
    Paid,
    /// Paid orders of one customer.
    ForCustomer(CustomerId),
    /// Orders a restaurant participates in, paid or not.
    ForRestaurant(RestaurantId),
}

/// Returned to the customer right after placement.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementReceipt {
    pub order_id: OrderId,
    pub amount: f64,
    pub checkout_url: String,
    pub message: String,
}

/// Outcome reported by the payment flow once the customer returns from
/// checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Online payment went through.
    Succeeded,
    /// Customer chose cash on delivery; the order proceeds unpaid.
    CashOnDelivery,
    /// Payment failed or was abandoned.
    Failed,
}

/// Result of payment verification.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentVerification {
    pub confirmed: bool,
    pub message: String,
}
