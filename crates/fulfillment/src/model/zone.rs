//! Delivery zones: one per district touched by an order.

use serde::{Deserialize, Serialize};

use crate::model::order::LineItem;
use crate::model::{HubId, OrderId, RestaurantId};

/// District whose restaurants could not be located in the district index.
pub const UNKNOWN_DISTRICT: &str = "Unknown";

/// Hub resolution result for a zone. A zone without a hub is a normal
/// outcome, not an error, and the reason is kept so operators can tell a
/// coverage gap from an outage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HubAssignment {
    Resolved(HubId),
    Unresolved(UnresolvedReason),
}

impl HubAssignment {
    pub fn hub_id(&self) -> Option<&HubId> {
        match self {
            HubAssignment::Resolved(id) => Some(id),
            HubAssignment::Unresolved(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// No active hub serves the zone's district.
    NoActiveHub,
    /// The hub registry did not answer in time.
    RegistryUnavailable,
}

/// All restaurants of an order that sit in the same district, with the
/// hub and drone plan for flying their food out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub district: String,
    pub restaurant_ids: Vec<RestaurantId>,
    pub items: Vec<LineItem>,
    pub amount: f64,
    pub hub: HubAssignment,
    pub estimated_weight_kg: f64,
    pub recommended_drones: u32,
}

/// Response of the delivery-zones query.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPlan {
    pub order_id: OrderId,
    pub zones: Vec<DeliveryZone>,
    pub district_count: usize,
    pub total_recommended_drones: u32,
}
