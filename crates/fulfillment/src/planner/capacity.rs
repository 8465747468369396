//! Drone count estimation for a zone's payload.

use crate::config::FulfillmentConfig;
use crate::model::order::LineItem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityPlan {
    pub estimated_weight_kg: f64,
    pub recommended_drones: u32,
}

/// Sizes the drone fleet for one zone.
///
/// Weight is estimated per item unit rather than per dish, so a line with
/// quantity 3 weighs three units. The recommendation is the larger of the
/// weight-bound and count-bound fleet sizes, and never zero: a zone with
/// any payload still needs a drone to fly it.
pub fn plan(items: &[LineItem], config: &FulfillmentConfig) -> CapacityPlan {
    let units: u32 = items.iter().map(|item| item.quantity).sum();
    let estimated_weight_kg = f64::from(units) * config.item_unit_weight_kg;

    let by_weight = (estimated_weight_kg / config.drone_max_weight_kg).ceil() as u32;
    let by_count = units.div_ceil(config.drone_max_items);

    CapacityPlan {
        estimated_weight_kg,
        recommended_drones: by_weight.max(by_count).max(1),
    }
}
