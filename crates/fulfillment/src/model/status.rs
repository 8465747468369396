//! Per-restaurant fulfillment states and the aggregate derivation policy.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::RestaurantId;

/// Preparation state of one restaurant's share of an order, and the
/// aggregate state of the order as a whole.
///
/// Variants are ordered by progress. The customer-facing labels are the
/// `Display` strings, not the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FulfillmentStatus {
    #[serde(rename = "Food Processing")]
    FoodProcessing,
    #[serde(rename = "Preparing")]
    Preparing,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FulfillmentStatus::FoodProcessing => "Food Processing",
            FulfillmentStatus::Preparing => "Preparing",
            FulfillmentStatus::ReadyForPickup => "Ready for Pickup",
            FulfillmentStatus::OutForDelivery => "Out for Delivery",
            FulfillmentStatus::Delivered => "Delivered",
        };
        write!(f, "{label}")
    }
}

impl FulfillmentStatus {
    /// Derives the aggregate order status from the per-restaurant map.
    ///
    /// Rules apply in order, first match wins:
    ///
    /// 1. every restaurant is `Delivered` or `Out for Delivery` -> `Delivered`
    /// 2. any restaurant is `Out for Delivery` -> `Out for Delivery`
    /// 3. any restaurant is `Ready for Pickup` -> `Ready for Pickup`
    /// 4. any restaurant is `Preparing` -> `Preparing`
    /// 5. otherwise -> `Food Processing`
    ///
    /// Rule 1 deliberately treats a tail of `Out for Delivery` restaurants
    /// as done once no restaurant is still cooking. Rule 2 only fires when
    /// rule 1 did not, so a single `Preparing` restaurant holds the whole
    /// order at `Out for Delivery`.
    ///
    /// An empty map derives `Food Processing`. The derivation is pure, so
    /// running it twice over the same map yields the same answer.
    pub fn aggregate(per_restaurant: &BTreeMap<RestaurantId, FulfillmentStatus>) -> Self {
        use FulfillmentStatus::*;

        let statuses = || per_restaurant.values();
        if !per_restaurant.is_empty() && statuses().all(|s| matches!(s, Delivered | OutForDelivery))
        {
            Delivered
        } else if statuses().any(|s| *s == OutForDelivery) {
            OutForDelivery
        } else if statuses().any(|s| *s == ReadyForPickup) {
            ReadyForPickup
        } else if statuses().any(|s| *s == Preparing) {
            Preparing
        } else {
            FoodProcessing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FulfillmentStatus::{self, *};
    use super::*;

    fn per_restaurant(entries: &[(u32, FulfillmentStatus)]) -> BTreeMap<RestaurantId, FulfillmentStatus> {
        entries
            .iter()
            .map(|(id, status)| (RestaurantId(*id), *status))
            .collect()
    }

    #[test]
    fn test_all_delivered_is_delivered() {
        let map = per_restaurant(&[(1, Delivered), (2, Delivered)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), Delivered);
    }

    #[test]
    fn test_out_for_delivery_tail_counts_as_delivered() {
        let map = per_restaurant(&[(1, Delivered), (2, OutForDelivery)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), Delivered);
    }

    #[test]
    fn test_all_out_for_delivery_is_delivered() {
        let map = per_restaurant(&[(1, OutForDelivery), (2, OutForDelivery)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), Delivered);
    }

    #[test]
    fn test_one_out_for_delivery_with_one_preparing() {
        // Rule 2 fires only after rule 1 fails: the Preparing restaurant
        // keeps the order at Out for Delivery, not Delivered.
        let map = per_restaurant(&[(1, OutForDelivery), (2, Preparing)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), OutForDelivery);
    }

    #[test]
    fn test_ready_for_pickup_beats_preparing() {
        let map = per_restaurant(&[(1, ReadyForPickup), (2, Preparing), (3, FoodProcessing)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), ReadyForPickup);
    }

    #[test]
    fn test_any_preparing() {
        let map = per_restaurant(&[(1, Preparing), (2, FoodProcessing)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), Preparing);
    }

    #[test]
    fn test_all_food_processing() {
        let map = per_restaurant(&[(1, FoodProcessing), (2, FoodProcessing)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), FoodProcessing);
    }

    #[test]
    fn test_lone_delivered_among_food_processing_stays_food_processing() {
        // Delivered alone matches no rule before the fallback.
        let map = per_restaurant(&[(1, Delivered), (2, FoodProcessing)]);
        assert_eq!(FulfillmentStatus::aggregate(&map), FoodProcessing);
    }

    #[test]
    fn test_empty_map_is_food_processing() {
        let map = per_restaurant(&[]);
        assert_eq!(FulfillmentStatus::aggregate(&map), FoodProcessing);
    }

    #[test]
    fn test_aggregate_is_idempotent_over_unchanged_map() {
        let map = per_restaurant(&[(1, OutForDelivery), (2, ReadyForPickup)]);
        let first = FulfillmentStatus::aggregate(&map);
        let second = FulfillmentStatus::aggregate(&map);
        assert_eq!(first, second);
        assert_eq!(first, OutForDelivery);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FoodProcessing.to_string(), "Food Processing");
        assert_eq!(ReadyForPickup.to_string(), "Ready for Pickup");
        assert_eq!(OutForDelivery.to_string(), "Out for Delivery");
    }
}
