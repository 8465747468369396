//! Splits a mixed cart into per-restaurant groups.

use std::collections::BTreeMap;

use crate::model::order::LineItem;
use crate::model::RestaurantId;

/// Per-restaurant view of a cart.
///
/// The key sets of `amounts` and `items` always equal `restaurant_ids`.
/// Lines without a restaurant id contribute to the order total but to no
/// group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartBreakdown {
    /// Distinct restaurants in order of first appearance in the cart.
    pub restaurant_ids: Vec<RestaurantId>,
    pub amounts: BTreeMap<RestaurantId, f64>,
    pub items: BTreeMap<RestaurantId, Vec<LineItem>>,
}

/// Groups the cart by restaurant, preserving first-appearance order.
pub fn decompose(items: &[LineItem]) -> CartBreakdown {
    let mut breakdown = CartBreakdown::default();
    for item in items {
        let Some(restaurant_id) = &item.restaurant_id else {
            continue;
        };
        if !breakdown.restaurant_ids.contains(restaurant_id) {
            breakdown.restaurant_ids.push(restaurant_id.clone());
        }
        *breakdown.amounts.entry(restaurant_id.clone()).or_insert(0.0) += item.subtotal();
        breakdown
            .items
            .entry(restaurant_id.clone())
            .or_default()
            .push(item.clone());
    }
    breakdown
}

/// Total charged for the cart, over every line including untagged ones.
pub fn cart_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FoodId;

    fn item(food: u32, price: f64, quantity: u32, restaurant: Option<u32>) -> LineItem {
        LineItem {
            food_id: FoodId(food),
            name: format!("dish {food}"),
            price,
            quantity,
            restaurant_id: restaurant.map(RestaurantId),
        }
    }

    #[test]
    fn test_groups_share_one_key_set() {
        let cart = vec![
            item(1, 10.0, 2, Some(1)),
            item(2, 4.0, 1, Some(2)),
            item(3, 3.0, 3, Some(1)),
        ];
        let breakdown = decompose(&cart);

        assert_eq!(breakdown.restaurant_ids, vec![RestaurantId(1), RestaurantId(2)]);
        let keys: Vec<_> = breakdown.amounts.keys().cloned().collect();
        assert_eq!(keys, {
            let mut sorted = breakdown.restaurant_ids.clone();
            sorted.sort();
            sorted
        });
        assert_eq!(
            breakdown.amounts.keys().collect::<Vec<_>>(),
            breakdown.items.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_amounts_sum_to_cart_total() {
        let cart = vec![
            item(1, 12.5, 2, Some(1)),
            item(2, 7.0, 1, Some(2)),
            item(3, 2.5, 4, Some(2)),
        ];
        let breakdown = decompose(&cart);

        let grouped: f64 = breakdown.amounts.values().sum();
        assert!((grouped - cart_total(&cart)).abs() < 1e-9);
        assert_eq!(breakdown.amounts[&RestaurantId(1)], 25.0);
        assert_eq!(breakdown.amounts[&RestaurantId(2)], 17.0);
    }

    #[test]
    fn test_untagged_lines_count_toward_total_only() {
        let cart = vec![item(1, 10.0, 1, Some(1)), item(2, 5.0, 2, None)];
        let breakdown = decompose(&cart);

        assert_eq!(breakdown.restaurant_ids, vec![RestaurantId(1)]);
        assert_eq!(breakdown.amounts[&RestaurantId(1)], 10.0);
        assert_eq!(cart_total(&cart), 20.0);
    }

    #[test]
    fn test_fully_untagged_cart_is_a_degenerate_breakdown() {
        let cart = vec![item(1, 8.0, 1, None)];
        let breakdown = decompose(&cart);

        assert!(breakdown.restaurant_ids.is_empty());
        assert!(breakdown.amounts.is_empty());
        assert!(breakdown.items.is_empty());
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(decompose(&[]), CartBreakdown::default());
        assert_eq!(cart_total(&[]), 0.0);
    }
}
