//! Groups a cart breakdown into per-district delivery zones.

use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::directory::DistrictIndex;
use crate::model::order::LineItem;
use crate::model::zone::UNKNOWN_DISTRICT;
use crate::model::RestaurantId;
use crate::planner::decompose::CartBreakdown;

/// A zone before hub resolution and fleet sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDraft {
    pub district: String,
    pub restaurant_ids: Vec<RestaurantId>,
    pub items: Vec<LineItem>,
    pub amount: f64,
}

/// Buckets the breakdown's restaurants by district.
///
/// Zones come out in order of first appearance. A restaurant the index
/// does not know lands in the shared unknown-district zone. If the index
/// errors or a lookup exceeds `lookup_timeout`, zone building degrades to
/// an empty list so placement can continue without it.
pub async fn build_zones(
    breakdown: &CartBreakdown,
    directory: &dyn DistrictIndex,
    lookup_timeout: Duration,
) -> Vec<ZoneDraft> {
    let mut zones: Vec<ZoneDraft> = Vec::new();

    for restaurant_id in &breakdown.restaurant_ids {
        let lookup = timeout(lookup_timeout, directory.district_of(restaurant_id)).await;
        let district = match lookup {
            Ok(Ok(Some(district))) => district,
            Ok(Ok(None)) => UNKNOWN_DISTRICT.to_string(),
            Ok(Err(e)) => {
                warn!(%restaurant_id, error = %e, "District index unreachable, placing order without zones");
                return Vec::new();
            }
            Err(_) => {
                warn!(%restaurant_id, "District lookup timed out, placing order without zones");
                return Vec::new();
            }
        };

        let index = zones
            .iter()
            .position(|zone| zone.district == district)
            .unwrap_or_else(|| {
                zones.push(ZoneDraft {
                    district,
                    restaurant_ids: Vec::new(),
                    items: Vec::new(),
                    amount: 0.0,
                });
                zones.len() - 1
            });

        let zone = &mut zones[index];
        zone.restaurant_ids.push(restaurant_id.clone());
        zone.amount += breakdown.amounts.get(restaurant_id).copied().unwrap_or_default();
        zone.items
            .extend(breakdown.items.get(restaurant_id).cloned().unwrap_or_default());
    }

    zones
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::directory::{DirectoryError, InMemoryDirectory};
    use crate::model::FoodId;
    use crate::planner::decompose::decompose;

    struct DownIndex;

    #[async_trait]
    impl DistrictIndex for DownIndex {
        async fn district_of(
            &self,
            _restaurant: &RestaurantId,
        ) -> Result<Option<String>, DirectoryError> {
            Err(DirectoryError::Unavailable("connection refused".to_string()))
        }
    }

    struct StuckIndex;

    #[async_trait]
    impl DistrictIndex for StuckIndex {
        async fn district_of(
            &self,
            _restaurant: &RestaurantId,
        ) -> Result<Option<String>, DirectoryError> {
            std::future::pending().await
        }
    }

    fn item(food: u32, price: f64, quantity: u32, restaurant: u32) -> LineItem {
        LineItem {
            food_id: FoodId(food),
            name: format!("dish {food}"),
            price,
            quantity,
            restaurant_id: Some(RestaurantId(restaurant)),
        }
    }

    #[tokio::test]
    async fn test_restaurants_bucket_by_district() {
        let directory = InMemoryDirectory::new();
        directory.insert(RestaurantId(1), "District 1").await;
        directory.insert(RestaurantId(2), "District 3").await;
        directory.insert(RestaurantId(3), "District 1").await;

        let breakdown = decompose(&[
            item(1, 10.0, 1, 1),
            item(2, 6.0, 2, 2),
            item(3, 4.0, 1, 3),
        ]);
        let zones = build_zones(&breakdown, &directory, Duration::from_millis(100)).await;

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].district, "District 1");
        assert_eq!(
            zones[0].restaurant_ids,
            vec![RestaurantId(1), RestaurantId(3)]
        );
        assert_eq!(zones[0].amount, 14.0);
        assert_eq!(zones[1].district, "District 3");
        assert_eq!(zones[1].amount, 12.0);
    }

    #[tokio::test]
    async fn test_unlisted_restaurant_joins_unknown_zone() {
        let directory = InMemoryDirectory::new();
        directory.insert(RestaurantId(1), "District 7").await;

        let breakdown = decompose(&[item(1, 5.0, 1, 1), item(2, 5.0, 1, 9)]);
        let zones = build_zones(&breakdown, &directory, Duration::from_millis(100)).await;

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[1].district, UNKNOWN_DISTRICT);
        assert_eq!(zones[1].restaurant_ids, vec![RestaurantId(9)]);
    }

    #[tokio::test]
    async fn test_index_failure_degrades_to_no_zones() {
        let breakdown = decompose(&[item(1, 5.0, 1, 1)]);
        let zones = build_zones(&breakdown, &DownIndex, Duration::from_millis(100)).await;
        assert!(zones.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_timeout_degrades_to_no_zones() {
        let breakdown = decompose(&[item(1, 5.0, 1, 1)]);
        let zones = build_zones(&breakdown, &StuckIndex, Duration::from_millis(10)).await;
        assert!(zones.is_empty());
    }
}
