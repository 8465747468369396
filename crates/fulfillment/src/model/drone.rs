//! Delivery drones and their battery bookkeeping.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{DroneId, HubId, OrderId, RestaurantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Available,
    Delivering,
    Charging,
    Maintenance,
    Offline,
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DroneStatus::Available => "available",
            DroneStatus::Delivering => "delivering",
            DroneStatus::Charging => "charging",
            DroneStatus::Maintenance => "maintenance",
            DroneStatus::Offline => "offline",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub district: String,
}

impl DroneLocation {
    /// Parked at the warehouse, where new drones start out.
    pub fn warehouse() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            address: "Warehouse".to_string(),
            district: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneCapacity {
    pub max_weight_kg: f64,
    pub max_items: u32,
}

impl Default for DroneCapacity {
    fn default() -> Self {
        Self {
            max_weight_kg: 5.0,
            max_items: 10,
        }
    }
}

/// Battery state. The charging fields are only populated while
/// `is_charging` is true; they are cleared together whenever the drone
/// leaves the charging state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    /// Charge percentage, 0 to 100.
    pub level: u8,
    pub is_charging: bool,
    pub charging_started_at: Option<DateTime<Utc>>,
    pub estimated_full_charge_at: Option<DateTime<Utc>>,
    /// Percent regained per minute on the pad.
    pub charging_rate: f64,
}

impl Battery {
    pub fn full(charging_rate: f64) -> Self {
        Self {
            level: 100,
            is_charging: false,
            charging_started_at: None,
            estimated_full_charge_at: None,
            charging_rate,
        }
    }

    /// Minutes until full at the current level and rate, rounded up.
    pub fn minutes_to_full(&self) -> i64 {
        let missing = f64::from(100u8.saturating_sub(self.level));
        (missing / self.charging_rate).ceil() as i64
    }

    /// Starts a charging session and stamps the completion estimate from
    /// the level at the moment charging begins.
    pub fn begin_charging(&mut self, now: DateTime<Utc>) {
        self.is_charging = true;
        self.charging_started_at = Some(now);
        self.estimated_full_charge_at = Some(now + Duration::minutes(self.minutes_to_full()));
    }

    /// Ends any charging session, clearing the flag and both timestamps.
    pub fn stop_charging(&mut self) {
        self.is_charging = false;
        self.charging_started_at = None;
        self.estimated_full_charge_at = None;
    }
}

/// One finished delivery, kept on the drone for its service record.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedDelivery {
    pub order_id: OrderId,
    pub completed_at: DateTime<Utc>,
}

/// A delivery drone.
///
/// `assigned_hub_id` mirrors the owning hub's `assigned_drones` entry and
/// is never written without it. `current_order_id` pins the status to
/// `Delivering` until the delivery completes.
#[derive(Debug, Clone)]
pub struct Drone {
    pub id: DroneId,
    /// Unique airframe code, stored uppercase.
    pub drone_code: String,
    pub status: DroneStatus,
    pub current_location: DroneLocation,
    pub capacity: DroneCapacity,
    /// Restaurant this drone is dedicated to, if any.
    pub assigned_restaurant_id: Option<RestaurantId>,
    pub assigned_hub_id: Option<HubId>,
    pub current_order_id: Option<OrderId>,
    pub battery: Battery,
    pub delivery_history: Vec<CompletedDelivery>,
    pub total_deliveries: u32,
}

impl Drone {
    pub fn new(id: DroneId, params: DroneCreate, charging_rate: f64) -> Self {
        let defaults = DroneCapacity::default();
        Self {
            id,
            drone_code: params.drone_code.trim().to_uppercase(),
            status: DroneStatus::Available,
            current_location: DroneLocation::warehouse(),
            capacity: DroneCapacity {
                max_weight_kg: params.max_weight_kg.unwrap_or(defaults.max_weight_kg),
                max_items: params.max_items.unwrap_or(defaults.max_items),
            },
            assigned_restaurant_id: params.assigned_restaurant_id,
            assigned_hub_id: None,
            current_order_id: None,
            battery: Battery::full(charging_rate),
            delivery_history: Vec::new(),
            total_deliveries: 0,
        }
    }
}

/// Payload for registering a drone. Capacity fields fall back to the
/// airframe defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneCreate {
    pub drone_code: String,
    pub assigned_restaurant_id: Option<RestaurantId>,
    pub max_weight_kg: Option<f64>,
    pub max_items: Option<u32>,
}

/// Administrative partial update; `None` fields keep their current value.
///
/// `assigned_restaurant_id` distinguishes "leave alone" (outer `None`)
/// from "clear the dedication" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct DroneUpdate {
    pub drone_code: Option<String>,
    pub status: Option<DroneStatus>,
    pub battery_level: Option<u8>,
    pub max_weight_kg: Option<f64>,
    pub max_items: Option<u32>,
    pub assigned_restaurant_id: Option<Option<RestaurantId>>,
}

/// Telemetry-style update reported from the field.
#[derive(Debug, Clone, Default)]
pub struct DroneStatusUpdate {
    pub status: Option<DroneStatus>,
    pub battery_level: Option<u8>,
    pub location: Option<DroneLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_full_rounds_up() {
        let mut battery = Battery::full(2.0);
        battery.level = 45;
        // 55 points missing at 2 percent per minute.
        assert_eq!(battery.minutes_to_full(), 28);
    }

    #[test]
    fn test_minutes_to_full_at_extremes() {
        let mut battery = Battery::full(2.0);
        assert_eq!(battery.minutes_to_full(), 0);
        battery.level = 0;
        assert_eq!(battery.minutes_to_full(), 50);
    }

    #[test]
    fn test_begin_charging_stamps_estimate() {
        let mut battery = Battery::full(2.0);
        battery.level = 45;
        let now = Utc::now();
        battery.begin_charging(now);
        assert!(battery.is_charging);
        assert_eq!(battery.charging_started_at, Some(now));
        assert_eq!(
            battery.estimated_full_charge_at,
            Some(now + Duration::minutes(28))
        );
    }

    #[test]
    fn test_stop_charging_clears_all_fields() {
        let mut battery = Battery::full(2.0);
        battery.level = 60;
        battery.begin_charging(Utc::now());
        battery.stop_charging();
        assert!(!battery.is_charging);
        assert_eq!(battery.charging_started_at, None);
        assert_eq!(battery.estimated_full_charge_at, None);
    }

    #[test]
    fn test_new_drone_defaults() {
        let drone = Drone::new(
            DroneId(1),
            DroneCreate {
                drone_code: "dr-01".to_string(),
                assigned_restaurant_id: None,
                max_weight_kg: None,
                max_items: None,
            },
            2.0,
        );
        assert_eq!(drone.drone_code, "DR-01");
        assert_eq!(drone.status, DroneStatus::Available);
        assert_eq!(drone.battery.level, 100);
        assert_eq!(drone.capacity.max_weight_kg, 5.0);
        assert_eq!(drone.capacity.max_items, 10);
        assert_eq!(drone.current_location.address, "Warehouse");
    }
}
