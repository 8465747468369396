//! Delivery hubs: fixed stations that host drones and stage outbound orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{DroneId, HubId, OrderId, RestaurantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubStatus {
    Active,
    Inactive,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubLocation {
    pub address: String,
    pub district: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubCapacity {
    pub max_drones: usize,
    pub max_orders: usize,
}

impl Default for HubCapacity {
    fn default() -> Self {
        Self {
            max_drones: 20,
            max_orders: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            open: "06:00".to_string(),
            close: "23:00".to_string(),
        }
    }
}

/// District the hub covers and how far out from it drones will fly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageZone {
    pub district: String,
    pub max_distance_km: f64,
}

/// An order staged at a hub, waiting for a drone.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub order_id: OrderId,
    pub restaurant_ids: Vec<RestaurantId>,
    pub arrived_at: DateTime<Utc>,
}

/// A drone hub.
///
/// `assigned_drones` is the owning side of the hub and drone association.
/// Each listed drone carries the matching `assigned_hub_id` back-reference,
/// and both sides are written together by the fleet actor.
#[derive(Debug, Clone)]
pub struct Hub {
    pub id: HubId,
    /// Unique station code, stored uppercase.
    pub hub_code: String,
    pub name: String,
    pub location: HubLocation,
    pub status: HubStatus,
    pub capacity: HubCapacity,
    pub assigned_drones: Vec<DroneId>,
    pub pending_orders: Vec<PendingOrder>,
    pub operating_hours: OperatingHours,
    pub coverage_area: Vec<CoverageZone>,
}

impl Hub {
    pub fn new(id: HubId, params: HubCreate) -> Self {
        Self {
            id,
            hub_code: params.hub_code.trim().to_uppercase(),
            name: params.name,
            location: params.location,
            status: HubStatus::Active,
            capacity: params.capacity.unwrap_or_default(),
            assigned_drones: Vec::new(),
            pending_orders: Vec::new(),
            operating_hours: params.operating_hours.unwrap_or_default(),
            coverage_area: params.coverage_area,
        }
    }

    pub fn at_drone_capacity(&self) -> bool {
        self.assigned_drones.len() >= self.capacity.max_drones
    }

    pub fn at_order_capacity(&self) -> bool {
        self.pending_orders.len() >= self.capacity.max_orders
    }
}

/// Payload for registering a hub. Omitted capacity and hours fall back to
/// the fleet defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubCreate {
    pub hub_code: String,
    pub name: String,
    pub location: HubLocation,
    pub capacity: Option<HubCapacity>,
    pub operating_hours: Option<OperatingHours>,
    pub coverage_area: Vec<CoverageZone>,
}

/// Partial update of a hub; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct HubUpdate {
    pub hub_code: Option<String>,
    pub name: Option<String>,
    pub location: Option<HubLocation>,
    pub status: Option<HubStatus>,
    pub capacity: Option<HubCapacity>,
    pub operating_hours: Option<OperatingHours>,
}

/// Fleet-wide hub counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HubStats {
    pub total_hubs: usize,
    pub active_hubs: usize,
    pub inactive_hubs: usize,
    pub maintenance_hubs: usize,
    pub total_assigned_drones: usize,
    pub total_pending_orders: usize,
}
