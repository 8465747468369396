//! Client for the fleet actor.

use tokio::sync::mpsc;

use crate::fleet::{FleetError, FleetRequest};
use crate::fleet_request;
use crate::model::drone::{Drone, DroneCreate, DroneStatusUpdate, DroneUpdate};
use crate::model::hub::{Hub, HubCreate, HubStats, HubUpdate};
use crate::model::{DroneId, HubId, OrderId, RestaurantId};

/// Handle for talking to the [`FleetActor`](crate::fleet::FleetActor).
///
/// Every method is a single request/reply round trip; the actor applies
/// each one atomically, so callers never see a hub and its drones
/// mid-write.
#[derive(Clone)]
pub struct FleetClient {
    sender: mpsc::Sender<FleetRequest>,
}

impl FleetClient {
    pub fn new(sender: mpsc::Sender<FleetRequest>) -> Self {
        Self { sender }
    }
}

fleet_request!(
    /// Registers a hub. The code must be unique across the fleet.
    fn add_hub(params: HubCreate) -> Hub
);
fleet_request!(fn get_hub(id: HubId) -> Option<Hub>);
fleet_request!(fn list_hubs() -> Vec<Hub>);
fleet_request!(fn update_hub(id: HubId, update: HubUpdate) -> Hub);
fleet_request!(
    /// Removes a hub. Rejected while the hub still owns drones or queued
    /// orders.
    fn remove_hub(id: HubId) -> ()
);
fleet_request!(fn hub_stats() -> HubStats);
fleet_request!(
    /// Active hubs serving a district, least loaded first.
    fn active_hubs_in_district(district: String) -> Vec<Hub>
);
fleet_request!(
    /// Adds a drone to a hub, writing both sides of the association.
    fn assign_drone(hub_id: HubId, drone_id: DroneId) -> ()
);
fleet_request!(fn unassign_drone(hub_id: HubId, drone_id: DroneId) -> ());
fleet_request!(
    /// Stages an order at a hub until a drone picks it up.
    fn enqueue_order(hub_id: HubId, order_id: OrderId, restaurant_ids: Vec<RestaurantId>) -> ()
);
fleet_request!(fn mark_order_dispatched(hub_id: HubId, order_id: OrderId) -> ());
fleet_request!(
    /// Registers a drone. The code must be unique across the fleet.
    fn add_drone(params: DroneCreate) -> Drone
);
fleet_request!(fn get_drone(id: DroneId) -> Option<Drone>);
fleet_request!(fn list_drones() -> Vec<Drone>);
fleet_request!(fn update_drone(id: DroneId, update: DroneUpdate) -> Drone);
fleet_request!(
    /// Removes a drone. Rejected while it carries an order; its hub entry
    /// is dropped along with it.
    fn remove_drone(id: DroneId) -> ()
);
fleet_request!(
    /// Applies field telemetry: status transitions, battery level, and
    /// position. A transition into charging stamps the full-charge
    /// estimate; one back to available clears it.
    fn update_drone_status(id: DroneId, update: DroneStatusUpdate) -> Drone
);
fleet_request!(
    /// Drones ready to fly: available, batteries above the dispatch
    /// floor, and either shared or dedicated to the given restaurant.
    fn available_drones(restaurant: Option<RestaurantId>) -> Vec<Drone>
);
fleet_request!(fn drones_for_restaurant(restaurant: RestaurantId) -> Vec<Drone>);
fleet_request!(
    /// Binds an available drone to an order and puts it in the air.
    fn dispatch_drone(drone_id: DroneId, order_id: OrderId) -> Drone
);
fleet_request!(
    /// Releases the drone from its order, logging the delivery.
    fn complete_delivery(drone_id: DroneId) -> Drone
);
