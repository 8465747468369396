//! The fleet actor: hubs and drones under one roof.
//!
//! Hubs own the `assigned_drones` list and each drone carries an
//! `assigned_hub_id` back-reference. Because a single actor owns both
//! stores and processes requests sequentially, an assignment writes both
//! sides in one message and no interleaving can ever observe half an
//! association, with no locks involved.

mod error;
mod messages;

pub use error::FleetError;
pub use messages::{FleetRequest, FleetResponse};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::FleetClient;
use crate::config::FulfillmentConfig;
use crate::model::drone::{
    CompletedDelivery, Drone, DroneCreate, DroneStatus, DroneStatusUpdate, DroneUpdate,
};
use crate::model::hub::{Hub, HubCreate, HubStats, HubStatus, HubUpdate, PendingOrder};
use crate::model::{DroneId, HubId, OrderId, RestaurantId};

pub struct FleetActor {
    receiver: mpsc::Receiver<FleetRequest>,
    hubs: BTreeMap<HubId, Hub>,
    drones: BTreeMap<DroneId, Drone>,
    next_hub_id: u32,
    next_drone_id: u32,
    config: Arc<FulfillmentConfig>,
}

impl FleetActor {
    pub fn new(buffer_size: usize, config: Arc<FulfillmentConfig>) -> (Self, FleetClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            hubs: BTreeMap::new(),
            drones: BTreeMap::new(),
            next_hub_id: 1,
            next_drone_id: 1,
            config,
        };
        let client = FleetClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    #[instrument(name = "fleet", skip(self))]
    pub async fn run(mut self) {
        info!("Fleet actor started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                FleetRequest::AddHub { params, respond_to } => {
                    debug!(?params, "AddHub");
                    Self::reply(respond_to, self.add_hub(params));
                }
                FleetRequest::GetHub { id, respond_to } => {
                    debug!(%id, "GetHub");
                    Self::reply(respond_to, Ok(self.hubs.get(&id).cloned()));
                }
                FleetRequest::ListHubs { respond_to } => {
                    debug!("ListHubs");
                    Self::reply(respond_to, Ok(self.hubs.values().cloned().collect()));
                }
                FleetRequest::UpdateHub {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(%id, ?update, "UpdateHub");
                    Self::reply(respond_to, self.update_hub(&id, update));
                }
                FleetRequest::RemoveHub { id, respond_to } => {
                    debug!(%id, "RemoveHub");
                    Self::reply(respond_to, self.remove_hub(&id));
                }
                FleetRequest::HubStats { respond_to } => {
                    debug!("HubStats");
                    Self::reply(respond_to, Ok(self.hub_stats()));
                }
                FleetRequest::ActiveHubsInDistrict {
                    district,
                    respond_to,
                } => {
                    debug!(district, "ActiveHubsInDistrict");
                    Self::reply(respond_to, Ok(self.active_hubs_in_district(&district)));
                }
                FleetRequest::AssignDrone {
                    hub_id,
                    drone_id,
                    respond_to,
                } => {
                    debug!(%hub_id, %drone_id, "AssignDrone");
                    Self::reply(respond_to, self.assign_drone(&hub_id, &drone_id));
                }
                FleetRequest::UnassignDrone {
                    hub_id,
                    drone_id,
                    respond_to,
                } => {
                    debug!(%hub_id, %drone_id, "UnassignDrone");
                    Self::reply(respond_to, self.unassign_drone(&hub_id, &drone_id));
                }
                FleetRequest::EnqueueOrder {
                    hub_id,
                    order_id,
                    restaurant_ids,
                    respond_to,
                } => {
                    debug!(%hub_id, %order_id, "EnqueueOrder");
                    Self::reply(respond_to, self.enqueue_order(&hub_id, order_id, restaurant_ids));
                }
                FleetRequest::MarkOrderDispatched {
                    hub_id,
                    order_id,
                    respond_to,
                } => {
                    debug!(%hub_id, %order_id, "MarkOrderDispatched");
                    Self::reply(respond_to, self.mark_order_dispatched(&hub_id, &order_id));
                }
                FleetRequest::AddDrone { params, respond_to } => {
                    debug!(?params, "AddDrone");
                    Self::reply(respond_to, self.add_drone(params));
                }
                FleetRequest::GetDrone { id, respond_to } => {
                    debug!(%id, "GetDrone");
                    Self::reply(respond_to, Ok(self.drones.get(&id).cloned()));
                }
                FleetRequest::ListDrones { respond_to } => {
                    debug!("ListDrones");
                    Self::reply(respond_to, Ok(self.drones.values().cloned().collect()));
                }
                FleetRequest::UpdateDrone {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(%id, ?update, "UpdateDrone");
                    Self::reply(respond_to, self.update_drone(&id, update));
                }
                FleetRequest::RemoveDrone { id, respond_to } => {
                    debug!(%id, "RemoveDrone");
                    Self::reply(respond_to, self.remove_drone(&id));
                }
                FleetRequest::UpdateDroneStatus {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(%id, ?update, "UpdateDroneStatus");
                    Self::reply(respond_to, self.update_drone_status(&id, update));
                }
                FleetRequest::AvailableDrones {
                    restaurant,
                    respond_to,
                } => {
                    debug!(?restaurant, "AvailableDrones");
                    Self::reply(respond_to, Ok(self.available_drones(restaurant.as_ref())));
                }
                FleetRequest::DronesForRestaurant {
                    restaurant,
                    respond_to,
                } => {
                    debug!(%restaurant, "DronesForRestaurant");
                    Self::reply(respond_to, Ok(self.drones_for_restaurant(&restaurant)));
                }
                FleetRequest::DispatchDrone {
                    drone_id,
                    order_id,
                    respond_to,
                } => {
                    debug!(%drone_id, %order_id, "DispatchDrone");
                    Self::reply(respond_to, self.dispatch_drone(&drone_id, order_id));
                }
                FleetRequest::CompleteDelivery {
                    drone_id,
                    respond_to,
                } => {
                    debug!(%drone_id, "CompleteDelivery");
                    Self::reply(respond_to, self.complete_delivery(&drone_id));
                }
            }
        }
        info!(
            hubs = self.hubs.len(),
            drones = self.drones.len(),
            "Fleet actor stopped"
        );
    }

    fn reply<T>(respond_to: FleetResponse<T>, result: Result<T, FleetError>) {
        if let Err(e) = &result {
            warn!(error = %e, "Request rejected");
        }
        let _ = respond_to.send(result);
    }

    // --- Hubs ---

    fn add_hub(&mut self, params: HubCreate) -> Result<Hub, FleetError> {
        let code = params.hub_code.trim().to_uppercase();
        if code.is_empty() || params.name.trim().is_empty() {
            return Err(FleetError::Validation(
                "Hub code and name are required".to_string(),
            ));
        }
        if params.location.address.trim().is_empty() || params.location.district.trim().is_empty()
        {
            return Err(FleetError::Validation(
                "Hub location requires an address and a district".to_string(),
            ));
        }
        if self.hubs.values().any(|hub| hub.hub_code == code) {
            return Err(FleetError::Validation(format!(
                "Hub with code {code} already exists"
            )));
        }

        let id = HubId::from(self.next_hub_id);
        self.next_hub_id += 1;
        let hub = Hub::new(id.clone(), params);
        self.hubs.insert(id.clone(), hub.clone());
        info!(%id, code = %hub.hub_code, district = %hub.location.district, "Hub registered");
        Ok(hub)
    }

    fn update_hub(&mut self, id: &HubId, update: HubUpdate) -> Result<Hub, FleetError> {
        if let Some(code) = &update.hub_code {
            let code = code.trim().to_uppercase();
            if self
                .hubs
                .values()
                .any(|hub| hub.id != *id && hub.hub_code == code)
            {
                return Err(FleetError::Validation(format!(
                    "Hub with code {code} already exists"
                )));
            }
        }
        let Some(hub) = self.hubs.get_mut(id) else {
            return Err(FleetError::HubNotFound(id.to_string()));
        };

        if let Some(code) = update.hub_code {
            hub.hub_code = code.trim().to_uppercase();
        }
        if let Some(name) = update.name {
            hub.name = name;
        }
        if let Some(location) = update.location {
            hub.location = location;
        }
        if let Some(status) = update.status {
            hub.status = status;
        }
        if let Some(capacity) = update.capacity {
            hub.capacity = capacity;
        }
        if let Some(hours) = update.operating_hours {
            hub.operating_hours = hours;
        }
        info!(%id, "Hub updated");
        Ok(hub.clone())
    }

    fn remove_hub(&mut self, id: &HubId) -> Result<(), FleetError> {
        let Some(hub) = self.hubs.get(id) else {
            return Err(FleetError::HubNotFound(id.to_string()));
        };
        if !hub.assigned_drones.is_empty() {
            return Err(FleetError::RemovalBlocked(
                "Cannot delete hub with assigned drones, unassign them first".to_string(),
            ));
        }
        if !hub.pending_orders.is_empty() {
            return Err(FleetError::RemovalBlocked(
                "Cannot delete hub with pending orders, clear the queue first".to_string(),
            ));
        }
        self.hubs.remove(id);
        info!(%id, remaining = self.hubs.len(), "Hub removed");
        Ok(())
    }

    fn hub_stats(&self) -> HubStats {
        let mut stats = HubStats {
            total_hubs: self.hubs.len(),
            ..HubStats::default()
        };
        for hub in self.hubs.values() {
            match hub.status {
                HubStatus::Active => stats.active_hubs += 1,
                HubStatus::Inactive => stats.inactive_hubs += 1,
                HubStatus::Maintenance => stats.maintenance_hubs += 1,
            }
            stats.total_assigned_drones += hub.assigned_drones.len();
            stats.total_pending_orders += hub.pending_orders.len();
        }
        stats
    }

    /// Active hubs in a district, least loaded first. Ties keep ascending
    /// id order, so the result is deterministic for equal drone counts.
    fn active_hubs_in_district(&self, district: &str) -> Vec<Hub> {
        let mut hubs: Vec<Hub> = self
            .hubs
            .values()
            .filter(|hub| hub.status == HubStatus::Active && hub.location.district == district)
            .cloned()
            .collect();
        hubs.sort_by_key(|hub| hub.assigned_drones.len());
        hubs
    }

    // --- Association ---

    fn assign_drone(&mut self, hub_id: &HubId, drone_id: &DroneId) -> Result<(), FleetError> {
        let Some(hub) = self.hubs.get_mut(hub_id) else {
            return Err(FleetError::HubNotFound(hub_id.to_string()));
        };
        let Some(drone) = self.drones.get_mut(drone_id) else {
            return Err(FleetError::DroneNotFound(drone_id.to_string()));
        };
        if hub.at_drone_capacity() {
            return Err(FleetError::CapacityExceeded(format!(
                "Hub has reached maximum capacity ({} drones)",
                hub.capacity.max_drones
            )));
        }
        if hub.assigned_drones.contains(drone_id) {
            return Err(FleetError::AssignmentConflict(
                "Drone already assigned to this hub".to_string(),
            ));
        }
        if drone.assigned_hub_id.as_ref().is_some_and(|h| h != hub_id) {
            return Err(FleetError::AssignmentConflict(
                "Drone is already assigned to another hub, unassign it first".to_string(),
            ));
        }

        hub.assigned_drones.push(drone_id.clone());
        drone.assigned_hub_id = Some(hub_id.clone());
        info!(%hub_id, %drone_id, assigned = hub.assigned_drones.len(), "Drone assigned");
        Ok(())
    }

    fn unassign_drone(&mut self, hub_id: &HubId, drone_id: &DroneId) -> Result<(), FleetError> {
        let Some(hub) = self.hubs.get_mut(hub_id) else {
            return Err(FleetError::HubNotFound(hub_id.to_string()));
        };
        hub.assigned_drones.retain(|id| id != drone_id);
        if let Some(drone) = self.drones.get_mut(drone_id) {
            if drone.assigned_hub_id.as_ref() == Some(hub_id) {
                drone.assigned_hub_id = None;
            }
        }
        info!(%hub_id, %drone_id, assigned = hub.assigned_drones.len(), "Drone unassigned");
        Ok(())
    }

    fn enqueue_order(
        &mut self,
        hub_id: &HubId,
        order_id: OrderId,
        restaurant_ids: Vec<RestaurantId>,
    ) -> Result<(), FleetError> {
        let Some(hub) = self.hubs.get_mut(hub_id) else {
            return Err(FleetError::HubNotFound(hub_id.to_string()));
        };
        if hub.at_order_capacity() {
            return Err(FleetError::CapacityExceeded(format!(
                "Hub has reached maximum pending orders ({})",
                hub.capacity.max_orders
            )));
        }
        hub.pending_orders.push(PendingOrder {
            order_id: order_id.clone(),
            restaurant_ids,
            arrived_at: Utc::now(),
        });
        info!(%hub_id, %order_id, pending = hub.pending_orders.len(), "Order queued");
        Ok(())
    }

    fn mark_order_dispatched(&mut self, hub_id: &HubId, order_id: &OrderId) -> Result<(), FleetError> {
        let Some(hub) = self.hubs.get_mut(hub_id) else {
            return Err(FleetError::HubNotFound(hub_id.to_string()));
        };
        match hub
            .pending_orders
            .iter()
            .position(|pending| pending.order_id == *order_id)
        {
            Some(index) => {
                hub.pending_orders.remove(index);
                info!(%hub_id, %order_id, pending = hub.pending_orders.len(), "Order dispatched");
                Ok(())
            }
            None => Err(FleetError::Validation(format!(
                "{order_id} is not queued at this hub"
            ))),
        }
    }

    // --- Drones ---

    fn add_drone(&mut self, params: DroneCreate) -> Result<Drone, FleetError> {
        let code = params.drone_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(FleetError::Validation("Drone code is required".to_string()));
        }
        if params.max_weight_kg.is_some_and(|w| w <= 0.0)
            || params.max_items.is_some_and(|n| n == 0)
        {
            return Err(FleetError::Validation(
                "Drone capacity must be positive".to_string(),
            ));
        }
        if self.drones.values().any(|drone| drone.drone_code == code) {
            return Err(FleetError::Validation(format!(
                "Drone with code {code} already exists"
            )));
        }

        let id = DroneId::from(self.next_drone_id);
        self.next_drone_id += 1;
        let drone = Drone::new(id.clone(), params, self.config.default_charging_rate);
        self.drones.insert(id.clone(), drone.clone());
        info!(%id, code = %drone.drone_code, "Drone registered");
        Ok(drone)
    }

    fn update_drone(&mut self, id: &DroneId, update: DroneUpdate) -> Result<Drone, FleetError> {
        if let Some(code) = &update.drone_code {
            let code = code.trim().to_uppercase();
            if self
                .drones
                .values()
                .any(|drone| drone.id != *id && drone.drone_code == code)
            {
                return Err(FleetError::Validation(format!(
                    "Drone with code {code} already exists"
                )));
            }
        }
        let Some(drone) = self.drones.get_mut(id) else {
            return Err(FleetError::DroneNotFound(id.to_string()));
        };
        if update.battery_level.is_some_and(|level| level > 100) {
            return Err(FleetError::Validation(
                "Battery level must be between 0 and 100".to_string(),
            ));
        }
        if update.max_weight_kg.is_some_and(|w| w <= 0.0)
            || update.max_items.is_some_and(|n| n == 0)
        {
            return Err(FleetError::Validation(
                "Drone capacity must be positive".to_string(),
            ));
        }

        if let Some(status) = update.status {
            Self::apply_drone_status(drone, status, Utc::now())?;
        }
        if let Some(code) = update.drone_code {
            drone.drone_code = code.trim().to_uppercase();
        }
        if let Some(level) = update.battery_level {
            drone.battery.level = level;
        }
        if let Some(weight) = update.max_weight_kg {
            drone.capacity.max_weight_kg = weight;
        }
        if let Some(items) = update.max_items {
            drone.capacity.max_items = items;
        }
        if let Some(restaurant) = update.assigned_restaurant_id {
            drone.assigned_restaurant_id = restaurant;
        }
        info!(%id, "Drone updated");
        Ok(drone.clone())
    }

    fn remove_drone(&mut self, id: &DroneId) -> Result<(), FleetError> {
        let Some(drone) = self.drones.get(id) else {
            return Err(FleetError::DroneNotFound(id.to_string()));
        };
        if let Some(order_id) = &drone.current_order_id {
            return Err(FleetError::RemovalBlocked(format!(
                "Cannot delete drone while it carries {order_id}"
            )));
        }
        let hub_id = drone.assigned_hub_id.clone();
        self.drones.remove(id);
        // Drop the owning side of the association along with the drone.
        if let Some(hub_id) = hub_id {
            if let Some(hub) = self.hubs.get_mut(&hub_id) {
                hub.assigned_drones.retain(|assigned| assigned != id);
            }
        }
        info!(%id, remaining = self.drones.len(), "Drone removed");
        Ok(())
    }

    fn update_drone_status(
        &mut self,
        id: &DroneId,
        update: DroneStatusUpdate,
    ) -> Result<Drone, FleetError> {
        let Some(drone) = self.drones.get_mut(id) else {
            return Err(FleetError::DroneNotFound(id.to_string()));
        };
        if update.battery_level.is_some_and(|level| level > 100) {
            return Err(FleetError::Validation(
                "Battery level must be between 0 and 100".to_string(),
            ));
        }
        // The charging estimate is computed from the level on record at the
        // moment the transition arrives, before any reported level applies.
        if let Some(status) = update.status {
            Self::apply_drone_status(drone, status, Utc::now())?;
        }
        if let Some(level) = update.battery_level {
            drone.battery.level = level;
        }
        if let Some(location) = update.location {
            drone.current_location = location;
        }
        info!(%id, status = %drone.status, battery = drone.battery.level, "Drone status updated");
        Ok(drone.clone())
    }

    /// Applies a status transition, keeping the charging bookkeeping and
    /// the delivery binding consistent. A drone holding an order stays
    /// `Delivering` until `complete_delivery` releases it.
    fn apply_drone_status(
        drone: &mut Drone,
        status: DroneStatus,
        now: DateTime<Utc>,
    ) -> Result<(), FleetError> {
        if let Some(order_id) = &drone.current_order_id {
            if status != DroneStatus::Delivering {
                return Err(FleetError::AssignmentConflict(format!(
                    "Drone still carries {order_id}, complete the delivery first"
                )));
            }
        }
        match status {
            DroneStatus::Charging => drone.battery.begin_charging(now),
            _ => drone.battery.stop_charging(),
        }
        drone.status = status;
        Ok(())
    }

    fn available_drones(&self, restaurant: Option<&RestaurantId>) -> Vec<Drone> {
        self.drones
            .values()
            .filter(|drone| {
                drone.status == DroneStatus::Available
                    && drone.battery.level >= self.config.dispatch_battery_floor
            })
            .filter(|drone| match restaurant {
                Some(restaurant) => {
                    drone.assigned_restaurant_id.is_none()
                        || drone.assigned_restaurant_id.as_ref() == Some(restaurant)
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    fn drones_for_restaurant(&self, restaurant: &RestaurantId) -> Vec<Drone> {
        self.drones
            .values()
            .filter(|drone| drone.assigned_restaurant_id.as_ref() == Some(restaurant))
            .cloned()
            .collect()
    }

    fn dispatch_drone(&mut self, drone_id: &DroneId, order_id: OrderId) -> Result<Drone, FleetError> {
        let Some(drone) = self.drones.get_mut(drone_id) else {
            return Err(FleetError::DroneNotFound(drone_id.to_string()));
        };
        if drone.status != DroneStatus::Available {
            return Err(FleetError::AssignmentConflict(format!(
                "Drone is {}, not available for dispatch",
                drone.status
            )));
        }
        drone.status = DroneStatus::Delivering;
        drone.current_order_id = Some(order_id.clone());
        info!(%drone_id, %order_id, "Drone dispatched");
        Ok(drone.clone())
    }

    fn complete_delivery(&mut self, drone_id: &DroneId) -> Result<Drone, FleetError> {
        let Some(drone) = self.drones.get_mut(drone_id) else {
            return Err(FleetError::DroneNotFound(drone_id.to_string()));
        };
        let Some(order_id) = drone.current_order_id.take() else {
            return Err(FleetError::Validation(
                "Drone has no active delivery".to_string(),
            ));
        };
        drone.delivery_history.push(CompletedDelivery {
            order_id: order_id.clone(),
            completed_at: Utc::now(),
        });
        drone.total_deliveries += 1;
        drone.status = DroneStatus::Available;
        info!(%drone_id, %order_id, total = drone.total_deliveries, "Delivery completed");
        Ok(drone.clone())
    }
}
