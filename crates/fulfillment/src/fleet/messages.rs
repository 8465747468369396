//! Request messages understood by the fleet actor.

use tokio::sync::oneshot;

use crate::fleet::FleetError;
use crate::model::drone::{Drone, DroneCreate, DroneStatusUpdate, DroneUpdate};
use crate::model::hub::{Hub, HubCreate, HubStats, HubUpdate};
use crate::model::{DroneId, HubId, OrderId, RestaurantId};

/// Reply channel carried by every request.
pub type FleetResponse<T> = oneshot::Sender<Result<T, FleetError>>;

/// One message per fleet operation. Hub and drone requests share a single
/// actor so that operations spanning both, like assignment, are atomic
/// without locks.
#[derive(Debug)]
pub enum FleetRequest {
    AddHub {
        params: HubCreate,
        respond_to: FleetResponse<Hub>,
    },
    GetHub {
        id: HubId,
        respond_to: FleetResponse<Option<Hub>>,
    },
    ListHubs {
        respond_to: FleetResponse<Vec<Hub>>,
    },
    UpdateHub {
        id: HubId,
        update: HubUpdate,
        respond_to: FleetResponse<Hub>,
    },
    RemoveHub {
        id: HubId,
        respond_to: FleetResponse<()>,
    },
    HubStats {
        respond_to: FleetResponse<HubStats>,
    },
    ActiveHubsInDistrict {
        district: String,
        respond_to: FleetResponse<Vec<Hub>>,
    },
    AssignDrone {
        hub_id: HubId,
        drone_id: DroneId,
        respond_to: FleetResponse<()>,
    },
    UnassignDrone {
        hub_id: HubId,
        drone_id: DroneId,
        respond_to: FleetResponse<()>,
    },
    EnqueueOrder {
        hub_id: HubId,
        order_id: OrderId,
        restaurant_ids: Vec<RestaurantId>,
        respond_to: FleetResponse<()>,
    },
    MarkOrderDispatched {
        hub_id: HubId,
        order_id: OrderId,
        respond_to: FleetResponse<()>,
    },
    AddDrone {
        params: DroneCreate,
        respond_to: FleetResponse<Drone>,
    },
    GetDrone {
        id: DroneId,
        respond_to: FleetResponse<Option<Drone>>,
    },
    ListDrones {
        respond_to: FleetResponse<Vec<Drone>>,
    },
    UpdateDrone {
        id: DroneId,
        update: DroneUpdate,
        respond_to: FleetResponse<Drone>,
    },
    RemoveDrone {
        id: DroneId,
        respond_to: FleetResponse<()>,
    },
    UpdateDroneStatus {
        id: DroneId,
        update: DroneStatusUpdate,
        respond_to: FleetResponse<Drone>,
    },
    AvailableDrones {
        restaurant: Option<RestaurantId>,
        respond_to: FleetResponse<Vec<Drone>>,
    },
    DronesForRestaurant {
        restaurant: RestaurantId,
        respond_to: FleetResponse<Vec<Drone>>,
    },
    DispatchDrone {
        drone_id: DroneId,
        order_id: OrderId,
        respond_to: FleetResponse<Drone>,
    },
    CompleteDelivery {
        drone_id: DroneId,
        respond_to: FleetResponse<Drone>,
    },
}
