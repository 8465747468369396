/// Errors returned by the fleet actor.
///
/// One enum for hubs and drones together, since every fleet operation can
/// touch both sides of the association.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Hub not found: {0}")]
    HubNotFound(String),
    #[error("Drone not found: {0}")]
    DroneNotFound(String),
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),
    #[error("Assignment conflict: {0}")]
    AssignmentConflict(String),
    #[error("Removal blocked: {0}")]
    RemovalBlocked(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
