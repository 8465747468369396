//! Domain model shared by the order and fleet actors.

mod ids;

pub mod drone;
pub mod hub;
pub mod order;
pub mod status;
pub mod zone;

pub use ids::{CustomerId, DroneId, FoodId, HubId, OrderId, RestaurantId};
pub use status::FulfillmentStatus;
