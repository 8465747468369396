//! Domain clients, the public face of the two actors.

mod macros;

pub mod fleet_client;
pub mod order_client;

pub use fleet_client::FleetClient;
pub use order_client::OrderClient;
