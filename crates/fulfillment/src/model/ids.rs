use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a placed order.
    OrderId,
    "order"
);

entity_id!(
    /// Identifier of a delivery hub.
    HubId,
    "hub"
);

entity_id!(
    /// Identifier of a delivery drone.
    DroneId,
    "drone"
);

entity_id!(
    /// Identifier of a restaurant participating in an order.
    RestaurantId,
    "restaurant"
);

entity_id!(
    /// Identifier of the customer who placed an order.
    CustomerId,
    "customer"
);

entity_id!(
    /// Identifier of a menu item referenced by a cart line.
    FoodId,
    "food"
);
