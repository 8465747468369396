//! Runtime configuration, loaded from `FULFILLMENT_*` environment
//! variables with sensible defaults for local runs.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FulfillmentConfig {
    /// Base URL of the storefront, used to build checkout links.
    pub client_domain: String,
    /// Planning weight of one item unit, in kilograms.
    pub item_unit_weight_kg: f64,
    /// Payload limit assumed per drone when sizing a zone.
    pub drone_max_weight_kg: f64,
    /// Item count limit assumed per drone when sizing a zone.
    pub drone_max_items: u32,
    /// Minimum battery percentage for a drone to count as dispatchable.
    pub dispatch_battery_floor: u8,
    /// Charging rate given to new drones, in percent per minute.
    pub default_charging_rate: f64,
    /// Upper bound on district-index and hub-registry reads during
    /// placement.
    pub lookup_timeout: Duration,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            client_domain: "http://localhost:5173".to_string(),
            item_unit_weight_kg: 0.5,
            drone_max_weight_kg: 5.0,
            drone_max_items: 10,
            dispatch_battery_floor: 20,
            default_charging_rate: 2.0,
            lookup_timeout: Duration::from_millis(2000),
        }
    }
}

impl FulfillmentConfig {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            client_domain: try_load("FULFILLMENT_CLIENT_DOMAIN", defaults.client_domain),
            item_unit_weight_kg: try_load(
                "FULFILLMENT_ITEM_UNIT_WEIGHT_KG",
                defaults.item_unit_weight_kg,
            ),
            drone_max_weight_kg: try_load(
                "FULFILLMENT_DRONE_MAX_WEIGHT_KG",
                defaults.drone_max_weight_kg,
            ),
            drone_max_items: try_load("FULFILLMENT_DRONE_MAX_ITEMS", defaults.drone_max_items),
            dispatch_battery_floor: try_load(
                "FULFILLMENT_BATTERY_FLOOR",
                defaults.dispatch_battery_floor,
            ),
            default_charging_rate: try_load(
                "FULFILLMENT_CHARGING_RATE",
                defaults.default_charging_rate,
            ),
            lookup_timeout: Duration::from_millis(try_load(
                "FULFILLMENT_LOOKUP_TIMEOUT_MS",
                defaults.lookup_timeout.as_millis() as u64,
            )),
        }
    }
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid {key} value {raw:?}, using default: {default}");
                default
            }
        },
        Err(_) => {
            debug!("{key} not set, using default: {default}");
            default
        }
    }
}
