//! # System Lifecycle & Orchestration
//!
//! Wiring the fulfillment actors together is where the coordination lives:
//! the fleet actor must be running before the order actor starts, because
//! order placement resolves hubs through the fleet client injected into the
//! order actor's context.
//!
//! [`FulfillmentSystem`] is the conductor. It creates both actors, injects
//! the context, exposes the clients, and coordinates graceful shutdown:
//! dropping the clients closes the request channels, each actor drains its
//! queue and exits, and `shutdown` awaits the tasks.
//!
//! The dependency graph is acyclic (orders call the fleet, never the other
//! way around), so channel closure alone is enough to wind the system down
//! deterministically.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{FleetClient, OrderClient};
use crate::config::FulfillmentConfig;
use crate::directory::DistrictIndex;
use crate::fleet::FleetActor;
use crate::notify::Notifier;
use crate::order_actor::{self, OrderContext};

/// The running fulfillment system: both actors spawned, clients ready.
pub struct FulfillmentSystem {
    pub order_client: OrderClient,
    pub fleet_client: FleetClient,
    handles: Vec<JoinHandle<()>>,
}

impl FulfillmentSystem {
    pub fn new(
        config: FulfillmentConfig,
        directory: Arc<dyn DistrictIndex>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let config = Arc::new(config);

        // 1. Fleet first; the order actor depends on its client.
        let (fleet_actor, fleet_client) = FleetActor::new(32, config.clone());
        let fleet_handle = tokio::spawn(fleet_actor.run());

        // 2. Order actor, with its collaborators injected at startup.
        let (order_actor, order_store_client) = order_actor::new();
        let order_client = OrderClient::new(order_store_client, config.client_domain.clone());
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            directory,
            fleet: fleet_client.clone(),
            notifier,
            config,
        }));

        Self {
            order_client,
            fleet_client,
            handles: vec![fleet_handle, order_handle],
        }
    }

    /// Drops the clients and waits for both actors to drain and exit.
    ///
    /// The order actor's context holds a fleet client clone, so the fleet
    /// channel only closes once the order actor has stopped; awaiting the
    /// handles covers both.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down fulfillment system");

        drop(self.order_client);
        drop(self.fleet_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("Fulfillment system shutdown complete");
        Ok(())
    }
}
