//! # Order Actor
//!
//! This module implements the Order store actor, from placement through
//! payment to delivery.
//!
//! ## Overview
//!
//! An order is created from a cart that may span several restaurants. At
//! placement it is decomposed into per-restaurant groups and delivery
//! zones; afterwards each restaurant reports its own fulfillment progress
//! and the order-level status is derived from those reports.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](actor_store::StoreEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`] for status and payment
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! Status reports and payment confirmations go through the Action pattern
//! rather than a general update, so the derived order status can never be
//! written directly:
//!
//! ```rust,ignore
//! // A restaurant reports progress on its share of the order
//! order_client
//!     .update_restaurant_status(order_id, restaurant_id, FulfillmentStatus::Preparing)
//!     .await?;
//!
//! // The gateway confirms a payment
//! order_client.verify_payment(order_id, PaymentOutcome::Succeeded).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fulfillment::clients::OrderClient;
//! use fulfillment::config::FulfillmentConfig;
//! use fulfillment::directory::InMemoryDirectory;
//! use fulfillment::fleet::FleetActor;
//! use fulfillment::model::order::{Address, LineItem, OrderCreate};
//! use fulfillment::model::{CustomerId, FoodId, RestaurantId};
//! use fulfillment::notify::LogNotifier;
//! use fulfillment::order_actor::{self, OrderContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(FulfillmentConfig::default());
//!
//!     // The order actor reads the fleet during placement to resolve hubs
//!     let (fleet_actor, fleet_client) = FleetActor::new(32, config.clone());
//!     tokio::spawn(fleet_actor.run());
//!
//!     // Create actor and client, then start the actor with its context
//!     let (actor, generic_client) = order_actor::new();
//!     let client = OrderClient::new(generic_client, config.client_domain.clone());
//!     tokio::spawn(actor.run(OrderContext {
//!         directory: Arc::new(InMemoryDirectory::new()),
//!         fleet: fleet_client,
//!         notifier: Arc::new(LogNotifier),
//!         config,
//!     }));
//!
//!     // Place an order
//!     let receipt = client
//!         .place_order(OrderCreate {
//!             customer_id: CustomerId(1),
//!             items: vec![LineItem {
//!                 food_id: FoodId(1),
//!                 name: "Pho bo".to_string(),
//!                 price: 9.5,
//!                 quantity: 2,
//!                 restaurant_id: Some(RestaurantId(1)),
//!             }],
//!             address: Address {
//!                 name: "Lan Pham".to_string(),
//!                 email: "lan@example.com".to_string(),
//!                 phone: "0900000000".to_string(),
//!                 street: "12 Le Loi".to_string(),
//!                 district: "District 1".to_string(),
//!                 city: "Ho Chi Minh City".to_string(),
//!             },
//!             cod: false,
//!         })
//!         .await?;
//!     println!("pay at {}", receipt.checkout_url);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Derived status**: the order-level status is recomputed from the
//!   per-restaurant reports after every update, never stored independently
//! - **Scoped updates**: a restaurant can only report on orders it is part of
//! - **Zone planning at placement**: districts, hubs, and drone counts are
//!   resolved once, when the order is created

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::order::Order;
use actor_store::{StoreActor, StoreClient};

/// Creates a new Order actor and its client.
pub fn new() -> (StoreActor<Order>, StoreClient<Order>) {
    StoreActor::new(32)
}
