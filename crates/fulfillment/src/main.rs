//! # Fulfillment Demo
//!
//! Walks an order through the whole system: seed the restaurant directory
//! and the fleet, place a multi-restaurant order, pay for it, inspect its
//! delivery plan, and drive every restaurant's share to delivered while a
//! drone flies the last leg.
//!
//! Run with `RUST_LOG=info cargo run` for the narrative, or
//! `RUST_LOG=debug` to see every actor message.

use std::sync::Arc;

use actor_store::tracing::setup_tracing;
use fulfillment::config::FulfillmentConfig;
use fulfillment::directory::InMemoryDirectory;
use fulfillment::lifecycle::FulfillmentSystem;
use fulfillment::model::drone::{DroneCreate, DroneStatus, DroneStatusUpdate};
use fulfillment::model::hub::{CoverageZone, HubCreate, HubLocation};
use fulfillment::model::order::{Address, LineItem, OrderCreate, PaymentOutcome};
use fulfillment::model::{CustomerId, FoodId, FulfillmentStatus, RestaurantId};
use fulfillment::notify::LogNotifier;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting fulfillment system demo");

    let config = FulfillmentConfig::load();

    // Restaurants 1 and 3 cook in District 1, restaurant 2 in District 3.
    let directory = Arc::new(InMemoryDirectory::new());
    directory.insert(RestaurantId(1), "District 1").await;
    directory.insert(RestaurantId(2), "District 3").await;
    directory.insert(RestaurantId(3), "District 1").await;

    let system = FulfillmentSystem::new(config, directory, Arc::new(LogNotifier));

    // Stand up one hub per district and a small drone fleet.
    let span = tracing::info_span!("fleet_setup");
    let drone = async {
        let hub_d1 = system
            .fleet_client
            .add_hub(HubCreate {
                hub_code: "hub-d1".to_string(),
                name: "District 1 Hub".to_string(),
                location: HubLocation {
                    address: "5 Nguyen Hue".to_string(),
                    district: "District 1".to_string(),
                    city: "Ho Chi Minh City".to_string(),
                    latitude: Some(10.774),
                    longitude: Some(106.701),
                },
                capacity: None,
                operating_hours: None,
                coverage_area: vec![CoverageZone {
                    district: "District 1".to_string(),
                    max_distance_km: 5.0,
                }],
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(hub_id = %hub_d1.id, "Hub registered");

        let hub_d3 = system
            .fleet_client
            .add_hub(HubCreate {
                hub_code: "hub-d3".to_string(),
                name: "District 3 Hub".to_string(),
                location: HubLocation {
                    address: "200 Vo Van Tan".to_string(),
                    district: "District 3".to_string(),
                    city: "Ho Chi Minh City".to_string(),
                    latitude: Some(10.778),
                    longitude: Some(106.688),
                },
                capacity: None,
                operating_hours: None,
                coverage_area: vec![CoverageZone {
                    district: "District 3".to_string(),
                    max_distance_km: 5.0,
                }],
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(hub_id = %hub_d3.id, "Hub registered");

        let drone = system
            .fleet_client
            .add_drone(DroneCreate {
                drone_code: "drn-01".to_string(),
                assigned_restaurant_id: None,
                max_weight_kg: None,
                max_items: None,
            })
            .await
            .map_err(|e| e.to_string())?;
        system
            .fleet_client
            .assign_drone(hub_d1.id.clone(), drone.id.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(drone_id = %drone.id, hub_id = %hub_d1.id, "Drone assigned");

        Ok::<_, String>(drone)
    }
    .instrument(span)
    .await?;

    // Place an order that spans both districts.
    let span = tracing::info_span!("order_placement");
    let order_id = async {
        let receipt = system
            .order_client
            .place_order(OrderCreate {
                customer_id: CustomerId(1),
                items: vec![
                    LineItem {
                        food_id: FoodId(1),
                        name: "Pho bo".to_string(),
                        price: 9.5,
                        quantity: 2,
                        restaurant_id: Some(RestaurantId(1)),
                    },
                    LineItem {
                        food_id: FoodId(2),
                        name: "Banh mi".to_string(),
                        price: 4.0,
                        quantity: 3,
                        restaurant_id: Some(RestaurantId(2)),
                    },
                    LineItem {
                        food_id: FoodId(3),
                        name: "Ca phe sua da".to_string(),
                        price: 2.5,
                        quantity: 2,
                        restaurant_id: Some(RestaurantId(1)),
                    },
                ],
                address: Address {
                    name: "Lan Pham".to_string(),
                    email: "lan@example.com".to_string(),
                    phone: "0900000000".to_string(),
                    street: "12 Le Loi".to_string(),
                    district: "District 1".to_string(),
                    city: "Ho Chi Minh City".to_string(),
                },
                cod: false,
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id = %receipt.order_id, amount = receipt.amount, url = %receipt.checkout_url, "Order placed");

        let verification = system
            .order_client
            .verify_payment(receipt.order_id.clone(), PaymentOutcome::Succeeded)
            .await
            .map_err(|e| e.to_string())?;
        info!(message = %verification.message, "Payment verified");

        Ok::<_, String>(receipt.order_id)
    }
    .instrument(span)
    .await?;

    // Inspect the delivery plan the placement produced.
    let plan = system
        .order_client
        .delivery_zones(order_id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(
        districts = plan.district_count,
        drones = plan.total_recommended_drones,
        "Delivery plan ready"
    );
    for zone in &plan.zones {
        info!(
            district = %zone.district,
            weight_kg = zone.estimated_weight_kg,
            drones = zone.recommended_drones,
            hub = ?zone.hub.hub_id(),
            "Zone"
        );
    }

    // Each restaurant works through its share of the order.
    let span = tracing::info_span!("fulfillment_progress");
    async {
        for status in [
            FulfillmentStatus::Preparing,
            FulfillmentStatus::ReadyForPickup,
            FulfillmentStatus::OutForDelivery,
        ] {
            let aggregate = system
                .order_client
                .update_restaurant_status(order_id.clone(), RestaurantId(1), status)
                .await
                .map_err(|e| e.to_string())?;
            info!(restaurant = %RestaurantId(1), %status, %aggregate, "Status reported");
        }

        // The drone takes restaurant 1's food out.
        let flying = system
            .fleet_client
            .dispatch_drone(drone.id.clone(), order_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(drone_id = %flying.id, status = %flying.status, "Drone dispatched");

        for restaurant in [RestaurantId(1), RestaurantId(2)] {
            let aggregate = system
                .order_client
                .update_restaurant_status(
                    order_id.clone(),
                    restaurant.clone(),
                    FulfillmentStatus::Delivered,
                )
                .await
                .map_err(|e| e.to_string())?;
            info!(restaurant = %restaurant, %aggregate, "Delivered");
        }

        let landed = system
            .fleet_client
            .complete_delivery(drone.id.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(drone_id = %landed.id, total_deliveries = landed.total_deliveries, "Delivery logged");

        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // The flight drained the battery; report the level, then plug in. The
    // charging estimate is stamped from the level on record.
    system
        .fleet_client
        .update_drone_status(
            drone.id.clone(),
            DroneStatusUpdate {
                battery_level: Some(45),
                ..DroneStatusUpdate::default()
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    let charging = system
        .fleet_client
        .update_drone_status(
            drone.id.clone(),
            DroneStatusUpdate {
                status: Some(DroneStatus::Charging),
                ..DroneStatusUpdate::default()
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(
        drone_id = %charging.id,
        minutes_to_full = charging.battery.minutes_to_full(),
        eta = ?charging.battery.estimated_full_charge_at,
        "Drone charging"
    );

    let stats = system
        .fleet_client
        .hub_stats()
        .await
        .map_err(|e| e.to_string())?;
    info!(
        hubs = stats.total_hubs,
        active = stats.active_hubs,
        drones = stats.total_assigned_drones,
        "Fleet snapshot"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
