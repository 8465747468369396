//! # Fulfillment
//!
//! Order fulfillment orchestration for a food delivery marketplace: cart
//! decomposition, delivery-zone planning, hub and drone fleet management,
//! and per-restaurant fulfillment tracking, built on the `actor_store`
//! runtime.

pub mod clients;
pub mod config;
pub mod directory;
pub mod fleet;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod planner;
