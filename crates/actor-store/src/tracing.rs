//! # Observability & Tracing
//!
//! This module provides the tracing setup shared by every binary built on
//! the store runtime.
//!
//! [`setup_tracing`] initializes structured logging with the `tracing`
//! crate. Log level comes from the `RUST_LOG` environment variable, so the
//! same binary runs quiet in production and verbose on a developer machine:
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Filter to one module
//! RUST_LOG=fulfillment::fleet=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup, shutdown, final store size
//! - **Entity operations**: Create, Get, List, Update, Delete, Actions
//! - **Request flow**: hierarchical spans showing the complete request path
//! - **Errors**: entity ids and failure reasons as structured fields
//!
//! Actors log under an `entity_type` field rather than a module path, so the
//! subscriber is configured with `with_target(false)` and the compact
//! formatter, which shows span hierarchy inline
//! (e.g. `place_order:assign_hub: Sending request`).

/// Initializes the global tracing subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths add noise; entity_type fields carry the context
        .compact()
        .init();
}
