//! Pure planning steps of order placement: cart decomposition, zone
//! grouping, and drone fleet sizing.

pub mod capacity;
pub mod decompose;
pub mod zones;
