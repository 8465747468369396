//! Actions accepted by orders after placement.

use crate::model::{FulfillmentStatus, RestaurantId};

/// Mutations that go through the actor as a single atomic step.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// One restaurant reports progress on its share of the order. The
    /// aggregate status is re-derived in the same step.
    UpdateRestaurantStatus {
        restaurant_id: RestaurantId,
        status: FulfillmentStatus,
    },
    /// Outcome of payment verification. `paid: false` is the
    /// cash-on-delivery case, confirmed but collected later.
    RecordPayment { paid: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The re-derived aggregate status.
    StatusUpdated(FulfillmentStatus),
    PaymentRecorded,
}
