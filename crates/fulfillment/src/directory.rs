//! Lookup seam for the restaurant directory.
//!
//! Placement only needs one fact about a restaurant, the district it
//! cooks in. The trait keeps the order actor decoupled from wherever
//! that fact lives, an in-process table here, a search index or another
//! service in a full deployment.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::RestaurantId;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("District index unavailable: {0}")]
    Unavailable(String),
}

/// Maps restaurants to the district they operate from.
#[async_trait]
pub trait DistrictIndex: Send + Sync {
    /// `Ok(None)` means the restaurant is unknown to the index, which is
    /// not a failure; callers fall back to the unknown-district sentinel.
    async fn district_of(&self, restaurant: &RestaurantId) -> Result<Option<String>, DirectoryError>;
}

/// Table-backed index for demos and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    districts: RwLock<HashMap<RestaurantId, String>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, restaurant: RestaurantId, district: impl Into<String>) {
        self.districts
            .write()
            .await
            .insert(restaurant, district.into());
    }
}

#[async_trait]
impl DistrictIndex for InMemoryDirectory {
    async fn district_of(&self, restaurant: &RestaurantId) -> Result<Option<String>, DirectoryError> {
        Ok(self.districts.read().await.get(restaurant).cloned())
    }
}
