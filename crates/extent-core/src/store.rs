//! Persistence seam

use crate::error::PersistenceError;
use async_trait::async_trait;
use extent_payload::{InsertComponentPayload, UpdateComponentPayload};

/// Backend that stores assembled payloads
///
/// Each call is one atomic mutation; there is no partial success.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Insert a new component, returning its `project_component_id`
    async fn insert_component(
        &self,
        payload: &InsertComponentPayload,
    ) -> Result<i64, PersistenceError>;

    /// Apply the changed rows of an edited component
    async fn update_component(
        &self,
        payload: &UpdateComponentPayload,
    ) -> Result<(), PersistenceError>;
}
