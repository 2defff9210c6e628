//! Error types for the catalog layer.

use playsite_protocol::EquipmentId;

/// Errors that can occur during catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No equipment type has this ID.
    #[error("no equipment found with id {0}")]
    NotFound(EquipmentId),
}
