//! The static equipment table.

use playsite_protocol::{EquipmentId, EquipmentInfo, EquipmentKind};
use uuid::Uuid;

use crate::CatalogError;

/// One row of the catalog.
///
/// `Copy` because it's three words of static data; callers get their own
/// copy rather than a reference into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentType {
    pub id: EquipmentId,
    pub kind: EquipmentKind,
    pub display_name: &'static str,
}

impl EquipmentType {
    /// Converts the entry into the owned record returned to callers.
    pub fn info(&self) -> EquipmentInfo {
        EquipmentInfo {
            id: self.id,
            kind: self.kind,
            name: self.display_name.to_string(),
        }
    }
}

/// The catalog, in listing order. IDs are fixed and must never change:
/// clients store them.
const ENTRIES: [EquipmentType; 4] = [
    EquipmentType {
        id: EquipmentId(Uuid::from_u128(0xcf9b5a00_0bb2_11ee_be56_0242ac120002)),
        kind: EquipmentKind::DoubleSwings,
        display_name: "Double Swings",
    },
    EquipmentType {
        id: EquipmentId(Uuid::from_u128(0xcf9b5da2_0bb2_11ee_be56_0242ac120002)),
        kind: EquipmentKind::Carousel,
        display_name: "Carousel",
    },
    EquipmentType {
        id: EquipmentId(Uuid::from_u128(0xcf9b5f1e_0bb2_11ee_be56_0242ac120002)),
        kind: EquipmentKind::Slide,
        display_name: "Slide",
    },
    EquipmentType {
        id: EquipmentId(Uuid::from_u128(0xcf9b605e_0bb2_11ee_be56_0242ac120002)),
        kind: EquipmentKind::BallPit,
        display_name: "Ball Pit",
    },
];

/// Looks up a catalog entry by ID.
///
/// # Errors
/// Returns [`CatalogError::NotFound`] if no entry has this ID.
pub fn resolve(id: EquipmentId) -> Result<EquipmentType, CatalogError> {
    ENTRIES
        .iter()
        .find(|entry| entry.id == id)
        .copied()
        .ok_or(CatalogError::NotFound(id))
}

/// Returns every catalog entry in a stable, fixed order.
pub fn list_all() -> Vec<EquipmentType> {
    ENTRIES.to_vec()
}

/// Returns the catalog ID registered for an equipment kind.
///
/// Every [`EquipmentKind`] variant has exactly one catalog row.
pub fn id_of(kind: EquipmentKind) -> EquipmentId {
    match kind {
        EquipmentKind::DoubleSwings => ENTRIES[0].id,
        EquipmentKind::Carousel => ENTRIES[1].id,
        EquipmentKind::Slide => ENTRIES[2].id,
        EquipmentKind::BallPit => ENTRIES[3].id,
    }
}
