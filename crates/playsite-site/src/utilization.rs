//! Utilization calculators and their selection by equipment kind.
//!
//! The calculator set is closed, so it's an enum rather than a trait
//! object: each variant is one formula, and [`Calculator::for_kind`] is
//! the kind → calculator table.

use playsite_protocol::{Equipment, EquipmentKind};

use crate::{PlaySite, SiteError};

/// A utilization formula.
///
/// Variants are declared in selection priority order: when a site has
/// equipment matching several specialized calculators, the one declared
/// first wins. `Default` is the fallback and always comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calculator {
    /// Step function: 100% when the site is full, otherwise 0%.
    DoubleSwings,
    /// Occupied share of total capacity, as a percentage.
    Default,
}

impl Calculator {
    /// Specialized calculators, highest priority first.
    const SPECIALIZED: [Calculator; 1] = [Calculator::DoubleSwings];

    /// Returns the dedicated calculator for an equipment kind, if any.
    pub fn for_kind(kind: EquipmentKind) -> Option<Self> {
        match kind {
            EquipmentKind::DoubleSwings => Some(Self::DoubleSwings),
            EquipmentKind::Carousel | EquipmentKind::Slide | EquipmentKind::BallPit => {
                None
            }
        }
    }

    /// Picks the calculator for a site's equipment.
    ///
    /// Returns the highest-priority specialized calculator matched by any
    /// piece of equipment, or [`Calculator::Default`] if none match. The
    /// result does not depend on equipment order.
    pub fn select(equipments: &[Equipment]) -> Self {
        Self::SPECIALIZED
            .into_iter()
            .find(|calculator| {
                equipments
                    .iter()
                    .any(|e| Self::for_kind(e.kind) == Some(*calculator))
            })
            .unwrap_or(Self::Default)
    }

    /// Computes the site's utilization as a percentage.
    ///
    /// # Errors
    /// Returns [`SiteError::DivisionUndefined`] if the site's total capacity
    /// is zero.
    pub fn calculate(self, site: &PlaySite) -> Result<f64, SiteError> {
        let capacity = site.capacity();
        if capacity == 0 {
            return Err(SiteError::DivisionUndefined(site.id()));
        }

        let utilization = match self {
            Self::DoubleSwings => {
                if site.is_full() {
                    100.0
                } else {
                    0.0
                }
            }
            Self::Default => site.occupied_capacity() as f64 / capacity as f64 * 100.0,
        };

        tracing::debug!(
            site_id = %site.id(),
            calculator = %self,
            utilization,
            "utilization calculated"
        );
        Ok(utilization)
    }
}

impl std::fmt::Display for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoubleSwings => write!(f, "DoubleSwings"),
            Self::Default => write!(f, "Default"),
        }
    }
}
