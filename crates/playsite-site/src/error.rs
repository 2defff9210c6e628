//! Error types for the site layer.

use playsite_catalog::CatalogError;
use playsite_protocol::{SiteId, TicketNumber};

/// Errors that can occur during site operations.
///
/// Every failing operation leaves the site exactly as it found it: checks
/// run before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// The site does not exist.
    #[error("play site {0} not found")]
    NotFound(SiteId),

    /// No kid with this ticket is in the container that was searched.
    #[error("kid with ticket {ticket} not found on play site {site_id}")]
    KidNotFound {
        site_id: SiteId,
        ticket: TicketNumber,
    },

    /// An equipment ID in a creation request didn't resolve.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Every unit of capacity is taken.
    #[error("play site {0} is full")]
    PlaySiteFull(SiteId),

    /// The site was created without equipment, so it can't hold anyone.
    #[error("play site {0} has no equipment")]
    NoEquipmentFound(SiteId),

    /// The kid is older than the site allows.
    #[error("kid '{name}' (age {age}) exceeds the age restriction of play site {site_id}")]
    AgeRestriction {
        site_id: SiteId,
        name: String,
        age: u32,
    },

    /// The enqueue policy declined to queue the kid.
    #[error("enqueue of kid '{name}' rejected for play site {site_id}")]
    EnqueueRejected { site_id: SiteId, name: String },

    /// Utilization was requested for a site with zero total capacity.
    #[error("utilization is undefined for zero-capacity play site {0}")]
    DivisionUndefined(SiteId),

    /// A caller-supplied ticket number is already held on this site.
    #[error("ticket {ticket} is already in use on play site {site_id}")]
    DuplicateTicket {
        site_id: SiteId,
        ticket: TicketNumber,
    },
}

/// The flat set of failure kinds a caller maps to its own responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PlaySiteFull,
    NoEquipmentFound,
    AgeRestriction,
    EnqueueRejected,
    DivisionUndefined,
    DuplicateTicket,
}

impl SiteError {
    /// Collapses the error into its kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::KidNotFound { .. } | Self::Catalog(_) => {
                ErrorKind::NotFound
            }
            Self::PlaySiteFull(_) => ErrorKind::PlaySiteFull,
            Self::NoEquipmentFound(_) => ErrorKind::NoEquipmentFound,
            Self::AgeRestriction { .. } => ErrorKind::AgeRestriction,
            Self::EnqueueRejected { .. } => ErrorKind::EnqueueRejected,
            Self::DivisionUndefined(_) => ErrorKind::DivisionUndefined,
            Self::DuplicateTicket { .. } => ErrorKind::DuplicateTicket,
        }
    }

    /// Returns `true` for an unknown site, equipment, or ticket.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
