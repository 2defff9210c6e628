//! # Playsite
//!
//! Capacity-bounded play sites with FIFO wait queues.
//!
//! A [`Playground`] owns every site. Kids are admitted while there is
//! room, queued when there isn't, and promoted from the queue head the
//! moment an onsite kid leaves. Each site also reports a utilization
//! percentage, and a process-wide counter tallies every successful visit.
//!
//! ## Quick Start
//!
//! ```rust
//! use playsite::prelude::*;
//!
//! # fn main() -> Result<(), PlaygroundError> {
//! let playground = Playground::builder()
//!     .enqueue_policy(AlwaysAccept)
//!     .build();
//!
//! let site = playground.create_play_site(&PlaySiteRequest {
//!     name: "north-lawn".into(),
//!     age_restriction: 10,
//!     equipments: vec![EquipmentRequest {
//!         id: playsite::catalog::id_of(EquipmentKind::DoubleSwings),
//!         capacity: 1,
//!     }],
//! })?;
//!
//! let first = playground.admit_kid(site, KidRequest::new("Ada", 5))?;
//! let second = playground.enqueue_kid(site, KidRequest::new("Bo", 6))?;
//!
//! playground.remove_kid_onsite(site, first.ticket_number)?;
//! assert!(playground.get_onsite_kid(site, second.ticket_number).is_ok());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod logging;
mod playground;

pub use builder::PlaygroundBuilder;
pub use config::PlaygroundConfig;
pub use error::PlaygroundError;
pub use logging::init_tracing;
pub use playground::Playground;

/// Re-export of the site layer.
pub use playsite_site as site;

/// Re-export of the equipment catalog.
pub use playsite_catalog as catalog;

/// Re-export of the shared types.
pub use playsite_protocol as protocol;

pub mod prelude {
    pub use crate::{Playground, PlaygroundBuilder, PlaygroundConfig, PlaygroundError};

    pub use playsite_protocol::{
        Equipment, EquipmentId, EquipmentInfo, EquipmentKind, EquipmentRequest, Kid, KidId,
        KidRequest, KidStatus, PlaySiteRequest, SiteId, TicketNumber,
    };

    pub use playsite_site::{
        AlwaysAccept, CoinFlip, EnqueuePolicy, EnqueuePolicyConfig, ErrorKind, PlaySite,
        PlaySiteSnapshot, PlaySiteSummary, QueueLimit,
    };
}
