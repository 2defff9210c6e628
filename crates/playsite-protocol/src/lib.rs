//! Shared vocabulary for the playsite crates.
//!
//! This crate defines the types every other layer speaks:
//!
//! - **Identifiers** ([`SiteId`], [`KidId`], [`TicketNumber`],
//!   [`EquipmentId`]): UUID newtypes that can't be mixed up.
//! - **Requests** ([`PlaySiteRequest`], [`EquipmentRequest`],
//!   [`KidRequest`]): what a caller hands to the core.
//! - **Records** ([`Kid`], [`Equipment`], [`EquipmentInfo`]): what the
//!   core hands back.
//!
//! # Architecture
//!
//! The protocol layer has no behavior of its own. It doesn't know about
//! capacity or queues. It only names things.
//!
//! ```text
//! Catalog (equipment kinds) → Site (state machine) → Playground (facade)
//!              ↑                      ↑                      ↑
//!              └──────────── Protocol (this crate) ──────────┘
//! ```

mod types;

pub use types::{
    Equipment, EquipmentId, EquipmentInfo, EquipmentKind, EquipmentRequest,
    Kid, KidId, KidRequest, KidStatus, PlaySiteRequest, SiteId, TicketNumber,
};
