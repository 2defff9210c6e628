//! Core types shared across the playsite crates.
//!
//! Everything here is plain data: identifiers, the requests a caller sends
//! in, and the records the core sends back. All of it is serializable so
//! an outer transport layer can put it on the wire unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a play site.
///
/// Newtype wrapper around a UUID so a `SiteId` can never be passed where a
/// `TicketNumber` is expected, even though both are UUIDs underneath.
///
/// `#[serde(transparent)]` serializes it as the bare UUID string, not as
/// `{ "0": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub Uuid);

impl SiteId {
    /// Generates a fresh random (v4) site ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal, stable identity of a kid.
///
/// Assigned once when the kid is admitted or queued and never reused.
/// Lookups and removals go through [`TicketNumber`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KidId(pub Uuid);

impl KidId {
    /// Generates a fresh random (v4) kid ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for KidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The externally visible identifier of a kid on a site.
///
/// This is what a parent holds on to: every removal and lookup is keyed
/// by ticket number. Within one site a ticket number is unique across
/// both the onsite list and the wait queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(pub Uuid);

impl TicketNumber {
    /// Issues a fresh random (v4) ticket number.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an equipment catalog entry.
///
/// Catalog IDs are fixed UUIDs baked into the catalog table, so there is
/// no `random()` constructor here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(pub Uuid);

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EquipmentKind: the closed set of equipment type tags
// ---------------------------------------------------------------------------

/// The type tag of a piece of equipment.
///
/// The set is closed and known at compile time, which is what lets the
/// utilization layer map tags to calculators with a plain `match`.
///
/// Serialized in `SCREAMING_SNAKE_CASE` (`"DOUBLE_SWINGS"`), which is how
/// the tags appear in existing client payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentKind {
    DoubleSwings,
    Carousel,
    Slide,
    BallPit,
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleSwings => write!(f, "DOUBLE_SWINGS"),
            Self::Carousel => write!(f, "CAROUSEL"),
            Self::Slide => write!(f, "SLIDE"),
            Self::BallPit => write!(f, "BALL_PIT"),
        }
    }
}

// ---------------------------------------------------------------------------
// KidStatus
// ---------------------------------------------------------------------------

/// Which container a kid currently lives in.
///
/// ```text
///   Waiting ──(promotion on vacancy, queue head only)──→ Playing
/// ```
///
/// There is no way back: a playing kid is never re-queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KidStatus {
    /// On site, occupying one unit of capacity.
    Playing,
    /// In the FIFO wait queue.
    Waiting,
}

impl fmt::Display for KidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => write!(f, "PLAYING"),
            Self::Waiting => write!(f, "WAITING"),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A request to admit or queue a kid.
///
/// `ticket_number` is optional: when present (and the playground is
/// configured to honour caller tickets) it becomes the kid's ticket;
/// otherwise a fresh one is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KidRequest {
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<TicketNumber>,
}

impl KidRequest {
    /// Creates a request without a ticket number.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            ticket_number: None,
        }
    }

    /// Attaches a caller-chosen ticket number.
    pub fn with_ticket(mut self, ticket: TicketNumber) -> Self {
        self.ticket_number = Some(ticket);
        self
    }
}

/// One piece of equipment requested for a new site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentRequest {
    /// Catalog ID of the equipment type.
    pub id: EquipmentId,
    /// How many kids this piece holds at once.
    pub capacity: u32,
}

/// A request to create a play site.
///
/// Field validation (non-empty name, non-empty equipment list, capacity at
/// least 1) is the caller's job. The core only checks that every catalog
/// ID resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySiteRequest {
    pub name: String,
    pub age_restriction: u32,
    pub equipments: Vec<EquipmentRequest>,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A kid admitted to, or waiting for, a play site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kid {
    pub id: KidId,
    pub name: String,
    pub age: u32,
    pub ticket_number: TicketNumber,
    pub status: KidStatus,
}

impl Kid {
    /// Returns `true` if the kid is on site.
    pub fn is_playing(&self) -> bool {
        self.status == KidStatus::Playing
    }
}

/// A piece of equipment installed on a specific site.
///
/// `kind` is copied from the catalog when the site is created so the site
/// never has to consult the catalog again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub kind: EquipmentKind,
    pub capacity: u32,
}

/// A catalog entry: an equipment type as listed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentInfo {
    pub id: EquipmentId,
    pub kind: EquipmentKind,
    pub name: String,
}

// =========================================================================
// Tests
// =========================================================================
