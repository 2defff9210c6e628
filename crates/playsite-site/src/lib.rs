//! Play site admission and queueing for playsite.
//!
//! Every site lives behind its own lock inside a [`SiteRegistry`]. Admits,
//! removals, enqueues and dequeues on one site are serialized by that
//! lock; operations on different sites never wait on each other.
//!
//! # Key types
//!
//! - [`SiteRegistry`]: owns every site, routes operations, counts visitors
//! - [`PlaySite`]: the per-site state machine (onsite list + wait queue)
//! - [`SiteHandle`]: shared, lockable reference to one site
//! - [`Calculator`]: utilization formula, selected by equipment kind
//! - [`EnqueuePolicy`]: decides whether a kid may join the wait queue
//! - [`SiteConfig`]: policy and ticket settings

mod config;
mod counter;
mod error;
mod policy;
mod registry;
mod site;
mod snapshot;
mod utilization;

pub use config::{EnqueuePolicyConfig, SiteConfig};
pub use counter::VisitorCounter;
pub use error::{ErrorKind, SiteError};
pub use policy::{AlwaysAccept, CoinFlip, EnqueuePolicy, QueueLimit};
pub use registry::SiteRegistry;
pub use site::{PlaySite, SiteHandle};
pub use snapshot::{PlaySiteSnapshot, PlaySiteSummary};
pub use utilization::Calculator;
