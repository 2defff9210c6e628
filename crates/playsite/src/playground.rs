//! The `Playground` service: every operation the outside world calls.
//!
//! This is a thin layer over [`SiteRegistry`]. It owns the registry behind
//! an `Arc`, so a `Playground` clones cheaply into every request handler
//! or task, and it converts layer errors into [`PlaygroundError`].

use std::sync::Arc;

use playsite_protocol::{
    EquipmentId, EquipmentInfo, Kid, KidRequest, PlaySiteRequest, SiteId, TicketNumber,
};
use playsite_site::{PlaySiteSnapshot, PlaySiteSummary, SiteRegistry};

use crate::{PlaygroundBuilder, PlaygroundError};

/// Handle to a set of play sites and their visitor counter.
///
/// All methods take `&self` and are safe to call from many threads at
/// once. Operations on one site are serialized; operations on different
/// sites run in parallel.
#[derive(Debug, Clone)]
pub struct Playground {
    registry: Arc<SiteRegistry>,
}

impl Playground {
    /// Creates a new builder.
    pub fn builder() -> PlaygroundBuilder {
        PlaygroundBuilder::new()
    }

    /// Wraps an existing registry.
    pub fn from_registry(registry: SiteRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The underlying registry, for callers that need site handles.
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------
    // Sites
    // -----------------------------------------------------------------

    /// Creates a play site from a request and returns its ID.
    ///
    /// # Errors
    /// A `NotFound` catalog error if any equipment ID is unknown. Nothing
    /// is created in that case.
    pub fn create_play_site(&self, request: &PlaySiteRequest) -> Result<SiteId, PlaygroundError> {
        Ok(self.registry.create(request)?)
    }

    pub fn get_play_site(&self, site_id: SiteId) -> Result<PlaySiteSnapshot, PlaygroundError> {
        Ok(self.registry.get(site_id)?)
    }

    /// Lists every site, each keyed by its ID.
    pub fn list_play_sites(&self) -> Vec<PlaySiteSummary> {
        self.registry
            .list()
            .into_iter()
            .map(PlaySiteSummary::from)
            .collect()
    }

    // -----------------------------------------------------------------
    // Kids
    // -----------------------------------------------------------------

    /// Admits a kid onsite.
    ///
    /// # Errors
    /// `NoEquipmentFound`, `PlaySiteFull`, `AgeRestriction`, or
    /// `DuplicateTicket`, checked in that order, or `NotFound` for an
    /// unknown site.
    pub fn admit_kid(&self, site_id: SiteId, request: KidRequest) -> Result<Kid, PlaygroundError> {
        Ok(self.registry.admit(site_id, request)?)
    }

    /// Removes an onsite kid and promotes the head of the queue.
    ///
    /// Returns `false` if no onsite kid holds the ticket.
    pub fn remove_kid_onsite(
        &self,
        site_id: SiteId,
        ticket: TicketNumber,
    ) -> Result<bool, PlaygroundError> {
        Ok(self.registry.remove(site_id, ticket)?)
    }

    /// Adds a kid to the back of the wait queue.
    ///
    /// Allowed whether or not the site is full. The enqueue policy may
    /// decline with `EnqueueRejected`.
    pub fn enqueue_kid(
        &self,
        site_id: SiteId,
        request: KidRequest,
    ) -> Result<Kid, PlaygroundError> {
        Ok(self.registry.enqueue(site_id, request)?)
    }

    /// Removes a queued kid. Returns `false` if no queued kid holds the
    /// ticket.
    pub fn remove_kid_from_queue(
        &self,
        site_id: SiteId,
        ticket: TicketNumber,
    ) -> Result<bool, PlaygroundError> {
        Ok(self.registry.dequeue(site_id, ticket)?)
    }

    /// Onsite kids in admission order, then queued kids in queue order.
    pub fn list_kids_of_site(&self, site_id: SiteId) -> Result<Vec<Kid>, PlaygroundError> {
        Ok(self.registry.all_kids(site_id)?)
    }

    pub fn get_onsite_kid(
        &self,
        site_id: SiteId,
        ticket: TicketNumber,
    ) -> Result<Kid, PlaygroundError> {
        Ok(self.registry.find_onsite(site_id, ticket)?)
    }

    pub fn get_queued_kid(
        &self,
        site_id: SiteId,
        ticket: TicketNumber,
    ) -> Result<Kid, PlaygroundError> {
        Ok(self.registry.find_queued(site_id, ticket)?)
    }

    // -----------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------

    /// Utilization percentage of a site, in `0.0..=100.0`.
    ///
    /// # Errors
    /// `DivisionUndefined` when the site's total capacity is zero.
    pub fn get_utilization(&self, site_id: SiteId) -> Result<f64, PlaygroundError> {
        Ok(self.registry.utilization(site_id)?)
    }

    /// Successful admits and enqueues across all sites since startup.
    pub fn total_visitor_count(&self) -> u64 {
        self.registry.total_visitors()
    }

    // -----------------------------------------------------------------
    // Equipment catalog
    // -----------------------------------------------------------------

    pub fn list_equipment_catalog(&self) -> Vec<EquipmentInfo> {
        self.registry
            .equipment_catalog()
            .into_iter()
            .map(|entry| entry.info())
            .collect()
    }

    pub fn resolve_equipment(&self, id: EquipmentId) -> Result<EquipmentInfo, PlaygroundError> {
        Ok(self.registry.find_equipment(id)?.info())
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::builder().build()
    }
}
