//! Site registry: creates, tracks, and routes operations to play sites.

use std::sync::Arc;

use dashmap::DashMap;
use playsite_catalog::EquipmentType;
use playsite_protocol::{
    Equipment, EquipmentId, Kid, KidRequest, PlaySiteRequest, SiteId, TicketNumber,
};

use crate::{
    EnqueuePolicy, PlaySite, PlaySiteSnapshot, SiteConfig, SiteError, SiteHandle,
    VisitorCounter,
};

/// Owns every play site and the visitor counter.
///
/// This is the entry point for site operations from higher layers. It is
/// `Sync`: share it behind an `Arc` and call it from any thread.
///
/// # Locking
///
/// The site map is a `DashMap`, so lookups and inserts on different
/// shards don't contend. Each operation clones the site's
/// [`SiteHandle`] out of the map, releases the map, then takes the site's
/// own lock for the whole operation. Sites are never removed, so a handle
/// stays valid for the life of the registry.
pub struct SiteRegistry {
    sites: DashMap<SiteId, SiteHandle>,
    visitors: VisitorCounter,
    policy: Arc<dyn EnqueuePolicy>,
    caller_tickets: bool,
}

impl SiteRegistry {
    /// Creates an empty registry with the configured built-in policy.
    pub fn new(config: SiteConfig) -> Self {
        let policy = config.enqueue_policy.build();
        Self::with_policy(config, policy)
    }

    /// Creates an empty registry with a custom enqueue policy.
    ///
    /// `config.enqueue_policy` is ignored.
    pub fn with_policy(config: SiteConfig, policy: Arc<dyn EnqueuePolicy>) -> Self {
        Self {
            sites: DashMap::new(),
            visitors: VisitorCounter::new(),
            policy,
            caller_tickets: config.caller_tickets,
        }
    }

    // -----------------------------------------------------------------
    // Sites
    // -----------------------------------------------------------------

    /// Creates a site and returns its ID.
    ///
    /// Every equipment ID is resolved against the catalog first; if any is
    /// unknown nothing is created. An empty equipment list is accepted here
    /// and refused later on admit.
    pub fn create(&self, request: &PlaySiteRequest) -> Result<SiteId, SiteError> {
        let equipments = request
            .equipments
            .iter()
            .map(|req| -> Result<Equipment, SiteError> {
                let entry = playsite_catalog::resolve(req.id).inspect_err(|_| {
                    tracing::warn!(equipment_id = %req.id, "unknown equipment in site request");
                })?;
                Ok(Equipment {
                    id: entry.id,
                    kind: entry.kind,
                    capacity: req.capacity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let site_id = SiteId::random();
        let site = PlaySite::new(
            site_id,
            request.name.clone(),
            request.age_restriction,
            equipments,
        );
        let capacity = site.capacity();
        self.sites.insert(site_id, SiteHandle::new(site));

        tracing::info!(
            %site_id,
            name = %request.name,
            capacity,
            "play site created"
        );
        Ok(site_id)
    }

    /// Returns a handle to a site.
    pub fn handle(&self, site_id: SiteId) -> Result<SiteHandle, SiteError> {
        self.sites
            .get(&site_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                tracing::debug!(%site_id, "play site does not exist");
                SiteError::NotFound(site_id)
            })
    }

    /// Returns a snapshot of one site.
    pub fn get(&self, site_id: SiteId) -> Result<PlaySiteSnapshot, SiteError> {
        let snapshot = self.handle(site_id)?.snapshot();
        tracing::debug!(
            %site_id,
            occupied = snapshot.occupied_capacity,
            waiting = snapshot.queue_len(),
            "play site read"
        );
        Ok(snapshot)
    }

    /// Snapshots every site. Order is unspecified.
    ///
    /// Each site is read under its own lock; the list as a whole is not
    /// one atomic view.
    pub fn list(&self) -> Vec<PlaySiteSnapshot> {
        let handles: Vec<SiteHandle> =
            self.sites.iter().map(|entry| entry.value().clone()).collect();
        let sites: Vec<PlaySiteSnapshot> = handles.iter().map(SiteHandle::snapshot).collect();
        tracing::debug!(count = sites.len(), "listed play sites");
        sites
    }

    /// Number of sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Looks up an equipment catalog entry.
    pub fn find_equipment(&self, id: EquipmentId) -> Result<EquipmentType, SiteError> {
        playsite_catalog::resolve(id).map_err(|err| {
            tracing::debug!(equipment_id = %id, "equipment not in catalog");
            SiteError::from(err)
        })
    }

    /// Every equipment type a site may install, in catalog order.
    pub fn equipment_catalog(&self) -> Vec<EquipmentType> {
        playsite_catalog::list_all()
    }

    // -----------------------------------------------------------------
    // Kids
    // -----------------------------------------------------------------

    /// Admits a kid onsite and counts the visitor.
    pub fn admit(&self, site_id: SiteId, request: KidRequest) -> Result<Kid, SiteError> {
        let handle = self.handle(site_id)?;
        let mut site = handle.write();
        let kid = site.admit(self.ticket_policy(request))?;
        self.visitors.record();
        Ok(kid)
    }

    /// Removes an onsite kid by ticket, promoting the queue head into the
    /// freed slot. Returns whether a kid was removed.
    pub fn remove(&self, site_id: SiteId, ticket: TicketNumber) -> Result<bool, SiteError> {
        let handle = self.handle(site_id)?;
        let removed = handle.write().remove_onsite(ticket);
        Ok(removed)
    }

    /// Queues a kid, subject to the enqueue policy, and counts the visitor.
    pub fn enqueue(&self, site_id: SiteId, request: KidRequest) -> Result<Kid, SiteError> {
        let handle = self.handle(site_id)?;
        let mut site = handle.write();
        let kid = site.enqueue(self.ticket_policy(request), self.policy.as_ref())?;
        self.visitors.record();
        Ok(kid)
    }

    /// Removes a queued kid by ticket. Returns whether a kid was removed.
    pub fn dequeue(&self, site_id: SiteId, ticket: TicketNumber) -> Result<bool, SiteError> {
        let handle = self.handle(site_id)?;
        let removed = handle.write().dequeue(ticket);
        Ok(removed)
    }

    /// Finds an onsite kid by ticket.
    pub fn find_onsite(&self, site_id: SiteId, ticket: TicketNumber) -> Result<Kid, SiteError> {
        let handle = self.handle(site_id)?;
        let site = handle.read();
        let kid = site
            .find_onsite(ticket)
            .inspect_err(|_| tracing::debug!(%site_id, %ticket, "no onsite kid with ticket"))
            .cloned()?;
        tracing::debug!(%site_id, %ticket, "onsite kid found");
        Ok(kid)
    }

    /// Finds a queued kid by ticket.
    pub fn find_queued(&self, site_id: SiteId, ticket: TicketNumber) -> Result<Kid, SiteError> {
        let handle = self.handle(site_id)?;
        let site = handle.read();
        let kid = site
            .find_queued(ticket)
            .inspect_err(|_| tracing::debug!(%site_id, %ticket, "no queued kid with ticket"))
            .cloned()?;
        tracing::debug!(%site_id, %ticket, "queued kid found");
        Ok(kid)
    }

    /// Every kid on a site: onsite first, then the queue in order.
    pub fn all_kids(&self, site_id: SiteId) -> Result<Vec<Kid>, SiteError> {
        let kids = self.handle(site_id)?.read().all_kids();
        tracing::debug!(%site_id, count = kids.len(), "listed kids of site");
        Ok(kids)
    }

    // -----------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------

    /// Utilization percentage of a site.
    pub fn utilization(&self, site_id: SiteId) -> Result<f64, SiteError> {
        self.handle(site_id)?.read().utilization()
    }

    /// Total successful admits and enqueues across all sites.
    pub fn total_visitors(&self) -> u64 {
        self.visitors.total()
    }

    fn ticket_policy(&self, mut request: KidRequest) -> KidRequest {
        if !self.caller_tickets {
            request.ticket_number = None;
        }
        request
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

impl std::fmt::Debug for SiteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteRegistry")
            .field("sites", &self.sites.len())
            .field("visitors", &self.visitors.total())
            .field("caller_tickets", &self.caller_tickets)
            .finish_non_exhaustive()
    }
}
