//! The per-site state machine and the handle that guards it.
//!
//! A [`PlaySite`] owns two containers:
//!
//! ```text
//!            admit                      remove (vacancy)
//! request ─────────→ kids_on_site ←──────────── kid_queue ←───── request
//!                    (admission order)   promote head   enqueue
//! ```
//!
//! All mutation goes through `&mut PlaySite`, which callers only get by
//! holding the [`SiteHandle`]'s write lock. Each mutating method checks
//! every precondition before touching either container, so a failed call
//! never leaves partial state behind.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use playsite_protocol::{Equipment, Kid, KidId, KidRequest, KidStatus, SiteId, TicketNumber};

use crate::{Calculator, EnqueuePolicy, PlaySiteSnapshot, SiteError};

/// A capacity-bounded area that admits kids and queues the overflow.
#[derive(Debug, Clone)]
pub struct PlaySite {
    id: SiteId,
    name: String,
    age_restriction: u32,
    /// Fixed at creation.
    equipments: Vec<Equipment>,
    /// Insertion order is admission order.
    kids_on_site: Vec<Kid>,
    kid_queue: VecDeque<Kid>,
}

impl PlaySite {
    /// Creates an empty site.
    ///
    /// Identical equipment entries collapse into one, keeping first-seen
    /// order.
    pub(crate) fn new(
        id: SiteId,
        name: String,
        age_restriction: u32,
        equipments: Vec<Equipment>,
    ) -> Self {
        let mut unique: Vec<Equipment> = Vec::with_capacity(equipments.len());
        for equipment in equipments {
            if !unique.contains(&equipment) {
                unique.push(equipment);
            }
        }

        Self {
            id,
            name,
            age_restriction,
            equipments: unique,
            kids_on_site: Vec::new(),
            kid_queue: VecDeque::new(),
        }
    }

    pub fn id(&self) -> SiteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Oldest age admitted.
    pub fn age_restriction(&self) -> u32 {
        self.age_restriction
    }

    pub fn equipments(&self) -> &[Equipment] {
        &self.equipments
    }

    /// Kids currently playing, in admission order.
    pub fn kids_on_site(&self) -> &[Kid] {
        &self.kids_on_site
    }

    /// Kids waiting, head first.
    pub fn kid_queue(&self) -> impl ExactSizeIterator<Item = &Kid> {
        self.kid_queue.iter()
    }

    /// Total capacity: the sum of every equipment's capacity.
    pub fn capacity(&self) -> usize {
        self.equipments.iter().map(|e| e.capacity as usize).sum()
    }

    /// Number of kids on site.
    pub fn occupied_capacity(&self) -> usize {
        self.kids_on_site.len()
    }

    /// Returns `true` when no capacity is left.
    pub fn is_full(&self) -> bool {
        self.occupied_capacity() >= self.capacity()
    }

    pub fn queue_len(&self) -> usize {
        self.kid_queue.len()
    }

    /// Returns `true` if the ticket is held onsite or in the queue.
    pub fn holds_ticket(&self, ticket: TicketNumber) -> bool {
        self.kids_on_site.iter().any(|k| k.ticket_number == ticket)
            || self.kid_queue.iter().any(|k| k.ticket_number == ticket)
    }

    /// Looks up a kid on site by ticket.
    ///
    /// # Errors
    /// Returns [`SiteError::KidNotFound`] if no onsite kid holds the ticket.
    /// Queued kids are not searched.
    pub fn find_onsite(&self, ticket: TicketNumber) -> Result<&Kid, SiteError> {
        self.kids_on_site
            .iter()
            .find(|k| k.ticket_number == ticket)
            .ok_or(SiteError::KidNotFound {
                site_id: self.id,
                ticket,
            })
    }

    /// Looks up a queued kid by ticket.
    ///
    /// # Errors
    /// Returns [`SiteError::KidNotFound`] if no queued kid holds the ticket.
    pub fn find_queued(&self, ticket: TicketNumber) -> Result<&Kid, SiteError> {
        self.kid_queue
            .iter()
            .find(|k| k.ticket_number == ticket)
            .ok_or(SiteError::KidNotFound {
                site_id: self.id,
                ticket,
            })
    }

    /// Every kid on the site: onsite first, then the queue in order.
    pub fn all_kids(&self) -> Vec<Kid> {
        self.kids_on_site
            .iter()
            .chain(self.kid_queue.iter())
            .cloned()
            .collect()
    }

    /// Utilization under the calculator selected for this site's equipment.
    pub fn utilization(&self) -> Result<f64, SiteError> {
        Calculator::select(&self.equipments).calculate(self)
    }

    /// An owned copy of the site, for handing out past the lock.
    pub fn snapshot(&self) -> PlaySiteSnapshot {
        PlaySiteSnapshot::from(self)
    }

    // -----------------------------------------------------------------
    // State transitions
    // -----------------------------------------------------------------

    /// Admits a kid onsite.
    ///
    /// Checks run in a fixed order so the error is deterministic: missing
    /// equipment, then fullness, then age, then ticket reuse. An over-age
    /// kid at a full site gets `PlaySiteFull`.
    pub(crate) fn admit(&mut self, request: KidRequest) -> Result<Kid, SiteError> {
        if self.equipments.is_empty() {
            tracing::warn!(
                site_id = %self.id,
                kid = %request.name,
                "admission refused, no equipment"
            );
            return Err(SiteError::NoEquipmentFound(self.id));
        }
        if self.is_full() {
            tracing::warn!(
                site_id = %self.id,
                kid = %request.name,
                capacity = self.capacity(),
                "admission refused, site full"
            );
            return Err(SiteError::PlaySiteFull(self.id));
        }
        self.check_age(&request)?;
        let ticket = self.issue_ticket(&request)?;

        let kid = Kid {
            id: KidId::random(),
            name: request.name,
            age: request.age,
            ticket_number: ticket,
            status: KidStatus::Playing,
        };
        self.kids_on_site.push(kid.clone());

        tracing::info!(
            site_id = %self.id,
            %ticket,
            kid = %kid.name,
            occupied = self.occupied_capacity(),
            capacity = self.capacity(),
            "kid admitted"
        );
        Ok(kid)
    }

    /// Removes a kid from the onsite list and promotes the queue head into
    /// the freed slot.
    ///
    /// Returns whether a kid was removed; a promotion alone doesn't count.
    pub(crate) fn remove_onsite(&mut self, ticket: TicketNumber) -> bool {
        let Some(index) = self
            .kids_on_site
            .iter()
            .position(|k| k.ticket_number == ticket)
        else {
            tracing::debug!(site_id = %self.id, %ticket, "no onsite kid to remove");
            return false;
        };

        let removed = self.kids_on_site.remove(index);
        tracing::info!(
            site_id = %self.id,
            %ticket,
            kid = %removed.name,
            "kid removed from site"
        );

        if self.occupied_capacity() < self.capacity() {
            if let Some(mut next) = self.kid_queue.pop_front() {
                next.status = KidStatus::Playing;
                tracing::info!(
                    site_id = %self.id,
                    ticket = %next.ticket_number,
                    kid = %next.name,
                    waiting = self.kid_queue.len(),
                    "kid promoted from queue"
                );
                self.kids_on_site.push(next);
            }
        }

        true
    }

    /// Appends a kid to the wait queue.
    ///
    /// Age and ticket checks run before the policy is consulted, so a
    /// request that would fail anyway never consumes a policy decision.
    pub(crate) fn enqueue(
        &mut self,
        request: KidRequest,
        policy: &dyn EnqueuePolicy,
    ) -> Result<Kid, SiteError> {
        self.check_age(&request)?;
        let ticket = self.issue_ticket(&request)?;

        if !policy.should_accept(self) {
            tracing::warn!(
                site_id = %self.id,
                kid = %request.name,
                waiting = self.kid_queue.len(),
                "enqueue rejected by policy"
            );
            return Err(SiteError::EnqueueRejected {
                site_id: self.id,
                name: request.name,
            });
        }

        let kid = Kid {
            id: KidId::random(),
            name: request.name,
            age: request.age,
            ticket_number: ticket,
            status: KidStatus::Waiting,
        };
        self.kid_queue.push_back(kid.clone());

        tracing::info!(
            site_id = %self.id,
            %ticket,
            kid = %kid.name,
            waiting = self.kid_queue.len(),
            "kid enqueued"
        );
        Ok(kid)
    }

    /// Removes a kid from the wait queue. Never promotes.
    pub(crate) fn dequeue(&mut self, ticket: TicketNumber) -> bool {
        let Some(index) = self
            .kid_queue
            .iter()
            .position(|k| k.ticket_number == ticket)
        else {
            tracing::debug!(site_id = %self.id, %ticket, "no queued kid to remove");
            return false;
        };

        if let Some(removed) = self.kid_queue.remove(index) {
            tracing::info!(
                site_id = %self.id,
                %ticket,
                kid = %removed.name,
                "kid removed from queue"
            );
        }
        true
    }

    fn check_age(&self, request: &KidRequest) -> Result<(), SiteError> {
        if request.age > self.age_restriction {
            tracing::warn!(
                site_id = %self.id,
                kid = %request.name,
                age = request.age,
                limit = self.age_restriction,
                "kid exceeds age restriction"
            );
            return Err(SiteError::AgeRestriction {
                site_id: self.id,
                name: request.name.clone(),
                age: request.age,
            });
        }
        Ok(())
    }

    /// Uses the caller's ticket if it carries one, otherwise issues a
    /// fresh ticket. A caller ticket already held on this site is refused.
    fn issue_ticket(&self, request: &KidRequest) -> Result<TicketNumber, SiteError> {
        match request.ticket_number {
            Some(ticket) if self.holds_ticket(ticket) => {
                tracing::warn!(site_id = %self.id, %ticket, "ticket already in use");
                Err(SiteError::DuplicateTicket {
                    site_id: self.id,
                    ticket,
                })
            }
            Some(ticket) => Ok(ticket),
            None => Ok(TicketNumber::random()),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteHandle
// ---------------------------------------------------------------------------

/// Shared reference to one site and its lock.
///
/// Cheap to clone: it's an `Arc`. The registry stores one per site and
/// hands out clones so callers never hold the registry map while waiting
/// on a site lock.
///
/// Poisoned locks are recovered rather than propagated. Mutations only
/// touch the containers after all checks pass, so a panic inside the
/// lock can't leave a half-applied operation.
#[derive(Debug, Clone)]
pub struct SiteHandle {
    site_id: SiteId,
    inner: Arc<RwLock<PlaySite>>,
}

impl SiteHandle {
    pub(crate) fn new(site: PlaySite) -> Self {
        Self {
            site_id: site.id(),
            inner: Arc::new(RwLock::new(site)),
        }
    }

    /// Returns the site's ID without locking.
    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    /// Shared access for consistent reads.
    pub fn read(&self) -> RwLockReadGuard<'_, PlaySite> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access for a whole mutating operation.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, PlaySite> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes the read lock and copies the site out.
    pub fn snapshot(&self) -> PlaySiteSnapshot {
        self.read().snapshot()
    }
}
