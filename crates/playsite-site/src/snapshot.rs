//! Owned, serializable copies of site state.
//!
//! Snapshots are taken under a site's read lock, so each one is internally
//! consistent: it never shows a removal without its promotion.

use playsite_protocol::{Equipment, Kid, SiteId};
use serde::{Deserialize, Serialize};

use crate::PlaySite;

/// A point-in-time copy of one site, derived fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySiteSnapshot {
    pub id: SiteId,
    pub name: String,
    pub age_restriction: u32,
    pub equipments: Vec<Equipment>,
    pub kids_on_site: Vec<Kid>,
    pub kid_queue: Vec<Kid>,
    pub capacity: usize,
    pub occupied_capacity: usize,
    pub is_play_site_full: bool,
}

impl PlaySiteSnapshot {
    pub fn queue_len(&self) -> usize {
        self.kid_queue.len()
    }
}

impl From<&PlaySite> for PlaySiteSnapshot {
    fn from(site: &PlaySite) -> Self {
        Self {
            id: site.id(),
            name: site.name().to_string(),
            age_restriction: site.age_restriction(),
            equipments: site.equipments().to_vec(),
            kids_on_site: site.kids_on_site().to_vec(),
            kid_queue: site.kid_queue().cloned().collect(),
            capacity: site.capacity(),
            occupied_capacity: site.occupied_capacity(),
            is_play_site_full: site.is_full(),
        }
    }
}

/// One entry of a site listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySiteSummary {
    pub id: SiteId,
    #[serde(rename = "play-sites")]
    pub play_site: PlaySiteSnapshot,
}

impl From<PlaySiteSnapshot> for PlaySiteSummary {
    fn from(play_site: PlaySiteSnapshot) -> Self {
        Self {
            id: play_site.id,
            play_site,
        }
    }
}
