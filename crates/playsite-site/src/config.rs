//! Site registry configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{AlwaysAccept, CoinFlip, EnqueuePolicy, QueueLimit};

// ---------------------------------------------------------------------------
// EnqueuePolicyConfig
// ---------------------------------------------------------------------------

/// Which built-in [`EnqueuePolicy`] a registry should use.
///
/// Custom policies skip this enum entirely and go through
/// [`SiteRegistry::with_policy`](crate::SiteRegistry::with_policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnqueuePolicyConfig {
    /// Accept each enqueue independently with `accept_probability`.
    /// `seed: None` seeds from OS entropy.
    CoinFlip {
        accept_probability: f64,
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Accept every enqueue.
    AlwaysAccept,

    /// Accept while the queue holds fewer than `max_len` kids.
    QueueLimit { max_len: usize },
}

impl Default for EnqueuePolicyConfig {
    fn default() -> Self {
        Self::CoinFlip {
            accept_probability: 0.5,
            seed: None,
        }
    }
}

impl EnqueuePolicyConfig {
    /// Builds the configured policy.
    pub fn build(&self) -> Arc<dyn EnqueuePolicy> {
        match self {
            Self::CoinFlip {
                accept_probability,
                seed: Some(seed),
            } => Arc::new(CoinFlip::seeded(*seed, *accept_probability)),
            Self::CoinFlip {
                accept_probability,
                seed: None,
            } => Arc::new(CoinFlip::new(*accept_probability)),
            Self::AlwaysAccept => Arc::new(AlwaysAccept),
            Self::QueueLimit { max_len } => Arc::new(QueueLimit::new(*max_len)),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`SiteRegistry`](crate::SiteRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Policy consulted on every enqueue.
    #[serde(default)]
    pub enqueue_policy: EnqueuePolicyConfig,

    /// Honour `ticket_number` when a request carries one. When `false`
    /// every kid gets a freshly issued ticket.
    #[serde(default = "default_caller_tickets")]
    pub caller_tickets: bool,
}

fn default_caller_tickets() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            enqueue_policy: EnqueuePolicyConfig::default(),
            caller_tickets: default_caller_tickets(),
        }
    }
}
