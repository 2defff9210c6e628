//! Playground configuration.

use playsite_site::{EnqueuePolicyConfig, SiteConfig};
use serde::{Deserialize, Serialize};

/// Settings for a [`Playground`](crate::Playground).
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```rust
/// # use playsite::PlaygroundConfig;
/// # use playsite::site::EnqueuePolicyConfig;
/// let config: PlaygroundConfig = serde_json::from_str(
///     r#"{ "enqueue_policy": { "type": "queue_limit", "max_len": 20 } }"#,
/// ).unwrap();
/// assert_eq!(config.enqueue_policy, EnqueuePolicyConfig::QueueLimit { max_len: 20 });
/// assert!(config.caller_tickets);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Which built-in policy decides enqueues. Ignored when the builder is
    /// given a custom policy.
    pub enqueue_policy: EnqueuePolicyConfig,

    /// Honour ticket numbers supplied in kid requests. When `false`, every
    /// kid gets a freshly generated ticket.
    pub caller_tickets: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            enqueue_policy: EnqueuePolicyConfig::default(),
            caller_tickets: true,
        }
    }
}

impl From<PlaygroundConfig> for SiteConfig {
    fn from(config: PlaygroundConfig) -> Self {
        Self {
            enqueue_policy: config.enqueue_policy,
            caller_tickets: config.caller_tickets,
        }
    }
}
