//! Fluent construction of a [`Playground`].

use std::sync::Arc;

use playsite_site::{EnqueuePolicy, SiteRegistry};

use crate::{Playground, PlaygroundConfig};

/// Builder for configuring a [`Playground`].
///
/// # Example
///
/// ```rust
/// use playsite::prelude::*;
///
/// let playground = Playground::builder()
///     .config(PlaygroundConfig {
///         caller_tickets: false,
///         ..PlaygroundConfig::default()
///     })
///     .enqueue_policy(QueueLimit::new(10))
///     .build();
/// assert_eq!(playground.total_visitor_count(), 0);
/// ```
#[derive(Default)]
pub struct PlaygroundBuilder {
    config: PlaygroundConfig,
    policy: Option<Arc<dyn EnqueuePolicy>>,
}

impl PlaygroundBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: PlaygroundConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a custom enqueue policy instead of the configured built-in one.
    pub fn enqueue_policy(mut self, policy: impl EnqueuePolicy) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Builds the playground. No sites exist yet.
    pub fn build(self) -> Playground {
        let registry = match self.policy {
            Some(policy) => SiteRegistry::with_policy(self.config.into(), policy),
            None => SiteRegistry::new(self.config.into()),
        };
        tracing::debug!(?registry, "playground built");
        Playground::from_registry(registry)
    }
}

impl std::fmt::Debug for PlaygroundBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaygroundBuilder")
            .field("config", &self.config)
            .field("custom_policy", &self.policy.is_some())
            .finish()
    }
}
