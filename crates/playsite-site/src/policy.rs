//! Enqueue admission policies.
//!
//! Admitting a kid onsite is decided by hard rules (equipment, capacity,
//! age). Joining the wait queue additionally goes through an
//! [`EnqueuePolicy`]: a single method that looks at the site and says yes
//! or no. The registry calls it under the site's write lock, after the age
//! and ticket checks have passed.
//!
//! Three policies ship with the crate:
//! - [`CoinFlip`]: accepts with a fixed probability from a seeded RNG
//! - [`AlwaysAccept`]: never declines
//! - [`QueueLimit`]: declines once the queue reaches a length cap
//!
//! Tests and callers can plug in their own by implementing the trait.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::PlaySite;

/// Decides whether a kid may join a site's wait queue.
///
/// # Trait bounds
///
/// - `Send + Sync` → one policy is shared by every site in the registry
///   and called from whichever thread handles the request.
/// - `'static` → the policy lives as long as the registry.
///
/// # Example
///
/// ```rust
/// use playsite_site::{EnqueuePolicy, PlaySite};
///
/// /// Only queues kids while nobody is playing yet.
/// struct EmptySitesOnly;
///
/// impl EnqueuePolicy for EmptySitesOnly {
///     fn should_accept(&self, site: &PlaySite) -> bool {
///         site.occupied_capacity() == 0
///     }
/// }
/// ```
pub trait EnqueuePolicy: Send + Sync + 'static {
    /// Returns `true` if the kid may be queued on `site`.
    fn should_accept(&self, site: &PlaySite) -> bool;
}

// ---------------------------------------------------------------------------
// CoinFlip
// ---------------------------------------------------------------------------

/// Accepts each enqueue independently with a fixed probability.
///
/// The RNG is owned by the policy and seeded explicitly (or from OS
/// entropy), never taken from global state, so a seeded `CoinFlip`
/// produces the same accept/decline sequence on every run.
#[derive(Debug)]
pub struct CoinFlip {
    rng: Mutex<StdRng>,
    accept_probability: f64,
}

impl CoinFlip {
    /// Creates a coin flip seeded from OS entropy.
    ///
    /// `accept_probability` is clamped to `0.0..=1.0`.
    pub fn new(accept_probability: f64) -> Self {
        Self::from_rng(StdRng::from_os_rng(), accept_probability)
    }

    /// Creates a coin flip with a fixed seed.
    pub fn seeded(seed: u64, accept_probability: f64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), accept_probability)
    }

    fn from_rng(rng: StdRng, accept_probability: f64) -> Self {
        // NaN clamps to NaN, which random_bool rejects.
        let accept_probability = if accept_probability.is_nan() {
            0.0
        } else {
            accept_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: Mutex::new(rng),
            accept_probability,
        }
    }

    /// The probability an enqueue is accepted.
    pub fn accept_probability(&self) -> f64 {
        self.accept_probability
    }
}

impl Default for CoinFlip {
    /// A fair coin.
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl EnqueuePolicy for CoinFlip {
    fn should_accept(&self, _site: &PlaySite) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_bool(self.accept_probability)
    }
}

// ---------------------------------------------------------------------------
// AlwaysAccept
// ---------------------------------------------------------------------------

/// Accepts every enqueue.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAccept;

impl EnqueuePolicy for AlwaysAccept {
    fn should_accept(&self, _site: &PlaySite) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// QueueLimit
// ---------------------------------------------------------------------------

/// Accepts while the site's queue is shorter than `max_len`.
#[derive(Debug, Clone, Copy)]
pub struct QueueLimit {
    max_len: usize,
}

impl QueueLimit {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl EnqueuePolicy for QueueLimit {
    fn should_accept(&self, site: &PlaySite) -> bool {
        site.queue_len() < self.max_len
    }
}
