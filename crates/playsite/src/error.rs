//! Unified error type for the playsite crates.

use playsite_catalog::CatalogError;
use playsite_site::{ErrorKind, SiteError};

/// Top-level error that wraps every layer's errors.
///
/// When using the `playsite` facade, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant generates the `From` impls, so `?` converts
/// layer errors automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaygroundError {
    /// An equipment catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A site operation failed (not found, full, age, policy, ...).
    #[error(transparent)]
    Site(#[from] SiteError),
}

impl PlaygroundError {
    /// The flat failure kind, for mapping onto transport responses.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => ErrorKind::NotFound,
            Self::Site(err) => err.kind(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
