//! Equipment catalog for playsite.
//!
//! The catalog is a fixed table seeded at compile time: every equipment
//! type a site may install, with its stable UUID and display name. It is
//! the only place equipment IDs are validated.
//!
//! # Key items
//!
//! - [`resolve`]: look up one entry by ID
//! - [`list_all`]: every entry, in a stable order
//! - [`EquipmentType`]: a catalog entry

mod catalog;
mod error;

pub use catalog::{EquipmentType, id_of, list_all, resolve};
pub use error::CatalogError;
