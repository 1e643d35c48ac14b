//! Multi-valued indices over decoded catalogs.
//!
//! - [`multimap`]: insertion-ordered map whose keys may own several values
//! - [`catalog`]: tag, name-hash and content-hash lookups for a [`Catalog`](crate::Catalog)

pub mod catalog;
pub mod multimap;

pub use catalog::CatalogIndex;
pub use multimap::{IndexMultiMap, Slot};
