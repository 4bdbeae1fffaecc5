//! Ordered embedded collections for Pumukit documents.
//!
//! A multimedia object keeps its pictures, materials, links and tracks as
//! ordered lists embedded in the document. All four lists obey the same
//! rules, so they are all instances of one type:
//!
//! - [`Embedded`]: anything with a stable, opaque identifier
//! - [`OrderedCollection<T>`]: the ordered list with add / remove-by-id /
//!   find-by-id / move-up / move-down
//!
//! The collection guarantees:
//! - **Uniqueness**: no two items share an identifier
//! - **Stable order**: removal never reorders the survivors
//! - **Adjacent moves**: up/down swap with the direct neighbour only and are
//!   silent no-ops at the boundaries or for unknown identifiers
//!
//! Nothing here persists. Callers mutate in memory and save the owning
//! document themselves, so several moves can share one write.

mod collection;
mod error;

pub use collection::{Embedded, OrderedCollection};
pub use error::{CollectionError, CollectionResult};
