//! In-memory quad indexes over identifier quads.
//!
//! A quad index represents a particular nesting of the quad components
//! subject, predicate, object, and graph name. For example, an SPOG tree
//! keys its first level by subject while a GPOS tree keys it by graph name.
//! Different shapes of quad patterns are better served by different
//! orderings, and the [ComponentOrder] captures one such ordering as a
//! validated permutation.
//!
//! The central structure is the [MemQuadTree], a single ordering's index
//! with an explicit uninstantiated/instantiated lifecycle. The [QuadForest]
//! wraps exactly one tree, selecting its ordering from a runtime order
//! vector; callers holding several forests over the same logical data can
//! rank them for a pattern via `index_conformance` and route the query to
//! the best one.

mod components;
mod error;
mod forest;
mod profile;
mod scan;
mod tree;

pub use components::{ComponentOrder, QuadComponent};
pub use error::{AlreadyInstantiatedError, InvalidComponentOrderError};
pub use forest::QuadForest;
pub use profile::TreeProfile;
pub use scan::MemQuadTreeScanIterator;
pub use tree::MemQuadTree;
