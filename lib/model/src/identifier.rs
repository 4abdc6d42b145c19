use std::fmt::Debug;
use std::hash::Hash;

/// An opaque handle for an RDF term.
///
/// Identifiers are small copyable values with a total order. The index
/// structures use them as keys of their nested levels; the mapping between
/// identifiers and the terms they stand for is maintained elsewhere.
pub trait Identifier:
    Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord
{
}

impl Identifier for u8 {}
impl Identifier for u16 {}
impl Identifier for u32 {}
impl Identifier for u64 {}
impl Identifier for usize {}
