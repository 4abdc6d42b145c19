use thiserror::Error;

/// Rejects order vectors that are not a permutation of the four quad
/// components.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidComponentOrderError {
    /// A component index was outside `0..=3`.
    #[error("component index {0} is out of range (expected 0..=3)")]
    OutOfRange(usize),
    /// A component appeared more than once.
    #[error("duplicate quad component given")]
    DuplicateComponent,
}

/// Bulk loading is only valid while a tree holds no structure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("the tree is already instantiated")]
pub struct AlreadyInstantiatedError;
