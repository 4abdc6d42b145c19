use crate::{Identifier, IdentifierQuad};

/// The query-side counterpart of an [IdentifierQuad].
///
/// Each position holds either a bound identifier or `None`, the wildcard.
/// Positions follow the same fixed logical order as quads: subject,
/// predicate, object, graph name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentifierQuadPattern<I: Identifier>(pub [Option<I>; 4]);

impl<I: Identifier> IdentifierQuadPattern<I> {
    /// Creates a new [IdentifierQuadPattern] from its four positions.
    pub fn new(
        subject: Option<I>,
        predicate: Option<I>,
        object: Option<I>,
        graph_name: Option<I>,
    ) -> Self {
        Self([subject, predicate, object, graph_name])
    }

    /// The pattern that matches every quad.
    pub fn unbound() -> Self {
        Self([None; 4])
    }

    /// Returns true if every position is a wildcard.
    pub fn is_unbound(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Checks the `quad` against this pattern.
    ///
    /// A wildcard position matches anything; a bound position requires exact
    /// equality. The result is the conjunction over all four positions. This
    /// is the semantic ground truth that every index-based scan must
    /// reproduce, including for quads a scan never physically visits.
    pub fn matches(&self, quad: &IdentifierQuad<I>) -> bool {
        self.0
            .iter()
            .zip(quad.0.iter())
            .all(|(position, value)| match position {
                None => true,
                Some(bound) => bound == value,
            })
    }
}

impl<I: Identifier> From<[Option<I>; 4]> for IdentifierQuadPattern<I> {
    fn from(positions: [Option<I>; 4]) -> Self {
        Self(positions)
    }
}
