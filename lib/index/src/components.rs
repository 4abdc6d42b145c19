use crate::error::InvalidComponentOrderError;
use quad_forest_model::{Identifier, IdentifierQuad, IdentifierQuadPattern};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Represents what part of a quad is indexed at a given tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuadComponent {
    /// The subject
    Subject,
    /// The predicate
    Predicate,
    /// The object
    Object,
    /// The graph name
    GraphName,
}

impl QuadComponent {
    /// Returns the index of the component in an SPOG quad.
    pub fn spog_index(&self) -> usize {
        match self {
            QuadComponent::Subject => 0,
            QuadComponent::Predicate => 1,
            QuadComponent::Object => 2,
            QuadComponent::GraphName => 3,
        }
    }

    /// Resolves an SPOG position back into a component.
    pub fn try_from_spog_index(
        index: usize,
    ) -> Result<Self, InvalidComponentOrderError> {
        match index {
            0 => Ok(QuadComponent::Subject),
            1 => Ok(QuadComponent::Predicate),
            2 => Ok(QuadComponent::Object),
            3 => Ok(QuadComponent::GraphName),
            _ => Err(InvalidComponentOrderError::OutOfRange(index)),
        }
    }
}

impl Display for QuadComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadComponent::Subject => write!(f, "S"),
            QuadComponent::Predicate => write!(f, "P"),
            QuadComponent::Object => write!(f, "O"),
            QuadComponent::GraphName => write!(f, "G"),
        }
    }
}

/// Represents a list of *disjunct* quad components, read left to right as
/// the nesting order of one tree.
///
/// A [ComponentOrder] owns the translation between the fixed logical SPOG
/// layout callers speak and the storage layout of a tree built with this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentOrder([QuadComponent; 4]);

impl ComponentOrder {
    /// An SPOG order.
    pub const SPOG: ComponentOrder = ComponentOrder([
        QuadComponent::Subject,
        QuadComponent::Predicate,
        QuadComponent::Object,
        QuadComponent::GraphName,
    ]);

    /// A GSPO order.
    pub const GSPO: ComponentOrder = ComponentOrder([
        QuadComponent::GraphName,
        QuadComponent::Subject,
        QuadComponent::Predicate,
        QuadComponent::Object,
    ]);

    /// An OGPS order.
    pub const OGPS: ComponentOrder = ComponentOrder([
        QuadComponent::Object,
        QuadComponent::GraphName,
        QuadComponent::Predicate,
        QuadComponent::Subject,
    ]);

    /// Tries to create a new [ComponentOrder].
    ///
    /// Returns an error if a [QuadComponent] appears more than once.
    pub fn try_new(
        components: [QuadComponent; 4],
    ) -> Result<Self, InvalidComponentOrderError> {
        let distinct = components.iter().collect::<HashSet<_>>();
        if distinct.len() != components.len() {
            return Err(InvalidComponentOrderError::DuplicateComponent);
        }

        Ok(ComponentOrder(components))
    }

    /// Returns a reference to the inner array.
    pub fn inner(&self) -> &[QuadComponent; 4] {
        &self.0
    }

    /// Reorders a logical SPOG quad into this order's storage layout.
    pub fn to_storage<I: Identifier>(&self, quad: &IdentifierQuad<I>) -> [I; 4] {
        self.0.map(|component| quad.0[component.spog_index()])
    }

    /// Rebuilds the logical SPOG quad from a storage-order key path.
    pub fn to_logical<I: Identifier>(&self, key: [I; 4]) -> IdentifierQuad<I> {
        let mut values = key;
        for (level, component) in self.0.iter().enumerate() {
            values[component.spog_index()] = key[level];
        }
        IdentifierQuad(values)
    }

    /// Reorders a logical SPOG pattern into this order's storage layout.
    pub fn pattern_to_storage<I: Identifier>(
        &self,
        pattern: &IdentifierQuadPattern<I>,
    ) -> [Option<I>; 4] {
        self.0.map(|component| pattern.0[component.spog_index()])
    }

    /// Returns the length of the longest prefix of this order whose
    /// components are all bound in the `pattern`.
    ///
    /// The higher the value, the more of a scan's descent is served by
    /// direct lookups before falling back to enumerating children, so the
    /// better a tree with this order is suited for answering the pattern.
    pub fn conformance_prefix<I: Identifier>(
        &self,
        pattern: &IdentifierQuadPattern<I>,
    ) -> usize {
        self.0
            .iter()
            .take_while(|component| pattern.0[component.spog_index()].is_some())
            .count()
    }
}

impl TryFrom<[usize; 4]> for ComponentOrder {
    type Error = InvalidComponentOrderError;

    fn try_from(order: [usize; 4]) -> Result<Self, Self::Error> {
        let mut components = [QuadComponent::Subject; 4];
        for (slot, index) in components.iter_mut().zip(order) {
            *slot = QuadComponent::try_from_spog_index(index)?;
        }
        Self::try_new(components)
    }
}

impl Display for ComponentOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for component in self.0.iter() {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_order_accepts_unique_components() {
        let ok = ComponentOrder::try_new([
            QuadComponent::GraphName,
            QuadComponent::Subject,
            QuadComponent::Predicate,
            QuadComponent::Object,
        ]);
        assert!(ok.is_ok());
    }

    #[test]
    fn component_order_rejects_duplicate_components() {
        let err = ComponentOrder::try_new([
            QuadComponent::GraphName,
            QuadComponent::Subject,
            QuadComponent::Subject,
            QuadComponent::Object,
        ]);
        assert_eq!(err, Err(InvalidComponentOrderError::DuplicateComponent));
    }

    #[test]
    fn component_order_from_indexes() {
        let order = ComponentOrder::try_from([3, 0, 1, 2]).unwrap();
        assert_eq!(order, ComponentOrder::GSPO);

        assert_eq!(
            ComponentOrder::try_from([0, 0, 1, 2]),
            Err(InvalidComponentOrderError::DuplicateComponent)
        );
        assert_eq!(
            ComponentOrder::try_from([0, 1, 2, 7]),
            Err(InvalidComponentOrderError::OutOfRange(7))
        );
    }

    #[test]
    fn to_storage_gspo() {
        let quad = IdentifierQuad::new(2_u32, 3, 4, 1);
        assert_eq!(ComponentOrder::GSPO.to_storage(&quad), [1, 2, 3, 4]);
    }

    #[test]
    fn to_storage_round_trips_through_to_logical() {
        let quad = IdentifierQuad::new(10_u32, 20, 30, 40);
        for order in [
            ComponentOrder::SPOG,
            ComponentOrder::GSPO,
            ComponentOrder::OGPS,
        ] {
            let key = order.to_storage(&quad);
            assert_eq!(order.to_logical(key), quad);
        }
    }

    #[test]
    fn conformance_counts_the_bound_prefix() {
        let sp_bound =
            IdentifierQuadPattern::new(Some(1_u32), Some(2), None, None);

        assert_eq!(ComponentOrder::SPOG.conformance_prefix(&sp_bound), 2);

        let posg = ComponentOrder::try_from([1, 2, 0, 3]).unwrap();
        assert_eq!(posg.conformance_prefix(&sp_bound), 1);
    }

    #[test]
    fn conformance_is_four_for_fully_bound_patterns() {
        let bound =
            IdentifierQuadPattern::new(Some(1_u32), Some(2), Some(3), Some(4));
        for order in [
            ComponentOrder::SPOG,
            ComponentOrder::GSPO,
            ComponentOrder::OGPS,
        ] {
            assert_eq!(order.conformance_prefix(&bound), 4);
        }
    }

    #[test]
    fn display_spells_the_order() {
        assert_eq!(ComponentOrder::GSPO.to_string(), "GSPO");
        assert_eq!(ComponentOrder::OGPS.to_string(), "OGPS");
    }
}
