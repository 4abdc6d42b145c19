use crate::error::{AlreadyInstantiatedError, InvalidComponentOrderError};
use crate::scan::MemQuadTreeScanIterator;
use crate::tree::MemQuadTree;
use crate::{ComponentOrder, TreeProfile};
use quad_forest_model::{Identifier, IdentifierQuad, IdentifierQuadPattern};

/// Owns exactly one [MemQuadTree], with its ordering selected at
/// construction time from a runtime order vector.
///
/// Every operation is a transparent forward to the single tree; the caller
/// always speaks fixed SPOG terms and the reordering into the tree's
/// storage layout happens internally. The ordering is fixed for the
/// forest's lifetime.
///
/// A system answering arbitrary pattern shapes typically owns several
/// forests over the same logical quad set, one per candidate ordering, and
/// routes each query to the forest reporting the highest
/// [Self::index_conformance]. That coordination, including keeping the
/// forests' contents in sync, is the owner's responsibility.
#[derive(Debug)]
pub struct QuadForest<I: Identifier> {
    tree: MemQuadTree<I>,
}

impl<I: Identifier> QuadForest<I> {
    /// Creates a new [QuadForest] with an uninstantiated tree.
    ///
    /// The `order` vector lists, left to right, the SPOG index (`0..=3`) of
    /// the component indexed at each tree level. Vectors that are not a
    /// permutation of the four components are rejected and no forest is
    /// allocated.
    pub fn try_new(
        order: [usize; 4],
    ) -> Result<Self, InvalidComponentOrderError> {
        let components = ComponentOrder::try_from(order)?;
        Ok(Self {
            tree: MemQuadTree::new(components),
        })
    }

    /// Creates a new [QuadForest] with an instantiated, empty tree.
    ///
    /// The `order` vector is validated exactly like in [Self::try_new].
    pub fn try_new_instantiated(
        order: [usize; 4],
    ) -> Result<Self, InvalidComponentOrderError> {
        let components = ComponentOrder::try_from(order)?;
        Ok(Self {
            tree: MemQuadTree::new_instantiated(components),
        })
    }

    /// Creates a new [QuadForest] from an already validated profile,
    /// honoring its instantiation policy.
    pub fn with_profile(profile: &TreeProfile) -> Self {
        Self {
            tree: MemQuadTree::from_profile(profile),
        }
    }

    /// Returns the ordering of the owned tree.
    pub fn components(&self) -> ComponentOrder {
        self.tree.components()
    }

    /// Returns true iff the owned tree is instantiated.
    pub fn exists(&self) -> bool {
        self.tree.exists()
    }

    /// Returns the number of distinct stored quads, or `None` while the
    /// owned tree is uninstantiated.
    pub fn len(&self) -> Option<usize> {
        self.tree.len()
    }

    /// Inserts the `quad`. See [MemQuadTree::insert].
    pub fn insert(&mut self, quad: &IdentifierQuad<I>) -> Option<bool> {
        self.tree.insert(quad)
    }

    /// Removes the `quad`. See [MemQuadTree::remove].
    pub fn remove(&mut self, quad: &IdentifierQuad<I>) -> Option<bool> {
        self.tree.remove(quad)
    }

    /// Returns whether the `quad` is stored. See [MemQuadTree::contains].
    pub fn contains(&self, quad: &IdentifierQuad<I>) -> Option<bool> {
        self.tree.contains(quad)
    }

    /// Builds the owned tree from `quads`. See [MemQuadTree::bulk_load].
    pub fn bulk_load(
        &mut self,
        quads: impl IntoIterator<Item = IdentifierQuad<I>>,
    ) -> Result<(), AlreadyInstantiatedError> {
        self.tree.bulk_load(quads)
    }

    /// Creates a new iterator over all stored quads matching the
    /// `pattern`. See [MemQuadTree::scan_quads].
    pub fn quads_matching(
        &self,
        pattern: &IdentifierQuadPattern<I>,
    ) -> MemQuadTreeScanIterator<'_, I> {
        self.tree.scan_quads(pattern)
    }

    /// Scores how well the owned tree serves the `pattern`. See
    /// [MemQuadTree::index_conformance].
    pub fn index_conformance(
        &self,
        can_build: bool,
        pattern: &IdentifierQuadPattern<I>,
    ) -> Option<usize> {
        self.tree.index_conformance(can_build, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn invalid_orders_yield_no_forest() {
        assert_eq!(
            QuadForest::<u32>::try_new([0, 0, 1, 2]).err(),
            Some(InvalidComponentOrderError::DuplicateComponent)
        );
        assert_eq!(
            QuadForest::<u32>::try_new_instantiated([0, 0, 1, 2]).err(),
            Some(InvalidComponentOrderError::DuplicateComponent)
        );
        assert_eq!(
            QuadForest::<u32>::try_new([0, 1, 2, 5]).err(),
            Some(InvalidComponentOrderError::OutOfRange(5))
        );
    }

    #[test]
    fn construction_policies_control_instantiation() {
        let lazy = QuadForest::<u32>::try_new([0, 1, 2, 3]).unwrap();
        assert!(!lazy.exists());
        assert_eq!(lazy.len(), None);

        let eager = QuadForest::<u32>::try_new_instantiated([0, 1, 2, 3]).unwrap();
        assert!(eager.exists());
        assert_eq!(eager.len(), Some(0));

        let profile = TreeProfile::try_new([3, 1, 2, 0], true).unwrap();
        let forest = QuadForest::<u32>::with_profile(&profile);
        assert!(forest.exists());
        assert_eq!(forest.components().to_string(), "GPOS");
    }

    #[test]
    fn callers_speak_spog_regardless_of_the_tree_order() {
        // Same data in two forests with different orderings.
        let quads = [[1_u32, 2, 3, 4], [1, 5, 3, 4], [2, 2, 3, 9]]
            .into_iter()
            .map(IdentifierQuad::from)
            .collect::<Vec<_>>();

        let mut spog = QuadForest::<u32>::try_new_instantiated([0, 1, 2, 3]).unwrap();
        let mut gops = QuadForest::<u32>::try_new_instantiated([3, 2, 1, 0]).unwrap();
        for quad in &quads {
            spog.insert(quad);
            gops.insert(quad);
        }

        let pattern = IdentifierQuadPattern::new(Some(1), None, Some(3), None);
        let from_spog = spog.quads_matching(&pattern).collect::<BTreeSet<_>>();
        let from_gops = gops.quads_matching(&pattern).collect::<BTreeSet<_>>();

        assert_eq!(from_spog, from_gops);
        assert_eq!(from_spog.len(), 2);
        assert!(from_spog.iter().all(|quad| pattern.matches(quad)));
    }

    #[test]
    fn conformance_ranks_orders_for_a_pattern() {
        let pattern =
            IdentifierQuadPattern::new(Some(1_u32), Some(2), None, None);

        let spog = QuadForest::<u32>::try_new_instantiated([0, 1, 2, 3]).unwrap();
        let posg = QuadForest::<u32>::try_new_instantiated([1, 2, 0, 3]).unwrap();

        assert_eq!(spog.index_conformance(true, &pattern), Some(2));
        assert_eq!(posg.index_conformance(true, &pattern), Some(1));

        // An uninstantiated forest reports no score when building is
        // forbidden.
        let lazy = QuadForest::<u32>::try_new([0, 1, 2, 3]).unwrap();
        assert_eq!(lazy.index_conformance(false, &pattern), None);
        assert_eq!(lazy.index_conformance(true, &pattern), Some(2));
    }

    #[test]
    fn bulk_load_forwards_to_the_tree() {
        let mut forest = QuadForest::<u32>::try_new([2, 3, 1, 0]).unwrap();
        forest
            .bulk_load([
                IdentifierQuad::new(1, 1, 1, 1),
                IdentifierQuad::new(1, 1, 2, 2),
            ])
            .unwrap();

        assert!(forest.exists());
        assert_eq!(forest.len(), Some(2));
        assert_eq!(
            forest.bulk_load([IdentifierQuad::new(9, 9, 9, 9)]),
            Err(AlreadyInstantiatedError)
        );
        assert_eq!(forest.contains(&IdentifierQuad::new(9, 9, 9, 9)), Some(false));
    }

    #[test]
    fn mutations_on_a_lazy_forest_are_refused() {
        let mut forest = QuadForest::<u32>::try_new([0, 1, 2, 3]).unwrap();
        let quad = IdentifierQuad::new(1, 2, 3, 4);

        assert_eq!(forest.insert(&quad), None);
        assert_eq!(forest.remove(&quad), None);
        assert_eq!(forest.contains(&quad), None);
        assert_eq!(forest.quads_matching(&IdentifierQuadPattern::unbound()).count(), 0);
    }
}
