use crate::error::AlreadyInstantiatedError;
use crate::scan::MemQuadTreeScanIterator;
use crate::{ComponentOrder, TreeProfile};
use quad_forest_model::{Identifier, IdentifierQuad, IdentifierQuadPattern};
use std::collections::{BTreeMap, BTreeSet};

/// The innermost level: a presence marker for the fourth key of a path.
pub(crate) type LeafLevel<I> = BTreeSet<I>;
/// Maps the third key of a path to its leaf level.
pub(crate) type ThirdLevel<I> = BTreeMap<I, LeafLevel<I>>;
/// Maps the second key of a path to its third level.
pub(crate) type SecondLevel<I> = BTreeMap<I, ThirdLevel<I>>;
/// Maps the first key of a path to its second level.
pub(crate) type RootLevel<I> = BTreeMap<I, SecondLevel<I>>;

/// The instantiated content of a [MemQuadTree]: four nested levels keyed in
/// the tree's storage order, plus the maintained quad count.
///
/// The stored quad set is exactly the set of root-to-leaf paths. Removal
/// prunes sub-maps that become empty, so the structure never holds dead
/// branches.
#[derive(Debug)]
pub(crate) struct MemTreeData<I: Identifier> {
    root: RootLevel<I>,
    len: usize,
}

impl<I: Identifier> MemTreeData<I> {
    fn new() -> Self {
        Self {
            root: BTreeMap::new(),
            len: 0,
        }
    }

    pub(crate) fn root(&self) -> &RootLevel<I> {
        &self.root
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: [I; 4]) -> bool {
        let leaf = self
            .root
            .entry(key[0])
            .or_default()
            .entry(key[1])
            .or_default()
            .entry(key[2])
            .or_default();
        let added = leaf.insert(key[3]);
        if added {
            self.len += 1;
        }
        added
    }

    fn remove(&mut self, key: &[I; 4]) -> bool {
        let Some(second) = self.root.get_mut(&key[0]) else {
            return false;
        };
        let Some(third) = second.get_mut(&key[1]) else {
            return false;
        };
        let Some(leaf) = third.get_mut(&key[2]) else {
            return false;
        };
        if !leaf.remove(&key[3]) {
            return false;
        }

        if leaf.is_empty() {
            third.remove(&key[2]);
            if third.is_empty() {
                second.remove(&key[1]);
                if second.is_empty() {
                    self.root.remove(&key[0]);
                }
            }
        }

        self.len -= 1;
        true
    }

    fn contains(&self, key: &[I; 4]) -> bool {
        self.root
            .get(&key[0])
            .and_then(|second| second.get(&key[1]))
            .and_then(|third| third.get(&key[2]))
            .is_some_and(|leaf| leaf.contains(&key[3]))
    }
}

/// Represents a single permutation of an in-memory quad index.
///
/// The tree nests four [BTreeMap] levels in its [ComponentOrder]. Given the
/// order GSPO, the stored paths look like this:
/// ```text
/// graph ── subject ── predicate ── object
///   1 ──────── 4 ───────── 7 ──────── {2, 9}
///   │          └────────── 8 ──────── {2}
///   └───────── 5 ───────── 7 ──────── {3}
/// ```
///
/// A tree starts in one of two states and the transition between them is
/// one-way:
/// - *uninstantiated*: no structure allocated. Queries about content answer
///   `None`, mutations are refused, and [Self::bulk_load] performs the
///   transition.
/// - *instantiated*: the nested structure exists (possibly empty) and all
///   operations are available.
///
/// A tree that must be emptied is discarded and a fresh one created; there
/// is no transition back.
#[derive(Debug)]
pub struct MemQuadTree<I: Identifier> {
    /// The ordering of the four levels.
    components: ComponentOrder,
    /// The index content. `None` until the tree is instantiated.
    data: Option<MemTreeData<I>>,
}

impl<I: Identifier> MemQuadTree<I> {
    /// Creates a new uninstantiated [MemQuadTree].
    pub fn new(components: ComponentOrder) -> Self {
        Self {
            components,
            data: None,
        }
    }

    /// Creates a new instantiated, empty [MemQuadTree].
    pub fn new_instantiated(components: ComponentOrder) -> Self {
        Self {
            components,
            data: Some(MemTreeData::new()),
        }
    }

    /// Creates a new [MemQuadTree] honoring the profile's instantiation
    /// policy.
    pub fn from_profile(profile: &TreeProfile) -> Self {
        if profile.always_instantiated() {
            Self::new_instantiated(profile.components())
        } else {
            Self::new(profile.components())
        }
    }

    /// Returns the ordering of the tree.
    pub fn components(&self) -> ComponentOrder {
        self.components
    }

    /// Returns true iff the tree is instantiated.
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the number of distinct stored quads, or `None` while the
    /// tree is uninstantiated.
    pub fn len(&self) -> Option<usize> {
        self.data.as_ref().map(MemTreeData::len)
    }

    /// Inserts the `quad`, descending the four levels in storage order and
    /// creating them as needed.
    ///
    /// Returns `Some(true)` if the quad was newly added and `Some(false)`
    /// if it already existed; the count is unchanged in the latter case.
    /// Returns `None` while the tree is uninstantiated: mutation does not
    /// implicitly build the structure, a [Self::bulk_load] has to happen
    /// first.
    pub fn insert(&mut self, quad: &IdentifierQuad<I>) -> Option<bool> {
        let key = self.components.to_storage(quad);
        self.data.as_mut().map(|data| data.insert(key))
    }

    /// Removes the `quad`.
    ///
    /// Returns whether the quad was present, or `None` while the tree is
    /// uninstantiated.
    pub fn remove(&mut self, quad: &IdentifierQuad<I>) -> Option<bool> {
        let key = self.components.to_storage(quad);
        self.data.as_mut().map(|data| data.remove(&key))
    }

    /// Returns whether the `quad` is stored, or `None` while the tree is
    /// uninstantiated.
    pub fn contains(&self, quad: &IdentifierQuad<I>) -> Option<bool> {
        let key = self.components.to_storage(quad);
        self.data.as_ref().map(|data| data.contains(&key))
    }

    /// Builds the structure in a single pass over `quads` and transitions
    /// the tree to the instantiated state. Duplicates collapse.
    ///
    /// Returns an error if the tree is already instantiated; its contents
    /// are left untouched in that case.
    pub fn bulk_load(
        &mut self,
        quads: impl IntoIterator<Item = IdentifierQuad<I>>,
    ) -> Result<(), AlreadyInstantiatedError> {
        if self.data.is_some() {
            return Err(AlreadyInstantiatedError);
        }

        let mut data = MemTreeData::new();
        for quad in quads {
            data.insert(self.components.to_storage(&quad));
        }
        self.data = Some(data);

        Ok(())
    }

    /// Creates a new iterator over all stored quads matching the `pattern`.
    ///
    /// Each call yields an independent traversal; see
    /// [MemQuadTreeScanIterator] for the descent strategy. On an
    /// uninstantiated tree the iterator is empty, as no quads are stored in
    /// that state.
    pub fn scan_quads(
        &self,
        pattern: &IdentifierQuadPattern<I>,
    ) -> MemQuadTreeScanIterator<'_, I> {
        MemQuadTreeScanIterator::new(self, pattern)
    }

    /// Scores how well this tree serves the `pattern`: the length of the
    /// longest prefix of its ordering whose components are all bound.
    ///
    /// Returns `None` if the tree is uninstantiated and `can_build` is
    /// false, meaning the caller forbids building the tree just to answer
    /// a query. This is a normal planning outcome, not a defect. The
    /// computation never mutates the tree.
    pub fn index_conformance(
        &self,
        can_build: bool,
        pattern: &IdentifierQuadPattern<I>,
    ) -> Option<usize> {
        if !can_build && self.data.is_none() {
            return None;
        }
        Some(self.components.conformance_prefix(pattern))
    }

    pub(crate) fn data(&self) -> Option<&MemTreeData<I>> {
        self.data.as_ref()
    }
}
