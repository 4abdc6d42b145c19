use crate::tree::{LeafLevel, MemQuadTree, SecondLevel, ThirdLevel};
use crate::ComponentOrder;
use quad_forest_model::{Identifier, IdentifierQuad, IdentifierQuadPattern};
use std::collections::{btree_map, btree_set, BTreeMap};

/// Restricts a level to the single bound key, or walks all children.
fn level_range<'a, I: Identifier, TInner>(
    level: &'a BTreeMap<I, TInner>,
    selector: Option<I>,
) -> btree_map::Range<'a, I, TInner> {
    match selector {
        Some(key) => level.range(key..=key),
        None => level.range(..),
    }
}

fn leaf_range<I: Identifier>(
    leaf: &LeafLevel<I>,
    selector: Option<I>,
) -> btree_set::Range<'_, I> {
    match selector {
        Some(key) => leaf.range(key..=key),
        None => leaf.range(..),
    }
}

/// Iterates over all quads of a [MemQuadTree] that match a pattern.
///
/// The traversal descends the four levels in the tree's storage order. At a
/// level whose component is bound in the pattern, the descent follows that
/// one key, pruning every sibling subtree; at a wildcard level it
/// enumerates all children. Each surviving root-to-leaf path is rebuilt
/// into a logical SPOG quad.
///
/// The iterator borrows the tree for the duration of one traversal. It is
/// finite, and every [MemQuadTree::scan_quads] call starts an independent
/// one.
pub struct MemQuadTreeScanIterator<'a, I: Identifier> {
    /// The ordering of the scanned tree.
    components: ComponentOrder,
    /// The pattern, reordered into the tree's storage layout.
    selectors: [Option<I>; 4],
    /// Entries of the root level still to visit. `None` on an
    /// uninstantiated tree.
    first: Option<btree_map::Range<'a, I, SecondLevel<I>>>,
    /// The current root key and the second-level entries below it.
    second: Option<(I, btree_map::Range<'a, I, ThirdLevel<I>>)>,
    /// The current two-key prefix and the third-level entries below it.
    third: Option<(I, I, btree_map::Range<'a, I, LeafLevel<I>>)>,
    /// The current three-key prefix and the leaf entries below it.
    leaf: Option<(I, I, I, btree_set::Range<'a, I>)>,
}

impl<'a, I: Identifier> MemQuadTreeScanIterator<'a, I> {
    pub(crate) fn new(
        tree: &'a MemQuadTree<I>,
        pattern: &IdentifierQuadPattern<I>,
    ) -> Self {
        let components = tree.components();
        let selectors = components.pattern_to_storage(pattern);
        Self {
            components,
            selectors,
            first: tree
                .data()
                .map(|data| level_range(data.root(), selectors[0])),
            second: None,
            third: None,
            leaf: None,
        }
    }
}

impl<I: Identifier> Iterator for MemQuadTreeScanIterator<'_, I> {
    type Item = IdentifierQuad<I>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((a, b, c, ids)) = &mut self.leaf {
                if let Some(d) = ids.next() {
                    return Some(self.components.to_logical([*a, *b, *c, *d]));
                }
                self.leaf = None;
            }

            if let Some((a, b, thirds)) = &mut self.third {
                if let Some((c, leaf)) = thirds.next() {
                    self.leaf =
                        Some((*a, *b, *c, leaf_range(leaf, self.selectors[3])));
                    continue;
                }
                self.third = None;
            }

            if let Some((a, seconds)) = &mut self.second {
                if let Some((b, third)) = seconds.next() {
                    self.third =
                        Some((*a, *b, level_range(third, self.selectors[2])));
                    continue;
                }
                self.second = None;
            }

            let (a, second) = self.first.as_mut()?.next()?;
            self.second = Some((*a, level_range(second, self.selectors[1])));
        }
    }
}

// Exhausting one sub-range never revives an outer one, so a returned `None`
// is final.
impl<I: Identifier> std::iter::FusedIterator for MemQuadTreeScanIterator<'_, I> {}
