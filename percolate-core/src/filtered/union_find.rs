//! Union-find used to label connected components.
//!
//! Roots carry the size of their set, which doubles as the union-by-size
//! weight, so component sizes are known once every edge has been merged.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count).collect(),
            size: vec![1; node_count],
            components: node_count,
        }
    }

    #[rustfmt::skip]
    pub(super) fn components(&self) -> usize { self.components }

    pub(super) fn size_of_root(&self, root: usize) -> usize {
        self.size.get(root).copied().unwrap_or(0)
    }

    /// Returns the root of `node`, halving the path on the way up.
    pub(super) fn find(&mut self, mut node: usize) -> usize {
        while let Some(&parent) = self.parent.get(node) {
            if parent == node {
                break;
            }
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(node) {
                *slot = grandparent;
            }
            node = grandparent;
        }
        node
    }

    /// Merges the sets holding `left` and `right`, hanging the smaller set
    /// under the larger. Returns `false` when they already shared a root.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let (left, right) = (self.find(left), self.find(right));
        if left == right {
            return false;
        }
        let (small, large) = if self.size_of_root(left) < self.size_of_root(right) {
            (left, right)
        } else {
            (right, left)
        };
        let merged = self.size_of_root(small) + self.size_of_root(large);
        if let Some(slot) = self.parent.get_mut(small) {
            *slot = large;
        }
        if let Some(slot) = self.size.get_mut(large) {
            *slot = merged;
        }
        self.components -= 1;
        true
    }
}
