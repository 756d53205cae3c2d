//! Union-find structures used during hierarchy extraction.
//!
//! Two variants with different contracts. [`LinkageUnionFind`] labels
//! dendrogram merges: every union mints a fresh cluster label, so the
//! structure spans all 2N−1 labels a linkage over N points can produce.
//! [`DisjointSet`] is a plain rank-based disjoint set used when collapsing
//! condensed-tree rows onto their selected ancestors.

const NO_PARENT: usize = usize::MAX;

/// Disjoint set over the 2N−1 cluster labels of a single-linkage run.
#[derive(Clone, Debug)]
pub(super) struct LinkageUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next_label: usize,
}

impl LinkageUnionFind {
    /// Creates the set for `num_points` observations; labels `0..N` are the
    /// points, labels `N..2N-1` are minted by successive unions.
    pub(super) fn new(num_points: usize) -> Self {
        let slots = 2 * num_points - 1;
        let mut size = vec![1; slots];
        for slot in size.iter_mut().skip(num_points) {
            *slot = 0;
        }
        Self {
            parent: vec![NO_PARENT; slots],
            size,
            next_label: num_points,
        }
    }

    /// Returns the current root label of `node`, compressing the walked path.
    pub(super) fn fast_find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != NO_PARENT {
            root = self.parent[root];
        }
        while self.parent[node] != NO_PARENT {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges two root labels beneath a freshly minted label.
    ///
    /// Both arguments must be current roots; after the call, both find to
    /// the new label.
    pub(super) fn union(&mut self, left_root: usize, right_root: usize) {
        let label = self.next_label;
        self.size[label] = self.size[left_root] + self.size[right_root];
        self.parent[left_root] = label;
        self.parent[right_root] = label;
        self.next_label += 1;
    }

    /// Returns the number of points beneath `label`.
    pub(super) fn size(&self, label: usize) -> usize {
        self.size[label]
    }
}

/// Rank-based disjoint set for label extraction.
///
/// Ties attach the second root beneath the first, so unions called as
/// `union(parent, child)` in condensed-row order keep cluster ids as the
/// component representatives.
#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(super) fn new(slots: usize) -> Self {
        Self {
            parent: (0..slots).collect(),
            rank: vec![0; slots],
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != node {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub(super) fn union(&mut self, first: usize, second: usize) {
        let first_root = self.find(first);
        let second_root = self.find(second);
        if first_root == second_root {
            return;
        }
        let first_rank = self.rank[first_root];
        let second_rank = self.rank[second_root];
        if first_rank < second_rank {
            self.parent[first_root] = second_root;
        } else {
            self.parent[second_root] = first_root;
            if first_rank == second_rank {
                self.rank[first_root] = first_rank.saturating_add(1);
            }
        }
    }
}
