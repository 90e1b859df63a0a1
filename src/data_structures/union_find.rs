use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Disjoint-set structure with path compression and union by rank.
///
/// `find` is iterative: it walks parent pointers to the root, then makes a
/// second pass rewriting every visited pointer to point directly at the root,
/// so component depth never becomes a stack-depth problem.
#[derive(Debug, Clone, Default)]
pub struct UnionFind<T>
where
    T: Eq + Hash + Ord + Clone + Debug,
{
    parent: HashMap<T, T>,
    rank: HashMap<T, u32>,
}

impl<T> UnionFind<T>
where
    T: Eq + Hash + Ord + Clone + Debug,
{
    /// Creates an empty structure
    pub fn new() -> Self {
        UnionFind {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }

    /// Creates a structure where every element starts as its own singleton set
    pub fn with_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut uf = UnionFind::new();
        for element in elements {
            uf.make_set(element);
        }
        uf
    }

    /// Adds `x` as a singleton set; no-op if already present
    pub fn make_set(&mut self, x: T) {
        if !self.parent.contains_key(&x) {
            self.parent.insert(x.clone(), x.clone());
            self.rank.insert(x, 0);
        }
    }

    /// Returns the number of tracked elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if no elements are tracked
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root representative of the set containing `x`.
    ///
    /// Unknown elements are adopted as fresh singletons. Every parent pointer
    /// visited on the way up is rewritten to the discovered root.
    pub fn find(&mut self, x: &T) -> T {
        self.make_set(x.clone());

        let mut root = x.clone();
        let mut path = Vec::new();
        loop {
            let parent = self.parent[&root].clone();
            if parent == root {
                break;
            }
            path.push(root);
            root = parent;
        }
        for visited in path {
            self.parent.insert(visited, root.clone());
        }
        root
    }

    /// Returns true if `x` and `y` are currently in the same set
    pub fn same_set(&mut self, x: &T, y: &T) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` without mutating anything if both are already in the
    /// same set, which is how Kruskal detects a would-be cycle. The lower-rank
    /// tree goes under the higher-rank root; on a tie the second root goes
    /// under the first and the first's rank increments.
    pub fn union(&mut self, x: &T, y: &T) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        let rank_x = self.rank[&rx];
        let rank_y = self.rank[&ry];
        if rank_x < rank_y {
            self.parent.insert(rx, ry);
        } else if rank_x > rank_y {
            self.parent.insert(ry, rx);
        } else {
            self.parent.insert(ry, rx.clone());
            self.rank.insert(rx, rank_x + 1);
        }
        true
    }

    /// Groups all elements by their current root.
    ///
    /// Roots come out in sorted order and every member list is sorted, so the
    /// grouping is deterministic display data.
    pub fn components(&mut self) -> BTreeMap<T, Vec<T>> {
        let elements: Vec<T> = self.parent.keys().cloned().collect();
        let mut groups: BTreeMap<T, Vec<T>> = BTreeMap::new();
        for element in elements {
            let root = self.find(&element);
            groups.entry(root).or_default().push(element);
        }
        for members in groups.values_mut() {
            members.sort();
        }
        groups
    }
}
