use std::fmt::Debug;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::types::{Match, Node, Side};
use crate::util::{self, descend, extreme, get_child, get_p, set_child, set_p};

use super::types::PlainNode;

/// Unbalanced binary search tree over caller-ordered values.
///
/// Ordering is supplied per call: a comparer picks the side a new value
/// descends to, a matcher drives search. Nothing rebalances automatically;
/// [`PlainTree::balance`] is an explicit full rebuild.
///
/// Node handles are `u32` arena indices. They stay valid until the node is
/// removed or culled, or until [`PlainTree::balance`] / [`PlainTree::clear`]
/// rebuild the arena; released indices are recycled.
#[derive(Clone, Debug)]
pub struct PlainTree<T> {
    root: Option<u32>,
    count: usize,
    arena: Arena<PlainNode<T>>,
}

impl<T> Default for PlainTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PlainTree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
            arena: Arena::default(),
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Raw node slice, for use with the [`util`] relationship functions.
    pub fn nodes(&self) -> &[PlainNode<T>] {
        self.arena.nodes()
    }

    pub fn is_live(&self, node: u32) -> bool {
        self.arena.is_live(node)
    }

    pub fn value(&self, node: u32) -> Option<&T> {
        self.arena.get(node).and_then(|n| n.v.as_ref())
    }

    pub fn value_mut(&mut self, node: u32) -> Option<&mut T> {
        self.arena.get_mut(node).and_then(|n| n.v.as_mut())
    }

    pub fn parent(&self, node: u32) -> Option<u32> {
        get_p(self.nodes(), node)
    }

    pub fn child(&self, node: u32, side: Side) -> Option<u32> {
        get_child(self.nodes(), node, side)
    }

    pub fn side(&self, node: u32) -> Option<Side> {
        util::side(self.nodes(), node)
    }

    pub fn first(&self) -> Option<u32> {
        util::first(self.nodes(), self.root)
    }

    pub fn last(&self) -> Option<u32> {
        util::last(self.nodes(), self.root)
    }

    pub fn next(&self, node: u32) -> Option<u32> {
        util::next(self.nodes(), node)
    }

    pub fn prev(&self, node: u32) -> Option<u32> {
        util::prev(self.nodes(), node)
    }

    /// In-order walk calling `visit(node, depth)`, root at depth 0.
    pub fn traverse<F: FnMut(u32, usize)>(&self, visit: F) {
        util::traverse(self.nodes(), self.root, visit)
    }

    pub fn height(&self) -> usize {
        util::height(self.nodes(), self.root)
    }

    /// Inserts `value` below the root, creating the root if the tree is
    /// empty. `comparer(value, existing)` picks the side at each step.
    pub fn add<C>(&mut self, value: T, comparer: C) -> u32
    where
        C: Fn(&T, &T) -> Side,
    {
        match self.root {
            Some(root) => self.attach_below(root, value, comparer),
            None => {
                let node = self.arena.alloc(PlainNode::new(value));
                self.root = Some(node);
                self.count += 1;
                node
            }
        }
    }

    /// Like [`PlainTree::add`], but the descent starts at `parent`.
    ///
    /// Returns `None` when `parent` is not a live node.
    pub fn add_from<C>(&mut self, parent: u32, value: T, comparer: C) -> Option<u32>
    where
        C: Fn(&T, &T) -> Side,
    {
        if !self.is_live(parent) {
            return None;
        }
        Some(self.attach_below(parent, value, comparer))
    }

    fn attach_below<C>(&mut self, start: u32, value: T, comparer: C) -> u32
    where
        C: Fn(&T, &T) -> Side,
    {
        let (at, side) = descend(self.nodes(), start, &value, |n| n.v.as_ref(), comparer);
        let node = self.arena.alloc(PlainNode::with_parent(value, Some(at)));
        set_child(self.arena.nodes_mut(), at, side, Some(node));
        self.count += 1;
        node
    }

    /// Removes `node` and returns its value.
    ///
    /// The child on `high_side` takes over `node`'s slot. When both children
    /// exist, the low-side subtree is hung below the `opposite(high_side)`
    /// extreme of the high-side subtree, so in-order sequence is kept.
    pub fn remove(&mut self, node: u32, high_side: Side) -> Result<T, TreeError> {
        if !self.is_live(node) {
            return Err(TreeError::VacantNode(node));
        }
        let low_side = high_side.opposite();
        let nodes = self.arena.nodes_mut();
        let high = get_child(nodes, node, high_side);
        let low = get_child(nodes, node, low_side);

        let replacement = match (high, low) {
            (Some(high), Some(low)) => {
                let anchor = extreme(nodes, high, low_side);
                set_child(nodes, anchor, low_side, Some(low));
                set_p(nodes, low, Some(anchor));
                Some(high)
            }
            (high, low) => high.or(low),
        };

        let parent_at = get_p(nodes, node).zip(util::side(nodes, node));
        if let Some(r) = replacement {
            set_p(nodes, r, parent_at.map(|(p, _)| p));
        }
        match parent_at {
            Some((p, s)) => set_child(nodes, p, s, replacement),
            None => self.root = replacement,
        }

        self.count -= 1;
        log::trace!("remove {node}: replaced by {replacement:?}");
        self.arena.release(node).ok_or(TreeError::VacantNode(node))
    }

    /// Searches from the root; `matcher(key, existing)` either reports a
    /// hit or names the side to continue on.
    pub fn find<Q, M>(&self, key: &Q, matcher: M) -> Option<u32>
    where
        Q: ?Sized,
        M: Fn(&Q, &T) -> Match,
    {
        let mut curr = self.root;
        while let Some(i) = curr {
            let existing = self.value(i)?;
            curr = match matcher(key, existing) {
                Match::Found => return Some(i),
                Match::Descend(side) => self.child(i, side),
            };
        }
        None
    }

    /// Splits `node`'s value in two.
    ///
    /// `splitter` yields `(low, high)` parts oriented by [`Side`]. The part
    /// belonging to `low_side` moves into a new node that becomes `node`'s
    /// `low_side` child and adopts `node`'s previous `low_side` subtree on
    /// that same side; `node` keeps the other part. Returns `node`.
    ///
    /// # Panics
    ///
    /// `splitter` must not panic. The value is moved into it, so a panic
    /// leaves `node` linked in the tree without a value; [`PlainTree::is_live`]
    /// then reports it vacant and [`PlainTree::assert_valid`] fails until the
    /// node is culled or the tree is cleared.
    pub fn split<S>(&mut self, node: u32, low_side: Side, splitter: S) -> Result<u32, TreeError>
    where
        S: FnOnce(T) -> (T, T),
    {
        let value = self
            .arena
            .get_mut(node)
            .and_then(|n| n.v.take())
            .ok_or(TreeError::VacantNode(node))?;
        let (low_part, high_part) = splitter(value);
        let (moved, kept) = match low_side {
            Side::Low => (low_part, high_part),
            Side::High => (high_part, low_part),
        };

        let fragment = self.arena.alloc(PlainNode::with_parent(moved, Some(node)));
        let nodes = self.arena.nodes_mut();
        nodes[node as usize].v = Some(kept);
        let inherited = get_child(nodes, node, low_side);
        set_child(nodes, fragment, low_side, inherited);
        if let Some(inherited) = inherited {
            set_p(nodes, inherited, Some(fragment));
        }
        set_child(nodes, node, low_side, Some(fragment));
        self.count += 1;
        Ok(node)
    }

    /// [`PlainTree::split`] followed by [`PlainTree::add_from`] starting at
    /// `node`. Returns `(node, added)`.
    pub fn split_add<S, C>(
        &mut self,
        value: T,
        node: u32,
        low_side: Side,
        splitter: S,
        comparer: C,
    ) -> Result<(u32, u32), TreeError>
    where
        S: FnOnce(T) -> (T, T),
        C: Fn(&T, &T) -> Side,
    {
        let node = self.split(node, low_side, splitter)?;
        let added = self
            .add_from(node, value, comparer)
            .ok_or(TreeError::VacantNode(node))?;
        Ok((node, added))
    }

    /// Drops the whole subtree hanging at `node`'s `side` slot and returns
    /// how many nodes it held.
    pub fn cull(&mut self, node: u32, side: Side) -> usize {
        if !self.is_live(node) {
            return 0;
        }
        let Some(orphan) = self.child(node, side) else {
            return 0;
        };

        let mut doomed = Vec::new();
        util::traverse(self.nodes(), Some(orphan), |i, _| doomed.push(i));
        set_child(self.arena.nodes_mut(), node, side, None);
        for &i in &doomed {
            self.arena.release(i);
        }
        self.count -= doomed.len();
        log::debug!("cull {node} {side:?}: {} nodes dropped", doomed.len());
        doomed.len()
    }

    /// Values in in-order sequence.
    pub fn flatten(&self) -> Vec<&T> {
        let nodes = self.nodes();
        let mut out = Vec::with_capacity(self.count);
        util::traverse(nodes, self.root, |i, _| {
            if let Some(v) = nodes[i as usize].v.as_ref() {
                out.push(v);
            }
        });
        out
    }

    /// Rebuilds the tree at minimum height, keeping in-order sequence.
    ///
    /// Every node handle is invalidated.
    pub fn balance(&mut self) {
        let mut order = Vec::with_capacity(self.count);
        util::traverse(self.nodes(), self.root, |i, _| order.push(i));
        let nodes = self.arena.nodes_mut();
        let mut values: Vec<Option<T>> = order
            .into_iter()
            .map(|i| nodes[i as usize].v.take())
            .collect();

        self.arena.clear();
        self.root = self.half_split(None, &mut values);
        self.count = self.arena.capacity();
        log::debug!("balance: {} nodes, height {}", self.count, self.height());
    }

    fn half_split(&mut self, parent: Option<u32>, values: &mut [Option<T>]) -> Option<u32> {
        let mid = values.len() / 2;
        let (low, rest) = values.split_at_mut(mid);
        let (middle, high) = rest.split_first_mut()?;
        let value = middle.take()?;

        let node = self.arena.alloc(PlainNode::with_parent(value, parent));
        let l = self.half_split(Some(node), low);
        let h = self.half_split(Some(node), high);
        self.arena.nodes_mut()[node as usize].c = [l, h];
        Some(node)
    }

    /// Depth of the deepest leaf minus depth of the shallowest one; 0 for an
    /// empty tree.
    pub fn leaf_imbalance(&self) -> usize {
        let nodes = self.nodes();
        let mut bounds: Option<(usize, usize)> = None;
        util::traverse(nodes, self.root, |i, depth| {
            if nodes[i as usize].is_leaf() {
                bounds = Some(match bounds {
                    None => (depth, depth),
                    Some((min, max)) => (min.min(depth), max.max(depth)),
                });
            }
        });
        bounds.map_or(0, |(min, max)| max - min)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.count = 0;
        log::debug!("clear");
    }

    /// Checks link consistency and that the recorded count matches the
    /// reachable nodes.
    pub fn assert_valid(&self) -> Result<(), TreeError> {
        let nodes = self.nodes();
        if let Some(root) = self.root {
            if get_p(nodes, root).is_some() {
                return Err(TreeError::RootHasParent);
            }
        }

        let mut reachable = 0;
        let mut broken = None;
        util::traverse(nodes, self.root, |i, _| {
            reachable += 1;
            let n = &nodes[i as usize];
            let linked = Side::BOTH
                .iter()
                .filter_map(|&s| n.child(s))
                .all(|c| get_p(nodes, c) == Some(i));
            if broken.is_none() && (!linked || n.v.is_none()) {
                broken = Some(i);
            }
        });
        if let Some(node) = broken {
            return Err(TreeError::BrokenParentLink { node });
        }
        if reachable != self.count {
            return Err(TreeError::CountMismatch {
                recorded: self.count,
                reachable,
            });
        }
        Ok(())
    }
}

impl<T: Debug> PlainTree<T> {
    /// Multi-line dump of the tree for debugging.
    pub fn print(&self) -> String {
        util::print(self.nodes(), self.root, "", &|i, n: &PlainNode<T>| {
            format!("Node[{i}] {:?}", n.v)
        })
    }
}
