use std::fmt::Debug;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::types::{Match, Side};
use crate::util::{self, descend, extreme, get_child, get_p};

use super::types::{BalancedNode, Color, ColoredNode};
use super::util as rb;

/// Red-black tree over caller-ordered values.
///
/// Nodes are created detached with [`BalancedTree::alloc`] and placed with
/// [`BalancedTree::insert`], or both at once with
/// [`BalancedTree::insert_by`]. No element count is kept; [`BalancedTree::size`]
/// walks the tree.
#[derive(Clone, Debug)]
pub struct BalancedTree<T> {
    root: Option<u32>,
    arena: Arena<BalancedNode<T>>,
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BalancedTree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            arena: Arena::default(),
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn size(&self) -> usize {
        util::size(self.nodes(), self.root)
    }

    pub fn height(&self) -> usize {
        util::height(self.nodes(), self.root)
    }

    pub fn nodes(&self) -> &[BalancedNode<T>] {
        self.arena.nodes()
    }

    pub fn is_live(&self, node: u32) -> bool {
        self.arena.is_live(node)
    }

    pub fn value(&self, node: u32) -> Option<&T> {
        self.arena.get(node).and_then(|n| n.node.v.as_ref())
    }

    pub fn value_mut(&mut self, node: u32) -> Option<&mut T> {
        self.arena.get_mut(node).and_then(|n| n.node.v.as_mut())
    }

    pub fn color(&self, node: u32) -> Option<Color> {
        self.arena
            .get(node)
            .filter(|n| n.node.v.is_some())
            .map(|n| n.color())
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

    pub fn grand_parent(&self, node: u32) -> Option<u32> {
        util::grand_parent(self.nodes(), node)
    }

    pub fn sibling(&self, node: u32) -> Option<u32> {
        util::sibling(self.nodes(), node)
    }

    pub fn uncle(&self, node: u32) -> Option<u32> {
        util::uncle(self.nodes(), node)
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

    /// Leftmost node of `node`'s high subtree. Never looks above `node`.
    pub fn in_order_successor(&self, node: u32) -> Option<u32> {
        self.child(node, Side::High)
            .map(|c| extreme(self.nodes(), c, Side::Low))
    }

    /// Rightmost node of `node`'s low subtree. Never looks above `node`.
    pub fn in_order_predecessor(&self, node: u32) -> Option<u32> {
        self.child(node, Side::Low)
            .map(|c| extreme(self.nodes(), c, Side::High))
    }

    /// In-order walk calling `visit(node, depth)`, root at depth 0.
    pub fn traverse<F: FnMut(u32, usize)>(&self, visit: F) {
        util::traverse(self.nodes(), self.root, visit)
    }

    /// Values in in-order sequence.
    pub fn flatten(&self) -> Vec<&T> {
        let nodes = self.nodes();
        let mut out = Vec::new();
        util::traverse(nodes, self.root, |i, _| {
            if let Some(v) = nodes[i as usize].node.v.as_ref() {
                out.push(v);
            }
        });
        out
    }

    /// Creates a detached node owned by this tree.
    pub fn alloc(&mut self, value: T) -> u32 {
        self.arena.alloc(BalancedNode::new(value))
    }

    /// Single rotation of `sub_root` toward `direction`; see
    /// [`util::rotate`]. Returns the new subtree root.
    pub fn rotate(&mut self, sub_root: u32, direction: Side) -> u32 {
        util::rotate(self.arena.nodes_mut(), &mut self.root, sub_root, direction)
    }

    /// Attaches the detached `node` at `parent`'s `side` slot (or as the
    /// root when `parent` is `None`) and rebalances.
    pub fn insert(&mut self, node: u32, parent: Option<u32>, side: Side) {
        rb::insert(self.arena.nodes_mut(), &mut self.root, node, parent, side);
    }

    /// Allocates `value` and inserts it where `comparer(value, existing)`
    /// leads from the root.
    pub fn insert_by<C>(&mut self, value: T, comparer: C) -> u32
    where
        C: Fn(&T, &T) -> Side,
    {
        let at = self
            .root
            .map(|root| descend(self.nodes(), root, &value, |n| n.node.v.as_ref(), comparer));
        let node = self.alloc(value);
        match at {
            Some((parent, side)) => self.insert(node, Some(parent), side),
            None => self.insert(node, None, Side::Low),
        }
        node
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

    /// Removes `node` from the tree and returns its value.
    ///
    /// A node that was allocated but never inserted is simply released.
    pub fn delete(&mut self, node: u32) -> Option<T> {
        if !self.is_live(node) {
            return None;
        }
        let attached = self.parent(node).is_some() || self.root == Some(node);
        if attached {
            rb::delete(self.arena.nodes_mut(), &mut self.root, node);
            log::trace!("delete {node}: root now {:?}", self.root);
        }
        self.arena.release(node)
    }

    /// Exchanges the tree positions and colors of `node` and `other`; each
    /// keeps its own value. A no-op when either node is not in the tree.
    pub fn swap_with(&mut self, node: u32, other: u32) {
        rb::swap_with(self.arena.nodes_mut(), &mut self.root, node, other);
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        log::debug!("clear");
    }

    pub fn assert_valid(&self) -> Result<(), TreeError> {
        rb::assert_red_black_tree(self.nodes(), self.root)
    }
}

impl<T: Debug> BalancedTree<T> {
    /// Multi-line dump of the tree for debugging.
    pub fn print(&self) -> String {
        util::print(self.nodes(), self.root, "", &|i, n: &BalancedNode<T>| {
            let color = if n.is_black() { "black" } else { "red" };
            format!("Node[{i}] {color} {:?}", n.node.v)
        })
    }
}
