//! Node relationship algebra shared by both tree families.
//!
//! Every function takes the arena slice plus node indices and works purely on
//! the [`Node`] links, so the same code serves plain and colored nodes.
//!
//! - `rotate.rs` -> single rotations
//! - `swap.rs` -> positional swap of two nodes
//! - `print.rs` -> debug dump

pub mod print;
pub mod rotate;
pub mod swap;

use crate::types::{Node, Side};

pub use print::{print, write_tree};
pub use rotate::rotate;
pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_child<N: Node>(arena: &[N], idx: u32, side: Side) -> Option<u32> {
    arena[idx as usize].child(side)
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_child<N: Node>(arena: &mut [N], idx: u32, side: Side, v: Option<u32>) {
    arena[idx as usize].set_child(side, v);
}

/// Which slot of its parent `n` occupies; `None` for a root.
///
/// Decided by comparing against the parent's low slot only, so a node whose
/// parent does not actually hold it reports `High`.
pub fn side<N: Node>(arena: &[N], n: u32) -> Option<Side> {
    let p = get_p(arena, n)?;
    Some(if get_child(arena, p, Side::Low) == Some(n) {
        Side::Low
    } else {
        Side::High
    })
}

pub fn grand_parent<N: Node>(arena: &[N], n: u32) -> Option<u32> {
    get_p(arena, get_p(arena, n)?)
}

pub fn sibling<N: Node>(arena: &[N], n: u32) -> Option<u32> {
    let p = get_p(arena, n)?;
    get_child(arena, p, side(arena, n)?.opposite())
}

pub fn uncle<N: Node>(arena: &[N], n: u32) -> Option<u32> {
    sibling(arena, get_p(arena, n)?)
}

/// Walks up from `n` until reaching a node that hangs on the side opposite
/// to `side`, and returns that node's parent.
///
/// `first_ancestor_on_side(n, Low)` is the nearest ancestor smaller than `n`.
pub fn first_ancestor_on_side<N: Node>(arena: &[N], n: u32, side: Side) -> Option<u32> {
    let wanted = side.opposite();
    let mut curr = n;
    while let Some(p) = get_p(arena, curr) {
        if get_child(arena, p, wanted) == Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// Follows `side` links from `n` down to the subtree extreme.
pub fn extreme<N: Node>(arena: &[N], n: u32, side: Side) -> u32 {
    let mut curr = n;
    while let Some(c) = get_child(arena, curr, side) {
        curr = c;
    }
    curr
}

#[inline]
pub fn min_below<N: Node>(arena: &[N], n: u32) -> u32 {
    extreme(arena, n, Side::Low)
}

#[inline]
pub fn max_below<N: Node>(arena: &[N], n: u32) -> u32 {
    extreme(arena, n, Side::High)
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| min_below(arena, r))
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| max_below(arena, r))
}

/// In-order neighbour of `n` in direction `side`.
pub fn step<N: Node>(arena: &[N], n: u32, side: Side) -> Option<u32> {
    match get_child(arena, n, side) {
        Some(c) => Some(extreme(arena, c, side.opposite())),
        None => first_ancestor_on_side(arena, n, side),
    }
}

/// In-order predecessor.
#[inline]
pub fn prev<N: Node>(arena: &[N], n: u32) -> Option<u32> {
    step(arena, n, Side::Low)
}

/// In-order successor.
#[inline]
pub fn next<N: Node>(arena: &[N], n: u32) -> Option<u32> {
    step(arena, n, Side::High)
}

/// In-order walk from `root`, calling `visit(node, depth)` with the root at
/// depth 0.
///
/// Uses an explicit stack, so degenerate chains cost heap, not call stack.
pub fn traverse<N, F>(arena: &[N], root: Option<u32>, mut visit: F)
where
    N: Node,
    F: FnMut(u32, usize),
{
    let mut stack: Vec<(u32, usize)> = Vec::new();
    let mut curr = root.map(|r| (r, 0));
    loop {
        while let Some((i, depth)) = curr {
            stack.push((i, depth));
            curr = get_child(arena, i, Side::Low).map(|l| (l, depth + 1));
        }
        let Some((i, depth)) = stack.pop() else {
            return;
        };
        visit(i, depth);
        curr = get_child(arena, i, Side::High).map(|r| (r, depth + 1));
    }
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    traverse(arena, root, |_, _| count += 1);
    count
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut deepest = None;
    traverse(arena, root, |_, depth| {
        deepest = Some(deepest.map_or(depth, |d: usize| d.max(depth)));
    });
    deepest.map_or(0, |d| d + 1)
}

/// Descends from `start` along `comparer(value, existing)` until the chosen
/// slot is empty; returns the node owning that slot and the slot's side.
pub(crate) fn descend<N, T, F, C>(
    arena: &[N],
    start: u32,
    value: &T,
    value_of: F,
    comparer: C,
) -> (u32, Side)
where
    N: Node,
    F: Fn(&N) -> Option<&T>,
    C: Fn(&T, &T) -> Side,
{
    let mut curr = start;
    loop {
        let side = match value_of(&arena[curr as usize]) {
            Some(existing) => comparer(value, existing),
            None => Side::High,
        };
        match get_child(arena, curr, side) {
            Some(c) => curr = c,
            None => return (curr, side),
        }
    }
}
