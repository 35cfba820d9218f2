use crate::error::TreeError;
use crate::types::Side;
use crate::util::{self, extreme, get_child, get_p, rotate, set_child, set_p};

use super::types::{Color, ColoredNode};

/// Color of an optional node; empty slots count as black.
#[inline]
fn color_of<N: ColoredNode>(arena: &[N], n: Option<u32>) -> Color {
    n.map_or(Color::Black, |i| arena[i as usize].color())
}

#[inline]
fn is_red<N: ColoredNode>(arena: &[N], n: Option<u32>) -> bool {
    color_of(arena, n) == Color::Red
}

#[inline]
fn paint<N: ColoredNode>(arena: &mut [N], n: u32, color: Color) {
    arena[n as usize].set_color(color);
}

enum InsertCase {
    /// Parent is black or `node` is the root.
    Settled,
    /// Parent is a red root.
    RedRootParent { parent: u32 },
    RedUncle { parent: u32, uncle: u32, grand: u32 },
    /// Uncle is black or missing; `side` is the parent's side under `grand`.
    Rotate { parent: u32, grand: u32, side: Side },
}

fn insert_case<N: ColoredNode>(arena: &[N], node: u32) -> InsertCase {
    let Some(parent) = get_p(arena, node) else {
        return InsertCase::Settled;
    };
    if !is_red(arena, Some(parent)) {
        return InsertCase::Settled;
    }
    let Some((grand, side)) = get_p(arena, parent).zip(util::side(arena, parent)) else {
        return InsertCase::RedRootParent { parent };
    };
    match get_child(arena, grand, side.opposite()) {
        Some(uncle) if is_red(arena, Some(uncle)) => InsertCase::RedUncle {
            parent,
            uncle,
            grand,
        },
        _ => InsertCase::Rotate {
            parent,
            grand,
            side,
        },
    }
}

/// Attaches `node` as a red leaf at `parent`'s `side` slot, or as the root
/// when `parent` is `None`, then restores the red-black invariants.
///
/// `node` must be detached; any links it carries are dropped.
pub fn insert<N: ColoredNode>(
    arena: &mut [N],
    root: &mut Option<u32>,
    node: u32,
    parent: Option<u32>,
    side: Side,
) {
    arena[node as usize].unlink();
    paint(arena, node, Color::Red);
    let Some(parent) = parent else {
        *root = Some(node);
        paint(arena, node, Color::Black);
        return;
    };
    set_p(arena, node, Some(parent));
    set_child(arena, parent, side, Some(node));

    let mut node = node;
    loop {
        match insert_case(arena, node) {
            InsertCase::Settled => break,
            InsertCase::RedRootParent { parent } => {
                paint(arena, parent, Color::Black);
                break;
            }
            InsertCase::RedUncle {
                parent,
                uncle,
                grand,
            } => {
                log::trace!("insert {node}: red uncle {uncle}, climbing to {grand}");
                paint(arena, parent, Color::Black);
                paint(arena, uncle, Color::Black);
                paint(arena, grand, Color::Red);
                node = grand;
            }
            InsertCase::Rotate {
                mut parent,
                grand,
                side,
            } => {
                if get_child(arena, parent, side.opposite()) == Some(node) {
                    rotate(arena, root, parent, side);
                    parent = node;
                }
                rotate(arena, root, grand, side.opposite());
                paint(arena, parent, Color::Black);
                paint(arena, grand, Color::Red);
                break;
            }
        }
    }

    if let Some(r) = *root {
        paint(arena, r, Color::Black);
    }
}

/// Exchanges the tree positions and colors of `x` and `y`; payloads stay.
///
/// Does nothing unless both nodes are attached to the tree at `root`.
pub fn swap_with<N: ColoredNode>(arena: &mut [N], root: &mut Option<u32>, x: u32, y: u32) {
    let Some(r) = *root else {
        return;
    };
    let attached = |n: u32| n == r || get_p(arena, n).is_some();
    if !attached(x) || !attached(y) {
        log::trace!("swap {x} <-> {y}: detached node, skipped");
        return;
    }
    *root = Some(util::swap(arena, r, x, y));
    let cx = arena[x as usize].color();
    let cy = arena[y as usize].color();
    paint(arena, x, cy);
    paint(arena, y, cx);
}

/// Puts `replacement` where `node` hangs and detaches `node`.
fn splice<N: ColoredNode>(
    arena: &mut [N],
    root: &mut Option<u32>,
    node: u32,
    replacement: Option<u32>,
) {
    let parent_at = get_p(arena, node).zip(util::side(arena, node));
    if let Some(r) = replacement {
        set_p(arena, r, parent_at.map(|(p, _)| p));
    }
    match parent_at {
        Some((p, s)) => set_child(arena, p, s, replacement),
        None => *root = replacement,
    }
    arena[node as usize].unlink();
}

/// Unlinks `node` from the tree rooted at `root`, restoring the red-black
/// invariants. The node keeps its payload; releasing it is up to the caller.
pub fn delete<N: ColoredNode>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
    if get_p(arena, node).is_none() && arena[node as usize].is_leaf() {
        *root = None;
        return;
    }

    let low = get_child(arena, node, Side::Low);
    if let Some(high) = get_child(arena, node, Side::High).filter(|_| low.is_some()) {
        let successor = extreme(arena, high, Side::Low);
        swap_with(arena, root, node, successor);
    }

    let child = get_child(arena, node, Side::Low).or(get_child(arena, node, Side::High));
    if is_red(arena, Some(node)) {
        splice(arena, root, node, child);
        return;
    }
    if let Some(child) = child {
        paint(arena, child, Color::Black);
        splice(arena, root, node, Some(child));
        return;
    }

    let Some((parent, side)) = get_p(arena, node).zip(util::side(arena, node)) else {
        *root = None;
        return;
    };
    splice(arena, root, node, None);
    fix_double_black(arena, root, parent, side);
}

#[derive(Debug)]
enum DeleteCase {
    RedSibling,
    RedFarNephew,
    RedNearNephew,
    RedParent,
    Climb,
}

/// Picks the rebalancing step for a black-height deficit on `parent`'s
/// `side`, together with the sibling subtree root.
fn delete_case<N: ColoredNode>(
    arena: &[N],
    parent: u32,
    side: Side,
) -> Option<(DeleteCase, u32)> {
    let sibling = get_child(arena, parent, side.opposite())?;
    let far = get_child(arena, sibling, side.opposite());
    let near = get_child(arena, sibling, side);
    let case = if is_red(arena, Some(sibling)) {
        DeleteCase::RedSibling
    } else if is_red(arena, far) {
        DeleteCase::RedFarNephew
    } else if is_red(arena, near) {
        DeleteCase::RedNearNephew
    } else if is_red(arena, Some(parent)) {
        DeleteCase::RedParent
    } else {
        DeleteCase::Climb
    };
    Some((case, sibling))
}

fn fix_double_black<N: ColoredNode>(
    arena: &mut [N],
    root: &mut Option<u32>,
    mut parent: u32,
    mut side: Side,
) {
    while let Some((case, sibling)) = delete_case(arena, parent, side) {
        log::trace!("double black under {parent} {side:?}: {case:?}");
        match case {
            // Parent turns red, so the next pass ends in one of the
            // terminating cases.
            DeleteCase::RedSibling => {
                rotate(arena, root, parent, side);
                paint(arena, parent, Color::Red);
                paint(arena, sibling, Color::Black);
            }
            DeleteCase::RedFarNephew => {
                rotate_far_nephew(arena, root, parent, sibling, side);
                return;
            }
            DeleteCase::RedNearNephew => {
                let Some(near) = get_child(arena, sibling, side) else {
                    return;
                };
                rotate(arena, root, sibling, side.opposite());
                paint(arena, sibling, Color::Red);
                paint(arena, near, Color::Black);
                rotate_far_nephew(arena, root, parent, near, side);
                return;
            }
            DeleteCase::RedParent => {
                paint(arena, sibling, Color::Red);
                paint(arena, parent, Color::Black);
                return;
            }
            DeleteCase::Climb => {
                paint(arena, sibling, Color::Red);
                let Some((grand, s)) = get_p(arena, parent).zip(util::side(arena, parent)) else {
                    return;
                };
                parent = grand;
                side = s;
            }
        }
    }
}

fn rotate_far_nephew<N: ColoredNode>(
    arena: &mut [N],
    root: &mut Option<u32>,
    parent: u32,
    sibling: u32,
    side: Side,
) {
    let far = get_child(arena, sibling, side.opposite());
    rotate(arena, root, parent, side);
    let parent_color = arena[parent as usize].color();
    paint(arena, sibling, parent_color);
    paint(arena, parent, Color::Black);
    if let Some(far) = far {
        paint(arena, far, Color::Black);
    }
}

/// Verifies link consistency and the red-black invariants of the tree at
/// `root`.
pub fn assert_red_black_tree<N: ColoredNode>(
    arena: &[N],
    root: Option<u32>,
) -> Result<(), TreeError> {
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(TreeError::RootHasParent);
    }
    if is_red(arena, Some(root)) {
        return Err(TreeError::RedRoot);
    }

    fn black_height<N: ColoredNode>(arena: &[N], node: Option<u32>) -> Result<usize, TreeError> {
        let Some(node) = node else {
            return Ok(0);
        };
        let n = &arena[node as usize];
        for side in Side::BOTH {
            let Some(c) = n.child(side) else {
                continue;
            };
            if get_p(arena, c) != Some(node) {
                return Err(TreeError::BrokenParentLink { node });
            }
            if n.is_red() && arena[c as usize].is_red() {
                return Err(TreeError::RedViolation { node });
            }
        }

        let lh = black_height(arena, n.l())?;
        let rh = black_height(arena, n.r())?;
        if lh != rh {
            return Err(TreeError::BlackHeightMismatch { node });
        }
        Ok(lh + usize::from(n.is_black()))
    }

    black_height(arena, Some(root)).map(|_| ())
}
