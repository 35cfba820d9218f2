use crate::types::{Node, Side};

use super::{get_child, get_p, set_child, set_p, side};

/// Exchanges the tree positions of `x` and `y`: parent link and both child
/// slots. Node payloads are not touched.
///
/// Handles `y` being a direct child of `x` and vice versa. Returns the
/// (possibly new) root.
pub fn swap<N: Node>(arena: &mut [N], mut root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let x_at = get_p(arena, x).zip(side(arena, x));
    let y_at = get_p(arena, y).zip(side(arena, y));
    let xc = Side::BOTH.map(|s| get_child(arena, x, s));
    let yc = Side::BOTH.map(|s| get_child(arena, y, s));

    for s in Side::BOTH {
        adopt(arena, x, y, s, yc[s.index()]);
        adopt(arena, y, x, s, xc[s.index()]);
    }

    relink_parent(arena, &mut root, y, x_at);
    relink_parent(arena, &mut root, x, y_at);

    root
}

/// Gives `node` the child `other` used to have at `s`; if that child was
/// `node` itself, the two are now linked the other way round.
fn adopt<N: Node>(arena: &mut [N], node: u32, other: u32, s: Side, child: Option<u32>) {
    if child == Some(node) {
        set_child(arena, node, s, Some(other));
        set_p(arena, other, Some(node));
    } else {
        set_child(arena, node, s, child);
        if let Some(c) = child {
            set_p(arena, c, Some(node));
        }
    }
}

/// Hangs `node` at the parent slot its counterpart used to occupy.
fn relink_parent<N: Node>(arena: &mut [N], root: &mut u32, node: u32, at: Option<(u32, Side)>) {
    match at {
        None => {
            *root = node;
            set_p(arena, node, None);
        }
        // `node` was that parent; `adopt` already linked the pair.
        Some((p, _)) if p == node => {}
        Some((p, s)) => {
            set_p(arena, node, Some(p));
            set_child(arena, p, s, Some(node));
        }
    }
}
