use crate::types::{Node, Side};

use super::{get_child, get_p, set_child, set_p, side};

/// Single rotation of `sub_root` toward `direction`.
///
/// The pivot is `sub_root`'s child on the opposite side; it takes
/// `sub_root`'s place, and its `direction` child moves across to become
/// `sub_root`'s new `opposite(direction)` child. `root` is updated when
/// `sub_root` was the tree root. Returns the new subtree root, or `sub_root`
/// itself when there is no pivot.
///
/// ```text
///     s                 p
///    / \      Low      / \
///   a   p     -->     s   c
///      / \           / \
///     b   c         a   b
/// ```
pub fn rotate<N: Node>(
    arena: &mut [N],
    root: &mut Option<u32>,
    sub_root: u32,
    direction: Side,
) -> u32 {
    let away = direction.opposite();
    let Some(pivot) = get_child(arena, sub_root, away) else {
        return sub_root;
    };
    let parent = get_p(arena, sub_root);
    let parent_side = side(arena, sub_root);

    let inner = get_child(arena, pivot, direction);
    set_child(arena, sub_root, away, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(sub_root));
    }

    set_child(arena, pivot, direction, Some(sub_root));
    set_p(arena, sub_root, Some(pivot));
    set_p(arena, pivot, parent);
    match (parent, parent_side) {
        (Some(parent), Some(parent_side)) => set_child(arena, parent, parent_side, Some(pivot)),
        _ => *root = Some(pivot),
    }

    log::trace!("rotate {sub_root} {direction:?}: {pivot} promoted");
    pivot
}
