//! Red-black tree: colored nodes kept at logarithmic depth by rotation and
//! recoloring on insert and delete.

pub mod tree;
pub mod types;
pub mod util;

pub use tree::BalancedTree;
pub use types::{BalancedNode, Color, ColoredNode};
pub use util::{assert_red_black_tree, delete, insert, swap_with};
