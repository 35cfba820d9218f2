//! Arena-based ordered-tree engine.
//!
//! Two building blocks for higher-level ordered containers (maps, interval
//! tables, span-splitting structures):
//!
//! - [`PlainTree`]: unbalanced binary search tree with value splitting,
//!   subtree culling and an explicit half-split rebuild ([`PlainTree::balance`]).
//! - [`BalancedTree`]: red-black tree with guaranteed logarithmic depth.
//!
//! Neither tree stores an ordering. Callers pass a comparer
//! (`Fn(&T, &T) -> Side`), a matcher (`Fn(&Q, &T) -> Match`) or a splitter
//! (`FnOnce(T) -> (T, T)`) to each operation that needs one.
//!
//! Nodes live in a `Vec`-backed arena owned by the tree; all "pointers" are
//! `Option<u32>` indices into it.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Side`], [`Match`], [`Node`] / [`ValueNode`] traits |
//! | [`util`] | relationship algebra: `side`, `sibling`, `uncle`, `next`, `prev`, `traverse`, `rotate`, `swap` |
//! | [`plain`] | [`PlainNode`], [`PlainTree`] |
//! | [`red_black`] | [`BalancedNode`], [`BalancedTree`], insert/delete fix-ups |
//! | [`error`] | [`TreeError`] |
//!
//! # Example
//!
//! ```
//! use ordered_forest::{BalancedTree, Match, Side};
//!
//! let mut tree = BalancedTree::new();
//! for v in [10, 20, 30] {
//!     tree.insert_by(v, |a: &i32, b: &i32| Side::from(a.cmp(b)));
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(tree.value(root), Some(&20));
//! assert!(tree.find(&30, |a: &i32, b: &i32| Match::from(a.cmp(b))).is_some());
//! ```

mod arena;
pub mod error;
pub mod plain;
pub mod red_black;
pub mod types;
pub mod util;

pub use error::TreeError;
pub use plain::{PlainNode, PlainTree};
pub use red_black::{BalancedNode, BalancedTree, Color, ColoredNode};
pub use types::{Match, Node, Side, ValueNode};
