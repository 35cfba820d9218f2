//! Unbalanced binary search tree with value splitting and explicit
//! rebuild-based balancing.

pub mod tree;
pub mod types;

pub use tree::PlainTree;
pub use types::PlainNode;
