use thiserror::Error;

/// Failures reported by tree operations and invariant checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} is not a live node of this tree")]
    VacantNode(u32),
    #[error("root has a parent")]
    RootHasParent,
    #[error("root is red")]
    RedRoot,
    #[error("child of node {node} does not point back to it")]
    BrokenParentLink { node: u32 },
    #[error("red node {node} has a red child")]
    RedViolation { node: u32 },
    #[error("black height differs between the subtrees of node {node}")]
    BlackHeightMismatch { node: u32 },
    #[error("tree records {recorded} nodes but {reachable} are reachable")]
    CountMismatch { recorded: usize, reachable: usize },
}
