//! Shared vocabulary for both tree families.
//!
//! Nodes live in a `Vec`-backed arena owned by their tree. Every "pointer"
//! is an `Option<u32>` index into that arena: the parent link is a plain
//! back-reference, the two child slots are indexed by [`Side`].

use std::cmp::Ordering;

/// Child position relative to a parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Low = 0,
    High = 1,
}

impl Side {
    /// Both sides, in index order.
    pub const BOTH: [Side; 2] = [Side::Low, Side::High];

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Low => Side::High,
            Side::High => Side::Low,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// `Less` descends low, anything else descends high, so equal values are
/// placed after existing ones.
impl From<Ordering> for Side {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Side::Low,
            Ordering::Equal | Ordering::Greater => Side::High,
        }
    }
}

/// Outcome of a matcher callback during search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match {
    Found,
    Descend(Side),
}

impl From<Ordering> for Match {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Equal => Match::Found,
            Ordering::Less => Match::Descend(Side::Low),
            Ordering::Greater => Match::Descend(Side::High),
        }
    }
}

/// Parent/child links of an arena node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn child(&self, side: Side) -> Option<u32>;
    fn set_child(&mut self, side: Side, v: Option<u32>);

    #[inline]
    fn l(&self) -> Option<u32> {
        self.child(Side::Low)
    }

    #[inline]
    fn r(&self) -> Option<u32> {
        self.child(Side::High)
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.l().is_none() && self.r().is_none()
    }

    /// Drops every link, leaving the node detached.
    fn unlink(&mut self) {
        self.set_p(None);
        self.set_child(Side::Low, None);
        self.set_child(Side::High, None);
    }
}

/// Node that carries a payload.
///
/// `None` marks an arena slot whose node has been released.
pub trait ValueNode: Node {
    type Value;

    fn value(&self) -> Option<&Self::Value>;
    fn value_mut(&mut self) -> Option<&mut Self::Value>;
    fn take_value(&mut self) -> Option<Self::Value>;
}
