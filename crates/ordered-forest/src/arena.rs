//! Slot storage shared by both tree families.
//!
//! Nodes are addressed by `u32` index. Released slots keep their position
//! (so every other index stays valid) and are handed out again by the next
//! [`Arena::alloc`].

use crate::types::ValueNode;

#[derive(Clone, Debug)]
pub(crate) struct Arena<N> {
    nodes: Vec<N>,
    free: Vec<u32>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<N> Arena<N> {
    pub fn alloc(&mut self, node: N) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as u32
            }
        }
    }

    #[inline]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [N] {
        &mut self.nodes
    }

    #[inline]
    pub fn get(&self, idx: u32) -> Option<&N> {
        self.nodes.get(idx as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.nodes.get_mut(idx as usize)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    /// Number of slots handed out so far, live or released.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }
}

impl<N> Arena<N> {
    /// Takes the value out of `idx`, detaches the node and recycles the
    /// slot. `None` if the slot was already released or out of range.
    pub fn release(&mut self, idx: u32) -> Option<N::Value>
    where
        N: ValueNode,
    {
        let node = self.nodes.get_mut(idx as usize)?;
        let value = node.take_value()?;
        node.unlink();
        self.free.push(idx);
        Some(value)
    }

    pub fn is_live(&self, idx: u32) -> bool
    where
        N: ValueNode,
    {
        self.get(idx).is_some_and(|n| n.value().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plain::PlainNode;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::<PlainNode<i32>>::default();
        let a = arena.alloc(PlainNode::new(1));
        let b = arena.alloc(PlainNode::new(2));
        assert_eq!((a, b), (0, 1));

        assert_eq!(arena.release(a), Some(1));
        assert_eq!(arena.release(a), None);
        assert!(!arena.is_live(a));
        assert!(arena.is_live(b));

        let c = arena.alloc(PlainNode::new(3));
        assert_eq!(c, a);
        assert_eq!(arena.capacity(), 2);
        assert_eq!(arena.release(7), None);
    }
}
