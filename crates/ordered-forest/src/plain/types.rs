use crate::types::{Node, Side, ValueNode};

/// Node of a [`PlainTree`](super::PlainTree).
#[derive(Clone, Debug)]
pub struct PlainNode<T> {
    pub p: Option<u32>,
    pub c: [Option<u32>; 2],
    pub v: Option<T>,
}

impl<T> PlainNode<T> {
    pub fn new(v: T) -> Self {
        Self {
            p: None,
            c: [None, None],
            v: Some(v),
        }
    }

    pub(crate) fn with_parent(v: T, p: Option<u32>) -> Self {
        Self {
            p,
            c: [None, None],
            v: Some(v),
        }
    }
}

impl<T> Node for PlainNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn child(&self, side: Side) -> Option<u32> {
        self.c[side.index()]
    }

    fn set_child(&mut self, side: Side, v: Option<u32>) {
        self.c[side.index()] = v;
    }
}

impl<T> ValueNode for PlainNode<T> {
    type Value = T;

    fn value(&self) -> Option<&T> {
        self.v.as_ref()
    }

    fn value_mut(&mut self) -> Option<&mut T> {
        self.v.as_mut()
    }

    fn take_value(&mut self) -> Option<T> {
        self.v.take()
    }
}
