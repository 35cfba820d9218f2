use crate::plain::PlainNode;
use crate::types::{Node, Side, ValueNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Red-black specific node behavior.
pub trait ColoredNode: Node {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    #[inline]
    fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.color() == Color::Black
    }
}

/// A [`PlainNode`] with a color tag. New nodes start red.
#[derive(Clone, Debug)]
pub struct BalancedNode<T> {
    pub node: PlainNode<T>,
    pub color: Color,
}

impl<T> BalancedNode<T> {
    pub fn new(v: T) -> Self {
        Self {
            node: PlainNode::new(v),
            color: Color::Red,
        }
    }
}

impl<T> Node for BalancedNode<T> {
    fn p(&self) -> Option<u32> {
        self.node.p
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.node.p = v;
    }

    fn child(&self, side: Side) -> Option<u32> {
        self.node.child(side)
    }

    fn set_child(&mut self, side: Side, v: Option<u32>) {
        self.node.set_child(side, v);
    }
}

impl<T> ValueNode for BalancedNode<T> {
    type Value = T;

    fn value(&self) -> Option<&T> {
        self.node.value()
    }

    fn value_mut(&mut self) -> Option<&mut T> {
        self.node.value_mut()
    }

    fn take_value(&mut self) -> Option<T> {
        self.node.take_value()
    }
}

impl<T> ColoredNode for BalancedNode<T> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
