//! Utilities to traverse the KdTree structure.

use std::fmt;

use num_traits::Zero;

use crate::kdtree::builder::Item;
use crate::point::{Distance, KdPoint};

/// A node in the KdTree.
///
/// Every node owns a contiguous run of the kd-sorted items: the node's own point is the middle
/// element, the left child is everything before it and the right child everything after it.
pub struct Node<'t, 'a, P: KdPoint, T> {
    /// The items of this node's subtree, including the node itself
    items: &'t [Item<'a, P, T>],

    /// The axis this node splits on. Always the depth of the node modulo `P::DIMS`.
    axis: usize,
}

impl<'t, 'a, P: KdPoint, T> Node<'t, 'a, P, T> {
    /// `None` when `items` is empty: there is no subtree there.
    #[inline]
    pub(crate) fn from_items(items: &'t [Item<'a, P, T>], axis: usize) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, axis })
        }
    }

    #[inline]
    fn middle_index(&self) -> usize {
        self.items.len() >> 1
    }

    #[inline]
    fn child_axis(&self) -> usize {
        (self.axis + 1) % P::DIMS
    }

    /// The point this node splits on.
    #[inline]
    pub fn point(&self) -> &'a P {
        self.items[self.middle_index()].0
    }

    /// The data associated with this node's point.
    #[inline]
    pub fn data(&self) -> &'a T {
        self.items[self.middle_index()].1
    }

    /// The axis this node splits on. Its children split on the next axis.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The subtree whose points are `<=` this node's point on [`axis`][Self::axis].
    pub fn left_child(&self) -> Option<Node<'t, 'a, P, T>> {
        Node::from_items(&self.items[..self.middle_index()], self.child_axis())
    }

    /// The subtree whose points are `>=` this node's point on [`axis`][Self::axis].
    pub fn right_child(&self) -> Option<Node<'t, 'a, P, T>> {
        Node::from_items(&self.items[self.middle_index() + 1..], self.child_axis())
    }

    /// The child on the query's side of the splitting plane, then the other one.
    ///
    /// `dx` is `query - point` along this node's axis; ties go left.
    #[inline]
    pub(crate) fn near_far(
        &self,
        dx: Distance<P>,
    ) -> (Option<Node<'t, 'a, P, T>>, Option<Node<'t, 'a, P, T>>) {
        if dx <= Distance::<P>::zero() {
            (self.left_child(), self.right_child())
        } else {
            (self.right_child(), self.left_child())
        }
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.items.len() == 1
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The number of items in this node's subtree, including the node itself.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }
}

impl<P: KdPoint, T> Clone for Node<'_, '_, P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: KdPoint, T> Copy for Node<'_, '_, P, T> {}

impl<P: KdPoint + fmt::Debug, T> fmt::Debug for Node<'_, '_, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("point", self.point())
            .field("axis", &self.axis)
            .field("num_items", &self.num_items())
            .finish()
    }
}
