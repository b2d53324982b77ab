//! Arena-resident heap nodes.
//!
//! Nodes live in a [`SlotMap`] owned by the heap and refer to each other by
//! [`NodeKey`]. Slot keys are generational: once a node is removed its key
//! never resolves again, even if the slot is reused, which is what lets the
//! heap detect stale handles instead of following a dangling pointer.

use crate::degree::Degree;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of a heap node
    pub struct NodeKey;
}

/// Arena holding every node of one heap.
pub(crate) type Arena<T, P> = SlotMap<NodeKey, Node<T, P>>;

/// A node of the forest.
///
/// `left` and `right` link the node into a circular ring: the root list if
/// `parent` is `None`, otherwise its parent's child ring. A node alone in its
/// ring points to itself on both sides.
#[derive(Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) priority: P,
    pub(crate) item: T,
    pub(crate) parent: Option<NodeKey>,
    /// Any one member of the child ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) degree: Degree,
    /// Lost a child since it last became a child itself
    pub(crate) marked: bool,
}

impl<T, P> Node<T, P> {
    /// A detached node. Its sibling links are null until it is spliced into
    /// a ring with [`crate::ring::insert_into_ring`].
    pub(crate) fn new(priority: P, item: T) -> Self {
        Self {
            priority,
            item,
            parent: None,
            child: None,
            left: NodeKey::default(),
            right: NodeKey::default(),
            degree: 0,
            marked: false,
        }
    }
}
