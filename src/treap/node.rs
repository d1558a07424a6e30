use crate::priority::PrioritySource;
use crate::treap::tree;

/// A struct representing an internal node of a treap.
#[derive(Debug)]
pub struct Node<T> {
    pub key: T,
    pub priority: u64,
    pub left: tree::Tree<T>,
    pub right: tree::Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u64) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if `child` has a strictly smaller priority than this node.
    pub fn is_heap_property_violated(&self, child: &tree::Tree<T>) -> bool {
        match child {
            Some(ref child_node) => child_node.priority < self.priority,
            None => false,
        }
    }
}

/// Creates a childless node for `key` with a priority drawn from `priorities`.
pub fn make_node<T, P>(key: T, priorities: &mut P) -> Node<T>
where
    P: PrioritySource + ?Sized,
{
    Node::new(key, priorities.next_priority())
}
