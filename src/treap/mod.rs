//! Probabilistic binary search tree where each node also maintains the min-heap invariant over a
//! random priority.
//!
//! `tree` holds the engine as free functions that take a subtree by value and return its
//! replacement. `Treap` wraps a root, a priority source, and a count behind `&mut self`.

mod collection;
mod node;
pub mod tree;

pub use self::collection::{Treap, TreapIter};
pub use self::node::{make_node, Node};
pub use self::tree::Visit;
