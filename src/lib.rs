//! A randomized treap: a binary search tree ordered by key that also keeps a min-heap order over
//! priorities drawn at random when each node is created.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod error;
pub mod priority;
pub mod shell;
pub mod treap;

pub use crate::error::{Error, Result};
