use crate::priority::PrioritySource;
use crate::treap::node::{make_node, Node};
use std::cmp;
use std::cmp::Ordering;
use std::fmt;

pub type Tree<T> = Option<Box<Node<T>>>;

/// A `(key, priority)` pair produced by a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Visit<K> {
    pub key: K,
    pub priority: u64,
}

impl<K> fmt::Display for Visit<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.priority)
    }
}

/// Promotes the right child of `node`. Gives `node` back untouched as `Err` if it has no right
/// child.
pub fn rotate_left<T>(mut node: Box<Node<T>>) -> Result<Box<Node<T>>, Box<Node<T>>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => return Err(node),
    };
    trace!("rotating left: priority {} above {}", child.priority, node.priority);
    node.right = child.left.take();
    child.left = Some(node);
    Ok(child)
}

/// Promotes the left child of `node`. Gives `node` back untouched as `Err` if it has no left
/// child.
pub fn rotate_right<T>(mut node: Box<Node<T>>) -> Result<Box<Node<T>>, Box<Node<T>>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => return Err(node),
    };
    trace!("rotating right: priority {} above {}", child.priority, node.priority);
    node.left = child.right.take();
    child.right = Some(node);
    Ok(child)
}

fn settle<T>(rotated: Result<Box<Node<T>>, Box<Node<T>>>) -> Box<Node<T>> {
    match rotated {
        Ok(node) | Err(node) => node,
    }
}

/// Inserts `new_node` and returns the new root. Keys equal to an existing key go to its right, so
/// duplicates coexist.
pub fn insert<T>(tree: Tree<T>, new_node: Node<T>) -> Box<Node<T>>
where
    T: Ord,
{
    let mut node = match tree {
        Some(node) => node,
        None => return Box::new(new_node),
    };

    if new_node.key < node.key {
        node.left = Some(insert(node.left.take(), new_node));
        if node.is_heap_property_violated(&node.left) {
            node = settle(rotate_right(node));
        }
    } else {
        node.right = Some(insert(node.right.take(), new_node));
        if node.is_heap_property_violated(&node.right) {
            node = settle(rotate_left(node));
        }
    }
    node
}

/// Builds a tree by inserting `keys` in order, drawing one priority per key.
pub fn create<T, I, P>(keys: I, priorities: &mut P) -> Tree<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
    P: PrioritySource + ?Sized,
{
    keys.into_iter().fold(None, |tree, key| {
        Some(insert(tree, make_node(key, &mut *priorities)))
    })
}

/// Removes one node with a key equal to `key`. Returns the new root together with the removed
/// key, or the unchanged tree and `None` if no such key exists.
pub fn remove<T>(tree: Tree<T>, key: &T) -> (Tree<T>, Option<T>)
where
    T: Ord,
{
    let mut node = match tree {
        Some(node) => node,
        None => return (None, None),
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, ret) = remove(node.left.take(), key);
            node.left = left;
            (Some(node), ret)
        },
        Ordering::Greater => {
            let (right, ret) = remove(node.right.take(), key);
            node.right = right;
            (Some(node), ret)
        },
        Ordering::Equal => sink(node, key),
    }
}

// `node` holds the key being removed. Rotate it towards the child with the smaller priority
// until it has at most one child, then splice it out.
fn sink<T>(mut node: Box<Node<T>>, key: &T) -> (Tree<T>, Option<T>)
where
    T: Ord,
{
    let (left, right) = match (node.left.take(), node.right.take()) {
        (Some(left), Some(right)) => (left, right),
        (left, right) => return (left.or(right), Some(node.key)),
    };
    let rotate_towards_left = left.priority < right.priority;
    node.left = Some(left);
    node.right = Some(right);

    if rotate_towards_left {
        let mut top = settle(rotate_right(node));
        let (right, ret) = match top.right.take() {
            Some(target) => sink(target, key),
            None => (None, None),
        };
        top.right = right;
        (Some(top), ret)
    } else {
        let mut top = settle(rotate_left(node));
        let (left, ret) = match top.left.take() {
            Some(target) => sink(target, key),
            None => (None, None),
        };
        top.left = left;
        (Some(top), ret)
    }
}

pub fn contains<T>(tree: &Tree<T>, key: &T) -> bool
where
    T: Ord,
{
    match tree {
        Some(ref node) => match key.cmp(&node.key) {
            Ordering::Less => contains(&node.left, key),
            Ordering::Greater => contains(&node.right, key),
            Ordering::Equal => true,
        },
        None => false,
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

pub fn len<T>(tree: &Tree<T>) -> usize {
    match tree {
        Some(ref node) => 1 + len(&node.left) + len(&node.right),
        None => 0,
    }
}

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        Some(ref node) => 1 + cmp::max(height(&node.left), height(&node.right)),
        None => 0,
    }
}

/// Returns the `(key, priority)` pairs in ascending key order.
pub fn in_order<T>(tree: &Tree<T>) -> Vec<Visit<&T>> {
    fn visit<'a, T>(tree: &'a Tree<T>, ret: &mut Vec<Visit<&'a T>>) {
        if let Some(ref node) = tree {
            visit(&node.left, ret);
            ret.push(Visit { key: &node.key, priority: node.priority });
            visit(&node.right, ret);
        }
    }

    let mut ret = Vec::new();
    visit(tree, &mut ret);
    ret
}

/// Returns the `(key, priority)` pairs root first, then the left subtree, then the right subtree.
pub fn pre_order<T>(tree: &Tree<T>) -> Vec<Visit<&T>> {
    fn visit<'a, T>(tree: &'a Tree<T>, ret: &mut Vec<Visit<&'a T>>) {
        if let Some(ref node) = tree {
            ret.push(Visit { key: &node.key, priority: node.priority });
            visit(&node.left, ret);
            visit(&node.right, ret);
        }
    }

    let mut ret = Vec::new();
    visit(tree, &mut ret);
    ret
}

/// Checks that every key in a left subtree is at most its ancestor's key and every key in a right
/// subtree is at least its ancestor's key.
pub fn is_search_ordered<T>(tree: &Tree<T>) -> bool
where
    T: Ord,
{
    fn check<T: Ord>(tree: &Tree<T>, low: Option<&T>, high: Option<&T>) -> bool {
        match tree {
            Some(ref node) => {
                low.map_or(true, |low| *low <= node.key)
                    && high.map_or(true, |high| node.key <= *high)
                    && check(&node.left, low, Some(&node.key))
                    && check(&node.right, Some(&node.key), high)
            },
            None => true,
        }
    }

    check(tree, None, None)
}

/// Checks that no child has a smaller priority than its parent.
pub fn is_heap_ordered<T>(tree: &Tree<T>) -> bool {
    match tree {
        Some(ref node) => {
            !node.is_heap_property_violated(&node.left)
                && !node.is_heap_property_violated(&node.right)
                && is_heap_ordered(&node.left)
                && is_heap_ordered(&node.right)
        },
        None => true,
    }
}
