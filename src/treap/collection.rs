use crate::error::Result;
use crate::priority::{PriorityRange, PrioritySource, RandomPriority};
use crate::treap::node::{make_node, Node};
use crate::treap::tree::{self, Visit};
use rand::{self, SeedableRng, XorShiftRng};
use std::iter::FromIterator;

/// An ordered collection of keys implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key and a priority. Keys in the left subtree of a node are less than or equal
/// to its key and keys in its right subtree are greater than or equal to it. The priority of a
/// node is less than or equal to the priorities of its children, so the root holds the minimum.
/// By randomly generating priorities, the expected height of the tree is proportional to the
/// logarithm of the number of keys.
///
/// `insert` keeps duplicate keys as separate nodes; `insert_unique` rejects them.
///
/// # Examples
/// ```
/// use treap_engine::treap::Treap;
///
/// let mut t = Treap::new();
/// t.insert('D');
/// t.insert('B');
/// t.insert('F');
///
/// assert!(t.contains(&'B'));
/// assert!(!t.contains(&'C'));
/// assert_eq!(t.len(), 3);
/// assert_eq!(t.min(), Some(&'B'));
///
/// assert_eq!(t.remove(&'B'), Some('B'));
/// assert_eq!(t.remove(&'B'), None);
/// ```
pub struct Treap<T, P = RandomPriority<XorShiftRng>> {
    root: tree::Tree<T>,
    priorities: P,
    len: usize,
}

impl<T> Treap<T>
where
    T: Ord,
{
    /// Constructs a new, empty `Treap<T>` drawing full-width priorities from a randomly seeded
    /// xorshift generator.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let t: Treap<char> = Treap::new();
    /// ```
    pub fn new() -> Self {
        Treap::with_priorities(RandomPriority::full(rand::weak_rng()))
    }

    /// Constructs a new, empty `Treap<T>` whose priorities come from a xorshift generator with a
    /// fixed seed. Two treaps built with the same seed and the same operations have the same
    /// shape.
    ///
    /// # Panics
    /// Panics if the seed is all zeros.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut a = Treap::with_seed([1, 2, 3, 4]);
    /// let mut b = Treap::with_seed([1, 2, 3, 4]);
    /// for key in "treap".chars() {
    ///     a.insert(key);
    ///     b.insert(key);
    /// }
    /// assert_eq!(a.pre_order(), b.pre_order());
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        let rng: XorShiftRng = SeedableRng::from_seed(seed);
        Treap::with_priorities(RandomPriority::full(rng))
    }

    /// Constructs a new, empty `Treap<T>` drawing priorities from `range`. Returns an error if the
    /// range is empty.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::priority::PriorityRange;
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::with_range(PriorityRange::reference()).unwrap();
    /// t.insert('a');
    /// assert!(t.root().map_or(false, |node| 1 <= node.priority && node.priority <= 99));
    /// assert!(Treap::<char>::with_range(PriorityRange::Bounded { low: 2, high: 1 }).is_err());
    /// ```
    pub fn with_range(range: PriorityRange) -> Result<Self> {
        let priorities = RandomPriority::new(rand::weak_rng(), range)?;
        Ok(Treap::with_priorities(priorities))
    }

    /// Builds a treap by inserting `keys` one at a time, in order.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let t = Treap::create(vec!['D', 'B', 'F', 'A', 'C']);
    /// assert_eq!(t.iter().collect::<String>(), "ABCDF");
    /// ```
    pub fn create<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut treap = Treap::new();
        treap.extend(keys);
        treap
    }
}

impl<T, P> Treap<T, P>
where
    T: Ord,
    P: PrioritySource,
{
    /// Constructs a new, empty `Treap<T, P>` that takes its priorities from `priorities`.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut next = 0u64;
    /// let mut t = Treap::with_priorities(move || { next += 1; next });
    /// t.insert('b');
    /// t.insert('a');
    /// assert_eq!(t.root().map(|node| node.key), Some('b'));
    /// ```
    pub fn with_priorities(priorities: P) -> Self {
        Treap {
            root: None,
            priorities,
            len: 0,
        }
    }

    /// Inserts a key into the treap. A key equal to one already present is kept as a separate
    /// node.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// t.insert(1);
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T) {
        let &mut Treap {
            ref mut root,
            ref mut priorities,
            ref mut len,
        } = self;
        let new_node = make_node(key, priorities);
        debug!("inserting node with priority {}", new_node.priority);
        *root = Some(tree::insert(root.take(), new_node));
        *len += 1;
    }

    /// Inserts a key into the treap unless an equal key is already present. Returns `true` if the
    /// key was inserted.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert!(t.insert_unique('a'));
    /// assert!(!t.insert_unique('a'));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, key: T) -> bool {
        if self.contains(&key) {
            debug!("rejecting duplicate key");
            return false;
        }
        self.insert(key);
        true
    }

    /// Removes one occurrence of a key from the treap. Returns the removed key, or `None` if the
    /// key does not exist.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// assert_eq!(t.remove(&1), Some(1));
    /// assert_eq!(t.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let &mut Treap {
            ref mut root,
            ref mut len,
            ..
        } = self;
        let (new_root, ret) = tree::remove(root.take(), key);
        *root = new_root;
        if ret.is_some() {
            *len -= 1;
        }
        debug!("remove found key: {}", ret.is_some());
        ret
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// assert!(!t.contains(&0));
    /// assert!(t.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.root, key)
    }

    /// Returns the number of keys in the treap, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        tree::height(&self.root)
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Removes every key from the treap.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the root node, which holds the minimum priority.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref().map(|node| &**node)
    }

    /// Returns the `(key, priority)` pairs in ascending key order.
    pub fn in_order(&self) -> Vec<Visit<&T>> {
        tree::in_order(&self.root)
    }

    /// Returns the `(key, priority)` pairs in pre-order: root, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<Visit<&T>> {
        tree::pre_order(&self.root)
    }

    /// Checks both the binary search tree property and the heap property.
    pub fn is_valid(&self) -> bool {
        tree::is_search_ordered(&self.root) && tree::is_heap_ordered(&self.root)
    }

    /// Returns an iterator over the treap. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use treap_engine::treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(3);
    /// t.insert(1);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapIter<'_, T> {
        TreapIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }
}

impl<T> Default for Treap<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Treap<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Treap::create(iter)
    }
}

impl<T, P> Extend<T> for Treap<T, P>
where
    T: Ord,
    P: PrioritySource,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T, P> IntoIterator for &'a Treap<T, P>
where
    T: 'a + Ord,
    P: PrioritySource,
{
    type Item = &'a T;
    type IntoIter = TreapIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `Treap<T, P>`.
///
/// This iterator traverses the keys of a treap in-order.
pub struct TreapIter<'a, T> {
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for TreapIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.stack.push(node);
            self.current = &node.left;
        }
        self.stack.pop().map(|node| {
            let &Node { ref key, ref right, .. } = node;
            self.current = right;
            key
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Treap;
    use crate::priority::PriorityRange;

    fn scripted(values: Vec<u64>) -> impl FnMut() -> u64 {
        let mut values = values.into_iter();
        move || values.next().expect("ran out of priorities")
    }

    #[test]
    fn test_len_empty() {
        let t: Treap<u32> = Treap::new();
        assert_eq!(t.len(), 0);
        assert_eq!(t.height(), 0);
    }

    #[test]
    fn test_is_empty() {
        let t: Treap<u32> = Treap::new();
        assert!(t.is_empty());
        assert!(t.root().is_none());
    }

    #[test]
    fn test_min_max_empty() {
        let t: Treap<u32> = Treap::new();
        assert_eq!(t.min(), None);
        assert_eq!(t.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut t = Treap::new();
        t.insert(1);
        assert!(t.contains(&1));
        assert_eq!(t.len(), 1);
        assert!(t.is_valid());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut t = Treap::with_priorities(scripted(vec![5, 9]));
        t.insert('a');
        t.insert('a');
        assert_eq!(t.len(), 2);
        assert_eq!(t.iter().collect::<String>(), "aa");

        // the second copy went to the right of the first
        let root = t.root().unwrap();
        assert_eq!(root.priority, 5);
        assert!(root.left.is_none());
        assert_eq!(root.right.as_ref().map(|node| node.key), Some('a'));

        assert_eq!(t.remove(&'a'), Some('a'));
        assert!(t.contains(&'a'));
        assert_eq!(t.len(), 1);
        assert_eq!(t.remove(&'a'), Some('a'));
        assert!(!t.contains(&'a'));
        assert!(t.is_empty());
    }

    #[test]
    fn test_insert_unique() {
        let mut t = Treap::new();
        assert!(t.insert_unique('a'));
        assert!(!t.insert_unique('a'));
        assert_eq!(t.len(), 1);
        assert_eq!(t.in_order().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut t = Treap::new();
        t.insert(1);
        assert_eq!(t.remove(&1), Some(1));
        assert!(!t.contains(&1));
        assert!(t.is_empty());
    }

    #[test]
    fn test_remove_empty() {
        let mut t: Treap<char> = Treap::new();
        assert_eq!(t.remove(&'a'), None);
        assert!(t.root().is_none());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn test_remove_missing() {
        let mut t = Treap::create(vec!['b', 'a', 'c']);
        let before = t
            .pre_order()
            .iter()
            .map(|visit| (*visit.key, visit.priority))
            .collect::<Vec<_>>();
        assert_eq!(t.remove(&'z'), None);
        let after = t
            .pre_order()
            .iter()
            .map(|visit| (*visit.key, visit.priority))
            .collect::<Vec<_>>();
        assert_eq!(before, after);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_contains_does_not_mutate() {
        let t = Treap::create("treapengine".chars());
        let before = format!("{:?} {:?}", t.in_order(), t.pre_order());
        for key in "abcdefghijklmnopqrstuvwxyz".chars() {
            t.contains(&key);
        }
        let after = format!("{:?} {:?}", t.in_order(), t.pre_order());
        assert_eq!(before, after);
    }

    #[test]
    fn test_min_max() {
        let mut t = Treap::new();
        t.insert(1);
        t.insert(3);
        t.insert(5);

        assert_eq!(t.min(), Some(&1));
        assert_eq!(t.max(), Some(&5));
    }

    #[test]
    fn test_clear() {
        let mut t = Treap::create(vec![1, 2, 3]);
        t.clear();
        assert!(t.is_empty());
        assert!(!t.contains(&1));
    }

    #[test]
    fn test_iter() {
        let mut t = Treap::new();
        t.insert(1);
        t.insert(5);
        t.insert(3);

        assert_eq!(t.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&t).into_iter().count(), 3);
    }

    #[test]
    fn test_from_iter_and_extend() {
        let mut t: Treap<char> = "dbf".chars().collect();
        t.extend("ac".chars());
        assert_eq!(t.iter().collect::<String>(), "abcdf");
        assert!(t.is_valid());
    }

    #[test]
    fn test_create_scenario() {
        let t = Treap::create(vec!['D', 'B', 'F', 'A', 'C']);
        let keys = t.in_order().iter().map(|visit| *visit.key).collect::<Vec<char>>();
        assert_eq!(keys, vec!['A', 'B', 'C', 'D', 'F']);
        assert!(t.is_valid());
    }

    #[test]
    fn test_delete_scenario() {
        let mut t = Treap::create(vec!['M', 'X', 'A']);
        assert_eq!(t.remove(&'X'), Some('X'));
        assert!(!t.contains(&'X'));
        assert!(t.contains(&'M'));
        assert!(t.contains(&'A'));
        assert_eq!(t.iter().collect::<String>(), "AM");
        assert!(t.is_valid());
    }

    #[test]
    fn test_root_has_minimum_priority() {
        let t = Treap::create(0..100u32);
        let min_priority = t.in_order().iter().map(|visit| visit.priority).min();
        assert_eq!(t.root().map(|node| node.priority), min_priority);
    }

    #[test]
    fn test_reference_range() {
        let mut t = Treap::with_range(PriorityRange::reference()).unwrap();
        for key in 0..500u32 {
            t.insert(key);
        }
        assert!(t.in_order().iter().all(|visit| 1 <= visit.priority && visit.priority <= 99));
        assert!(t.is_valid());
    }

    #[test]
    fn test_invalid_range() {
        let t = Treap::<u32>::with_range(PriorityRange::Bounded { low: 100, high: 1 });
        assert!(t.is_err());
    }

    #[test]
    fn test_seeded_shape_is_reproducible() {
        let mut a = Treap::with_seed([1, 1, 1, 1]);
        let mut b = Treap::with_seed([1, 1, 1, 1]);
        for key in 0..200u32 {
            a.insert(key);
            b.insert(key);
        }
        assert_eq!(a.pre_order(), b.pre_order());
    }
}
