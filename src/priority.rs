//! Sources of node priorities.
//!
//! Priorities are drawn once, when a node is created. Any type implementing `PrioritySource` can
//! be plugged into a treap, which lets tests pin down the exact priority sequence and therefore
//! the exact shape of the tree.

use crate::error::{Error, Result};
use rand::Rng;

/// A source of priorities for newly created nodes.
pub trait PrioritySource {
    /// Returns the priority of the next node.
    fn next_priority(&mut self) -> u64;
}

impl<F> PrioritySource for F
where
    F: FnMut() -> u64,
{
    fn next_priority(&mut self) -> u64 {
        self()
    }
}

/// The range that random priorities are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityRange {
    /// Uniform 63-bit priorities. Ties are rare enough to ignore for any practical tree size.
    Full,
    /// Uniform priorities in `low..=high`.
    Bounded { low: u64, high: u64 },
}

impl PriorityRange {
    /// The narrow `1..=99` range. Large trees will see many ties.
    pub fn reference() -> Self {
        PriorityRange::Bounded { low: 1, high: 99 }
    }
}

impl Default for PriorityRange {
    fn default() -> Self {
        PriorityRange::Full
    }
}

/// Draws priorities uniformly at random from a `PriorityRange`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::XorShiftRng;
/// use treap_engine::priority::{PriorityRange, PrioritySource, RandomPriority};
///
/// let rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
/// let mut priorities = RandomPriority::new(rng, PriorityRange::reference()).unwrap();
/// let priority = priorities.next_priority();
/// assert!(1 <= priority && priority <= 99);
/// ```
pub struct RandomPriority<R> {
    rng: R,
    range: PriorityRange,
}

impl<R> RandomPriority<R>
where
    R: Rng,
{
    /// Constructs a new `RandomPriority<R>`. Returns an error if a bounded range is empty.
    pub fn new(rng: R, range: PriorityRange) -> Result<Self> {
        if let PriorityRange::Bounded { low, high } = range {
            if low > high {
                return Err(Error::InvalidPriorityRange { low, high });
            }
        }
        Ok(RandomPriority { rng, range })
    }

    /// Constructs a new `RandomPriority<R>` over the full 63-bit range.
    pub fn full(rng: R) -> Self {
        RandomPriority {
            rng,
            range: PriorityRange::Full,
        }
    }

    pub fn range(&self) -> PriorityRange {
        self.range
    }
}

impl<R> PrioritySource for RandomPriority<R>
where
    R: Rng,
{
    fn next_priority(&mut self) -> u64 {
        match self.range {
            PriorityRange::Full => self.rng.next_u64() >> 1,
            PriorityRange::Bounded { low, high } => sample_range(&mut self.rng, low, high),
        }
    }
}

/// Returns a uniformly distributed value in `low..=high`.
///
/// The 2^64 possible draws are split into `high - low + 1` bins of equal size. Draws that fall in
/// the leftover tail are rejected and redrawn, so no bin is favoured the way a plain modulo
/// would favour the low values.
///
/// # Panics
/// Panics if `low > high`.
pub fn sample_range<R>(rng: &mut R, low: u64, high: u64) -> u64
where
    R: Rng + ?Sized,
{
    assert!(low <= high);
    let num_bins = u128::from(high - low) + 1;
    let num_rand = u128::from(u64::max_value()) + 1;
    let bin_size = num_rand / num_bins;
    let defect = num_rand % num_bins;

    loop {
        let x = u128::from(rng.next_u64());
        // x / bin_size < num_bins whenever x < num_rand - defect
        if x < num_rand - defect {
            return low + (x / bin_size) as u64;
        }
    }
}
