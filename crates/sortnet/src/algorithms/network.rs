//! Data-independent comparator networks.
//!
//! Networks are never written out by hand: each one is produced by a
//! generator running in a `const` context, and every comparator is range
//! checked as it is pushed. An out-of-range index is therefore a compile
//! error for any network that ends up in a `const` or `static`.

use super::common;

/// Largest size served by a direct network.
pub const MAX_NETWORK_SIZE: usize = 32;

/// Capacity of a network's comparator table.
pub const MAX_COMPARATORS: usize = 256;

/// A compare-exchange between two positions, `lo < hi`.
///
/// After it runs, the value at `lo` does not compare greater than the value
/// at `hi`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Comparator {
    lo: u8,
    hi: u8,
}

impl Comparator {
    pub const fn new(lo: usize, hi: usize) -> Self {
        assert!(lo < hi, "comparator positions must satisfy lo < hi");
        assert!(hi <= u8::MAX as usize, "comparator position does not fit in u8");
        Self {
            lo: lo as u8,
            hi: hi as u8,
        }
    }

    #[inline(always)]
    pub const fn lo(self) -> usize {
        self.lo as usize
    }

    #[inline(always)]
    pub const fn hi(self) -> usize {
        self.hi as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Generator {
    /// Recursive halving with the Bose-Nelson merge.
    BoseNelson,
    /// Batcher's odd-even merge sort, truncated to the requested size.
    OddEvenMerge,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::BoseNelson, Generator::OddEvenMerge];

    pub fn label(self) -> &'static str {
        match self {
            Self::BoseNelson => "bose_nelson",
            Self::OddEvenMerge => "odd_even_merge",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Network {
    size: u8,
    len: u16,
    generator: Generator,
    comparators: [Comparator; MAX_COMPARATORS],
}

impl Network {
    const EMPTY: Network = Network {
        size: 0,
        len: 0,
        generator: Generator::BoseNelson,
        comparators: [Comparator { lo: 0, hi: 1 }; MAX_COMPARATORS],
    };

    /// Runs `generator` for `size` inputs.
    ///
    /// Panics (a compile error in const context) if the generator emits a
    /// comparator outside `[0, size)` or more than `MAX_COMPARATORS` of them.
    pub const fn generate(generator: Generator, size: usize) -> Self {
        assert!(size <= MAX_NETWORK_SIZE, "network size above MAX_NETWORK_SIZE");

        let mut net = Self::EMPTY;
        net.size = size as u8;
        net.generator = generator;
        match generator {
            Generator::BoseNelson => bose_nelson_sort(&mut net, 0, size),
            Generator::OddEvenMerge => odd_even_merge_sort(&mut net, size),
        }
        net
    }

    /// The generated network with the fewest comparators for `size`.
    /// Ties keep the Bose-Nelson network.
    pub const fn shortest(size: usize) -> Self {
        let bose = Self::generate(Generator::BoseNelson, size);
        let batcher = Self::generate(Generator::OddEvenMerge, size);
        if batcher.len < bose.len { batcher } else { bose }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Number of comparators, which is also the exact number of
    /// compare-exchanges performed by every `apply`.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn generator(&self) -> Generator {
        self.generator
    }

    #[inline]
    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators[..self.len as usize]
    }

    /// True when every comparator lies in `[0, size)` with `lo < hi`.
    pub const fn indices_in_range(&self) -> bool {
        let mut i = 0;
        while i < self.len as usize {
            let c = self.comparators[i];
            if c.lo >= c.hi || c.hi >= self.size {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Sorts `v` in place. `v.len()` must equal `self.size()`.
    #[inline]
    pub fn apply<T: Copy + PartialOrd>(&self, v: &mut [T]) {
        assert_eq!(
            v.len(),
            self.size(),
            "buffer length does not match network size"
        );
        for &c in self.comparators() {
            // SAFETY: `push` only admits lo < hi < size, and v.len() == size.
            unsafe { common::cswap_unchecked(v, c.lo(), c.hi()) };
        }
    }

    const fn push(&mut self, lo: usize, hi: usize) {
        assert!(lo < hi, "comparator positions must satisfy lo < hi");
        assert!(hi < self.size as usize, "comparator index out of range");
        assert!(
            (self.len as usize) < MAX_COMPARATORS,
            "comparator table capacity exceeded"
        );
        self.comparators[self.len as usize] = Comparator::new(lo, hi);
        self.len += 1;
    }
}

const fn bose_nelson_sort(net: &mut Network, start: usize, size: usize) {
    if size <= 1 {
        return;
    }

    let half = size / 2;
    bose_nelson_sort(net, start, half);
    bose_nelson_sort(net, start + half, size - half);
    bose_nelson_merge(net, start, half, start + half, size - half);
}

/// Merges the sorted runs `[i, i + x)` and `[j, j + y)`.
const fn bose_nelson_merge(net: &mut Network, i: usize, x: usize, j: usize, y: usize) {
    if x == 0 || y == 0 {
        return;
    }

    if x == 1 && y == 1 {
        net.push(i, j);
    } else if x == 1 && y == 2 {
        net.push(i, j + 1);
        net.push(i, j);
    } else if x == 2 && y == 1 {
        net.push(i, j);
        net.push(i + 1, j);
    } else {
        let a = x / 2;
        let b = if x % 2 == 1 { y / 2 } else { y.div_ceil(2) };
        bose_nelson_merge(net, i, a, j, b);
        bose_nelson_merge(net, i + a, x - a, j + b, y - b);
        bose_nelson_merge(net, i + a, x - a, j, b);
    }
}

/// Batcher's network for the next power of two with every comparator that
/// touches a position `>= size` removed. Padding the input with +inf shows
/// the removed comparators never exchange, so the truncation still sorts.
const fn odd_even_merge_sort(net: &mut Network, size: usize) {
    let mut p = 1;
    while p < size {
        let mut k = p;
        while k > 0 {
            let mut j = k % p;
            while j + k < size {
                let mut i = 0;
                while i < k {
                    let a = i + j;
                    let b = a + k;
                    if b < size && a / (2 * p) == b / (2 * p) {
                        net.push(a, b);
                    }
                    i += 1;
                }
                j += 2 * k;
            }
            k /= 2;
        }
        p *= 2;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::cmp::Ordering;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    thread_local! {
        static COMPARISONS: Cell<usize> = const { Cell::new(0) };
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Counted(f64);

    impl PartialOrd for Counted {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            COMPARISONS.with(|c| c.set(c.get() + 1));
            self.0.partial_cmp(&other.0)
        }
    }

    #[test]
    fn known_comparator_counts() {
        let expected = [
            (2, 1, 1),
            (3, 3, 3),
            (4, 5, 5),
            (8, 19, 19),
            (9, 27, 28),
            (16, 65, 63),
            (25, 154, 140),
            (32, 211, 191),
        ];
        for (size, bose, batcher) in expected {
            assert_eq!(Network::generate(Generator::BoseNelson, size).len(), bose);
            assert_eq!(
                Network::generate(Generator::OddEvenMerge, size).len(),
                batcher
            );
        }
    }

    #[test]
    fn shortest_prefers_bose_nelson_on_ties() {
        assert_eq!(Network::shortest(8).generator(), Generator::BoseNelson);
        assert_eq!(Network::shortest(9).generator(), Generator::BoseNelson);
        assert_eq!(Network::shortest(16).generator(), Generator::OddEvenMerge);
    }

    #[test]
    fn every_generated_index_is_in_range() {
        for size in 0..=MAX_NETWORK_SIZE {
            for generator in Generator::ALL {
                let net = Network::generate(generator, size);
                assert_eq!(net.size(), size);
                assert!(net.indices_in_range(), "{} size={size}", generator.label());
                for c in net.comparators() {
                    assert!(c.lo() < c.hi() && c.hi() < size);
                }
            }
        }
    }

    #[test]
    fn small_sizes_have_no_comparators() {
        assert!(Network::shortest(0).is_empty());
        assert!(Network::shortest(1).is_empty());
    }

    #[test]
    fn comparison_count_is_input_independent() {
        let mut rng = StdRng::seed_from_u64(0xC0_0172);
        for size in [3_usize, 7, 11, 19, 27, 32] {
            let net = Network::shortest(size);
            for round in 0..50 {
                let mut data: Vec<Counted> = match round {
                    0 => (0..size).map(|i| Counted(i as f64)).collect(),
                    1 => (0..size).rev().map(|i| Counted(i as f64)).collect(),
                    2 => vec![Counted(4.0); size],
                    _ => (0..size)
                        .map(|_| Counted(rng.random_range(-50.0..50.0)))
                        .collect(),
                };
                COMPARISONS.with(|c| c.set(0));
                net.apply(&mut data);
                let seen = COMPARISONS.with(Cell::get);
                assert_eq!(seen, net.len(), "size={size} round={round}");
            }
        }
    }

    #[test]
    fn apply_sorts_generic_values() {
        let net = Network::shortest(6);
        let mut data = [5_i32, -1, 3, 3, 0, 9];
        net.apply(&mut data);
        assert_eq!(data, [-1, 0, 3, 3, 5, 9]);
    }

    #[test]
    #[should_panic(expected = "buffer length does not match network size")]
    fn apply_rejects_wrong_length() {
        let net = Network::shortest(5);
        let mut data = [1.0, 2.0, 3.0];
        net.apply(&mut data);
    }
}
