use std::ops::Range;

use super::catalog::CATALOG;
use super::merge;
use super::network::MAX_NETWORK_SIZE;

/// Split of a composite size into `blocks` runs of `block` elements followed
/// by a shorter `remainder` run. Every run is small enough for a network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PartitionScheme {
    block: usize,
    blocks: usize,
    remainder: usize,
}

impl PartitionScheme {
    /// Uses the fewest runs of at most `block_max` elements, balanced so the
    /// blocks are as equal as possible.
    ///
    /// `None` when a direct network already covers `size`, or when
    /// `block_max` is outside `2..=MAX_NETWORK_SIZE`.
    pub const fn for_size(size: usize, block_max: usize) -> Option<Self> {
        if block_max < 2 || block_max > MAX_NETWORK_SIZE || size <= block_max {
            return None;
        }

        let runs = size.div_ceil(block_max);
        let block = size.div_ceil(runs);
        Some(Self {
            block,
            blocks: size / block,
            remainder: size % block,
        })
    }

    #[inline]
    pub const fn block(&self) -> usize {
        self.block
    }

    #[inline]
    pub const fn blocks(&self) -> usize {
        self.blocks
    }

    #[inline]
    pub const fn remainder(&self) -> usize {
        self.remainder
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.block * self.blocks + self.remainder
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sorted runs the merge stage receives.
    #[inline]
    pub const fn runs(&self) -> usize {
        self.blocks + (self.remainder > 0) as usize
    }

    pub fn run_bounds(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let len = self.len();
        (0..self.runs()).map(move |k| {
            let start = k * self.block;
            start..(start + self.block).min(len)
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MergeKind {
    InsertionCompletion,
    KWayMerge,
}

impl MergeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::InsertionCompletion => "insertion_completion",
            Self::KWayMerge => "kway_merge",
        }
    }
}

/// Sorts each run of `scheme` with its catalog network, then completes the
/// order with `merge`.
pub fn sort_hybrid(data: &mut [f64], scheme: PartitionScheme, merge: MergeKind) {
    assert_eq!(
        data.len(),
        scheme.len(),
        "buffer length does not match partition scheme"
    );

    for run in data.chunks_mut(scheme.block()) {
        CATALOG.network(run.len()).apply(run);
    }

    match merge {
        MergeKind::InsertionCompletion => merge::insertion_completion(data),
        MergeKind::KWayMerge => merge::kway_merge(data, scheme.block()),
    }
}
