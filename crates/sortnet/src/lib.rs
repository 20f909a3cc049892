//! Sorting backend for small order-statistic windows.
//!
//! Sizes up to [`MAX_NETWORK_SIZE`] are sorted by generated comparator
//! networks, larger windows by network-sorted blocks plus a merge stage, and
//! everything else by insertion sort or the standard library sort. The size
//! to strategy mapping is a closed table built at compile time and admitted
//! by [`verify`].

mod algorithms;
pub mod dispatch;
pub mod error;
pub mod stats;
pub mod verify;

pub use algorithms::catalog::{CATALOG, Catalog, sort_network};
pub use algorithms::hybrid::{MergeKind, PartitionScheme, sort_hybrid};
pub use algorithms::merge::{STACK_SCRATCH_LEN, insertion_completion, kway_merge};
pub use algorithms::network::{
    Comparator, Generator, MAX_COMPARATORS, MAX_NETWORK_SIZE, Network,
};
pub use dispatch::{
    DEFAULT_CONFIG, DEFAULT_DISPATCHER, DispatchConfig, Dispatcher, MAX_HYBRID_SIZE, Strategy,
};
pub use error::{ConfigError, Rejection, SortError};

/// Sorts `values[..count]` ascending in place.
///
/// `count` of 0 or 1 is a no-op. Panics if `count > values.len()`.
#[inline]
pub fn sort(values: &mut [f64], count: usize) {
    DEFAULT_DISPATCHER.sort(values, count);
}

#[inline]
pub fn sort_slice(values: &mut [f64]) {
    DEFAULT_DISPATCHER.sort_slice(values);
}

pub fn insertion_sort(values: &mut [f64]) {
    algorithms::common::insertion_sort(values);
}

/// `sort_unstable_by(f64::total_cmp)`, used above the specialized range.
pub fn generic_sort(values: &mut [f64]) {
    algorithms::common::generic_sort(values);
}
