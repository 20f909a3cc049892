use crate::algorithms::catalog::CATALOG;
use crate::algorithms::common;
use crate::algorithms::hybrid::{self, MergeKind, PartitionScheme};
use crate::algorithms::network::MAX_NETWORK_SIZE;
use crate::error::ConfigError;

/// Largest `hybrid_max` a dispatch table can hold.
pub const MAX_HYBRID_SIZE: usize = 512;

const TABLE_LEN: usize = MAX_HYBRID_SIZE + 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    Noop,
    Swap2,
    Network(usize),
    Hybrid {
        scheme: PartitionScheme,
        merge: MergeKind,
    },
    Insertion,
    Generic,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Swap2 => "swap2",
            Self::Network(_) => "network",
            Self::Hybrid {
                merge: MergeKind::InsertionCompletion,
                ..
            } => "hybrid_insertion",
            Self::Hybrid {
                merge: MergeKind::KWayMerge,
                ..
            } => "hybrid_kway",
            Self::Insertion => "insertion",
            Self::Generic => "generic",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DispatchConfig {
    /// Largest size sorted by a direct network.
    pub network_max: usize,
    /// Largest size sorted by block networks plus a merge stage.
    pub hybrid_max: usize,
    /// Upper bound on hybrid block length.
    pub block_max: usize,
    /// Hybrid sizes at or above this merge runs; smaller ones finish with an
    /// insertion pass.
    pub kway_min: usize,
    /// Uncovered sizes below this use insertion sort, the rest the std sort.
    pub insertion_threshold: usize,
}

pub const DEFAULT_CONFIG: DispatchConfig = DispatchConfig {
    network_max: MAX_NETWORK_SIZE,
    hybrid_max: 125,
    block_max: MAX_NETWORK_SIZE,
    kway_min: 64,
    insertion_threshold: 40,
};

impl DispatchConfig {
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.network_max < 2 || self.network_max > MAX_NETWORK_SIZE {
            return Err(ConfigError::NetworkMax {
                network_max: self.network_max,
                max: MAX_NETWORK_SIZE,
            });
        }
        if self.block_max < 2 || self.block_max > self.network_max {
            return Err(ConfigError::BlockMax {
                block_max: self.block_max,
                network_max: self.network_max,
            });
        }
        if self.hybrid_max < self.network_max || self.hybrid_max > MAX_HYBRID_SIZE {
            return Err(ConfigError::HybridMax {
                hybrid_max: self.hybrid_max,
                network_max: self.network_max,
                max: MAX_HYBRID_SIZE,
            });
        }
        Ok(())
    }

    pub const fn merge_for(&self, size: usize) -> MergeKind {
        if size >= self.kway_min {
            MergeKind::KWayMerge
        } else {
            MergeKind::InsertionCompletion
        }
    }

    const fn fallback(&self, size: usize) -> Strategy {
        if size < self.insertion_threshold {
            Strategy::Insertion
        } else {
            Strategy::Generic
        }
    }

    const fn resolve(&self, size: usize) -> Strategy {
        if size <= 1 {
            Strategy::Noop
        } else if size == 2 {
            Strategy::Swap2
        } else if size <= self.network_max {
            Strategy::Network(size)
        } else if size <= self.hybrid_max {
            match PartitionScheme::for_size(size, self.block_max) {
                Some(scheme) => Strategy::Hybrid {
                    scheme,
                    merge: self.merge_for(size),
                },
                None => self.fallback(size),
            }
        } else {
            self.fallback(size)
        }
    }
}

/// Closed mapping from buffer size to strategy, fixed at construction.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    table: [Strategy; TABLE_LEN],
}

impl Dispatcher {
    pub const fn new(config: DispatchConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            return Err(err);
        }

        let mut table = [Strategy::Generic; TABLE_LEN];
        let mut size = 0;
        while size < TABLE_LEN {
            table[size] = config.resolve(size);
            size += 1;
        }
        Ok(Self { config, table })
    }

    #[inline]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    #[inline]
    pub fn strategy(&self, size: usize) -> Strategy {
        match self.table.get(size) {
            Some(&strategy) => strategy,
            None => self.config.fallback(size),
        }
    }

    /// Sorts `values[..count]` ascending in place.
    ///
    /// Panics if `count > values.len()`.
    pub fn sort(&self, values: &mut [f64], count: usize) {
        assert!(
            count <= values.len(),
            "count ({count}) exceeds buffer length ({})",
            values.len()
        );
        self.sort_slice(&mut values[..count]);
    }

    pub fn sort_slice(&self, values: &mut [f64]) {
        match self.strategy(values.len()) {
            Strategy::Noop => {}
            Strategy::Swap2 => {
                if values[1] < values[0] {
                    values.swap(0, 1);
                }
            }
            Strategy::Network(size) => CATALOG.network(size).apply(values),
            Strategy::Hybrid { scheme, merge } => hybrid::sort_hybrid(values, scheme, merge),
            Strategy::Insertion => common::insertion_sort(values),
            Strategy::Generic => common::generic_sort(values),
        }
    }
}

pub static DEFAULT_DISPATCHER: Dispatcher = match Dispatcher::new(DEFAULT_CONFIG) {
    Ok(dispatcher) => dispatcher,
    Err(_) => panic!("default dispatch configuration is invalid"),
};
