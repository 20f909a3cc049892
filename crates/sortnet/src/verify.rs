//! Admission gate for networks and dispatch tables.
//!
//! A candidate is admitted only if it passes, in order, a static index check,
//! the zero-one check (networks only) and randomized comparison against a
//! reference sort plus fixed edge cases. The gate runs in tests and tools; it
//! is never on the sorting path.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::algorithms::catalog::CATALOG;
use crate::algorithms::common;
use crate::algorithms::network::{Comparator, Network};
use crate::dispatch::{Dispatcher, Strategy};
use crate::error::Rejection;

/// Binary inputs per bit-parallel evaluation.
const LANES: usize = 64;

/// Enumerating more than `2^32` binary inputs is never attempted.
const MAX_EXHAUSTIVE: usize = 32;

/// Bit `b` of `PATTERNS[p]` is bit `p` of `b`, for the six low positions.
const PATTERNS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

#[derive(Clone, Copy, Debug)]
pub struct VerifyConfig {
    /// Random inputs per candidate.
    pub permutations: usize,
    /// Largest size whose `2^n` binary inputs are all enumerated.
    pub zero_one_exhaustive_max: usize,
    /// Random 64-input batches for sizes above the exhaustive limit.
    pub zero_one_samples: usize,
    pub seed: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            permutations: 10_000,
            zero_one_exhaustive_max: 24,
            zero_one_samples: 4_096,
            seed: 0x5EED_2026,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    pub size: usize,
    pub strategy: &'static str,
    /// Inputs the candidate was run on, binary inputs included.
    pub cases: usize,
}

/// Rejects any comparator outside `[0, size)` or with `lo >= hi`.
pub fn check_indices(size: usize, comparators: &[Comparator]) -> Result<(), Rejection> {
    for (position, c) in comparators.iter().enumerate() {
        if c.lo() >= c.hi() || c.hi() >= size {
            return Err(Rejection::IndexOutOfRange {
                size,
                position,
                lo: c.lo(),
                hi: c.hi(),
            });
        }
    }
    Ok(())
}

/// Zero-one check, 64 binary inputs per pass.
///
/// Lane `p` holds position `p` of all 64 inputs; a comparator becomes an
/// AND (min) and an OR (max). Returns the number of binary inputs checked.
/// Sizes above 64 are left to the randomized check.
pub fn check_zero_one(
    size: usize,
    comparators: &[Comparator],
    config: &VerifyConfig,
) -> Result<usize, Rejection> {
    check_indices(size, comparators)?;
    if size < 2 || size > 64 {
        return Ok(0);
    }

    let mut inputs = vec![0_u64; size];
    let mut lanes = vec![0_u64; size];

    if size <= config.zero_one_exhaustive_max.min(MAX_EXHAUSTIVE) {
        let batches = (1_u64 << size).div_ceil(LANES as u64);
        for base in 0..batches {
            for (p, lane) in inputs.iter_mut().enumerate() {
                *lane = if p < PATTERNS.len() {
                    PATTERNS[p]
                } else if (base >> (p - PATTERNS.len())) & 1 == 1 {
                    u64::MAX
                } else {
                    0
                };
            }
            run_binary_batch(size, comparators, &inputs, &mut lanes)?;
        }
        Ok((1_usize << size).max(LANES))
    } else {
        let mut rng = StdRng::seed_from_u64(config.seed ^ size as u64);
        for _ in 0..config.zero_one_samples {
            for lane in inputs.iter_mut() {
                *lane = rng.random::<u64>();
            }
            run_binary_batch(size, comparators, &inputs, &mut lanes)?;
        }
        Ok(config.zero_one_samples * LANES)
    }
}

fn run_binary_batch(
    size: usize,
    comparators: &[Comparator],
    inputs: &[u64],
    lanes: &mut [u64],
) -> Result<(), Rejection> {
    lanes.copy_from_slice(inputs);
    for c in comparators {
        let a = lanes[c.lo()];
        let b = lanes[c.hi()];
        lanes[c.lo()] = a & b;
        lanes[c.hi()] = a | b;
    }

    for p in 1..size {
        // A 1 followed by a 0 in any input.
        let bad = lanes[p - 1] & !lanes[p];
        if bad != 0 {
            let bit = bad.trailing_zeros();
            let input = inputs
                .iter()
                .enumerate()
                .fold(0_u64, |acc, (q, lane)| acc | (((lane >> bit) & 1) << q));
            return Err(Rejection::ZeroOneFailure { size, input });
        }
    }
    Ok(())
}

/// Runs `sorter` on random permutations and fixed edge cases of `size`
/// values and compares each result with a reference sort.
///
/// Returns the number of inputs checked.
pub fn check_sorter<F>(
    size: usize,
    label: &'static str,
    mut sorter: F,
    config: &VerifyConfig,
) -> Result<usize, Rejection>
where
    F: FnMut(&mut [f64]),
{
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(size as u64));
    let mut cases = 0usize;

    for (case, input) in edge_cases(size) {
        check_case(size, label, &mut sorter, &input, case, true)?;
        cases += 1;
    }

    let mut ranks: Vec<f64> = (0..size).map(|i| i as f64).collect();
    for round in 0..config.permutations {
        let input: Vec<f64> = if round % 2 == 0 {
            ranks.shuffle(&mut rng);
            ranks.clone()
        } else {
            (0..size).map(|_| rng.random_range(-1.0e3..1.0e3)).collect()
        };
        check_case(size, label, &mut sorter, &input, "random", false)?;
        cases += 1;
    }

    Ok(cases)
}

fn check_case<F>(
    size: usize,
    label: &'static str,
    sorter: &mut F,
    input: &[f64],
    case: &str,
    check_multiset: bool,
) -> Result<(), Rejection>
where
    F: FnMut(&mut [f64]),
{
    let mut actual = input.to_vec();
    sorter(&mut actual);

    let mut expected = input.to_vec();
    expected.sort_unstable_by(f64::total_cmp);

    if actual != expected || check_multiset {
        if !common::same_multiset(&actual, input) {
            return Err(Rejection::NotPermutation {
                size,
                strategy: label,
                case: case.to_string(),
            });
        }
        if actual != expected {
            return Err(Rejection::Mismatch {
                size,
                strategy: label,
                case: case.to_string(),
                actual,
                expected,
            });
        }
    }
    Ok(())
}

fn edge_cases(size: usize) -> Vec<(&'static str, Vec<f64>)> {
    let n = size as f64;
    vec![
        ("sorted", (0..size).map(|i| i as f64).collect()),
        ("reverse", (0..size).rev().map(|i| i as f64).collect()),
        ("all_equal", vec![7.25; size]),
        (
            "alternating",
            (0..size)
                .map(|i| if i % 2 == 0 { n + i as f64 } else { -(i as f64) })
                .collect(),
        ),
        ("few_distinct", (0..size).map(|i| ((i * 7) % 3) as f64).collect()),
        (
            "organ_pipe",
            (0..size).map(|i| i.min(size - 1 - i) as f64).collect(),
        ),
        (
            "specials",
            (0..size)
                .map(|i| match i % 5 {
                    0 => -0.0,
                    1 => 0.0,
                    2 => f64::INFINITY,
                    3 => f64::NEG_INFINITY,
                    _ => f64::MIN_POSITIVE * i as f64,
                })
                .collect(),
        ),
    ]
}

/// Full admission of a comparator list: index check, zero-one check, then
/// randomized comparison. The list is only executed through bounds-checked
/// indexing, so malformed candidates are rejected rather than trusted.
pub fn admit_comparators(
    size: usize,
    comparators: &[Comparator],
    config: &VerifyConfig,
) -> Result<Admission, Rejection> {
    let result = admit_comparators_inner(size, comparators, config);
    log_verdict(size, "network", &result);
    result
}

fn admit_comparators_inner(
    size: usize,
    comparators: &[Comparator],
    config: &VerifyConfig,
) -> Result<Admission, Rejection> {
    check_indices(size, comparators)?;
    let binary = check_zero_one(size, comparators, config)?;
    let random = check_sorter(
        size,
        "network",
        |v| {
            for c in comparators {
                if v[c.hi()] < v[c.lo()] {
                    v.swap(c.lo(), c.hi());
                }
            }
        },
        config,
    )?;
    Ok(Admission {
        size,
        strategy: "network",
        cases: binary + random,
    })
}

pub fn admit_network(network: &Network, config: &VerifyConfig) -> Result<Admission, Rejection> {
    let size = network.size();
    let result = admit_comparators_inner(size, network.comparators(), config).and_then(|reference| {
        // The production executor as well as the reference one above.
        let cases = check_sorter(size, "network", |v| network.apply(v), config)?;
        Ok(Admission {
            cases: reference.cases + cases,
            ..reference
        })
    });
    log_verdict(size, network.generator().label(), &result);
    result
}

/// Checks the table entry for `size` and the dispatcher's behavior there.
pub fn admit_strategy(
    dispatcher: &Dispatcher,
    size: usize,
    config: &VerifyConfig,
) -> Result<Admission, Rejection> {
    let strategy = dispatcher.strategy(size);
    let result = admit_strategy_inner(dispatcher, strategy, size, config);
    log_verdict(size, strategy.label(), &result);
    result
}

fn admit_strategy_inner(
    dispatcher: &Dispatcher,
    strategy: Strategy,
    size: usize,
    config: &VerifyConfig,
) -> Result<Admission, Rejection> {
    let consistent = match strategy {
        Strategy::Noop => size <= 1,
        Strategy::Swap2 => size == 2,
        Strategy::Network(n) => n == size && CATALOG.get(n).is_some(),
        Strategy::Hybrid { scheme, .. } => scheme.len() == size,
        Strategy::Insertion | Strategy::Generic => size > 2,
    };
    if !consistent {
        return Err(Rejection::InconsistentEntry {
            size,
            entry: strategy,
        });
    }

    let mut cases = 0;
    if let Strategy::Network(n) = strategy {
        let network = CATALOG.get(n).ok_or(Rejection::InconsistentEntry {
            size,
            entry: strategy,
        })?;
        cases += admit_network(network, config)?.cases;
    }
    cases += check_sorter(size, strategy.label(), |v| dispatcher.sort_slice(v), config)?;

    Ok(Admission {
        size,
        strategy: strategy.label(),
        cases,
    })
}

/// Admits every entry of the table up to `hybrid_max`, then probes sizes
/// above it, which all resolve to the fallback sorts.
pub fn admit_dispatcher(
    dispatcher: &Dispatcher,
    config: &VerifyConfig,
) -> Result<Vec<Admission>, Rejection> {
    let dispatch = dispatcher.config();
    let mut sizes: Vec<usize> = (0..=dispatch.hybrid_max).collect();
    let mut probes = vec![
        dispatch.hybrid_max + 1,
        dispatch.insertion_threshold.saturating_sub(1),
        dispatch.insertion_threshold,
        2 * dispatch.hybrid_max + 1,
    ];
    probes.retain(|&n| n > dispatch.hybrid_max);
    probes.sort_unstable();
    probes.dedup();
    sizes.extend(probes);

    let admissions = sizes
        .into_iter()
        .map(|size| admit_strategy(dispatcher, size, config))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "dispatch table admitted: {} sizes, {} cases",
        admissions.len(),
        admissions.iter().map(|a| a.cases).sum::<usize>()
    );
    Ok(admissions)
}

fn log_verdict<T>(size: usize, label: &str, result: &Result<T, Rejection>) {
    match result {
        Ok(_) => debug!("admitted size={size} strategy={label}"),
        Err(rejection) => warn!("rejected size={size} strategy={label}: {rejection}"),
    }
}
