use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 300;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 600;
const RNG_SEED: u64 = 0x5EED_2026;

/// Windows generated per benchmark input set, cycled through while timing.
pub const WINDOWS_PER_SET: usize = 256;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowShape {
    /// Independent uniform pixel values.
    Noise,
    /// A smooth gradient with small noise, as in sky background.
    Gradient,
    /// Background plus a few bright outliers, as in cosmic-ray hits.
    Outliers,
}

impl WindowShape {
    pub const ALL: [WindowShape; 3] = [Self::Noise, Self::Gradient, Self::Outliers];

    pub fn label(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Gradient => "gradient",
            Self::Outliers => "outliers",
        }
    }
}

pub fn window_values<R: Rng + ?Sized>(rng: &mut R, shape: WindowShape, len: usize) -> Vec<f64> {
    match shape {
        WindowShape::Noise => (0..len).map(|_| rng.random_range(0.0..65_535.0)).collect(),
        WindowShape::Gradient => (0..len)
            .map(|i| 1_000.0 + i as f64 * 0.75 + rng.random_range(-2.0..2.0))
            .collect(),
        WindowShape::Outliers => (0..len)
            .map(|_| {
                if rng.random_ratio(1, 20) {
                    rng.random_range(30_000.0..65_535.0)
                } else {
                    rng.random_range(990.0..1_010.0)
                }
            })
            .collect(),
    }
}

/// `WINDOWS_PER_SET` windows of `len` values laid out back to back.
pub fn window_set(shape: WindowShape, len: usize) -> Vec<f64> {
    let mut rng = default_rng();
    let mut out = Vec::with_capacity(len * WINDOWS_PER_SET);
    for _ in 0..WINDOWS_PER_SET {
        out.extend(window_values(&mut rng, shape, len));
    }
    out
}
