use super::common;

/// Buffers up to this length merge through a stack array instead of a `Vec`.
pub const STACK_SCRATCH_LEN: usize = 128;

/// Insertion pass over the whole buffer. Correct for any input; sorted
/// blocks only shorten the shifts.
#[inline]
pub fn insertion_completion(data: &mut [f64]) {
    common::insertion_sort(data);
}

/// Merges the consecutive sorted runs `data[k * run_len..(k + 1) * run_len]`
/// (the last run may be shorter) into one sorted sequence.
///
/// Runs are merged pairwise, doubling the width each pass, so any number of
/// runs of any length is handled by the same loop.
pub fn kway_merge(data: &mut [f64], run_len: usize) {
    assert!(run_len > 0, "run length must be positive");
    let len = data.len();
    if len < 2 || run_len >= len || common::is_sorted_non_decreasing(data) {
        return;
    }

    if len <= STACK_SCRATCH_LEN {
        let mut scratch = [0.0_f64; STACK_SCRATCH_LEN];
        merge_runs(data, &mut scratch[..len], run_len);
    } else {
        let mut scratch = vec![0.0_f64; len];
        merge_runs(data, &mut scratch, run_len);
    }
}

fn merge_runs(data: &mut [f64], buf: &mut [f64], run_len: usize) {
    let len = data.len();
    debug_assert_eq!(buf.len(), len);

    let mut width = run_len;
    let mut src_is_data = true;
    while width < len {
        if src_is_data {
            merge_pass(data, buf, width);
        } else {
            merge_pass(buf, data, width);
        }
        src_is_data = !src_is_data;
        width = width.saturating_mul(2);
    }

    if !src_is_data {
        common::copy_f64_slice(data, buf);
    }
}

fn merge_pass(src: &[f64], dst: &mut [f64], width: usize) {
    let len = src.len();
    let mut left = 0usize;
    while left < len {
        let mid = (left + width).min(len);
        let right = (mid + width).min(len);

        if mid >= right || src[mid - 1] <= src[mid] {
            common::copy_f64_slice(&mut dst[left..right], &src[left..right]);
        } else {
            common::merge_ranges(src, dst, left, mid, right);
        }

        left = right;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn sorted_runs(rng: &mut StdRng, len: usize, run_len: usize) -> Vec<f64> {
        let mut data: Vec<f64> = (0..len).map(|_| rng.random_range(-100.0..100.0)).collect();
        for run in data.chunks_mut(run_len) {
            run.sort_unstable_by(f64::total_cmp);
        }
        data
    }

    #[test]
    fn merges_any_run_count() {
        let mut rng = StdRng::seed_from_u64(0x3E46_E000);
        for run_len in [1_usize, 2, 5, 17, 25, 32] {
            for runs in 1..=9 {
                for tail in [0_usize, 1, run_len / 2] {
                    let len = run_len * runs + tail.min(run_len - 1);
                    let mut data = sorted_runs(&mut rng, len, run_len);
                    let mut expected = data.clone();
                    expected.sort_unstable_by(f64::total_cmp);
                    kway_merge(&mut data, run_len);
                    assert_eq!(data, expected, "run_len={run_len} runs={runs} len={len}");
                }
            }
        }
    }

    #[test]
    fn three_runs_with_interleaved_values() {
        // Three 9-element runs whose values interleave across all runs.
        let mut data: Vec<f64> = Vec::with_capacity(27);
        for offset in 0..3 {
            data.extend((0..9).map(|i| (i * 3 + offset) as f64));
        }
        kway_merge(&mut data, 9);
        let expected: Vec<f64> = (0..27).map(|i| i as f64).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn heap_scratch_above_stack_limit() {
        let mut rng = StdRng::seed_from_u64(0x4EA9);
        let len = STACK_SCRATCH_LEN * 3 + 7;
        let mut data = sorted_runs(&mut rng, len, 32);
        let mut expected = data.clone();
        expected.sort_unstable_by(f64::total_cmp);
        kway_merge(&mut data, 32);
        assert_eq!(data, expected);
    }

    #[test]
    fn degenerate_inputs_are_untouched() {
        let mut empty: Vec<f64> = Vec::new();
        kway_merge(&mut empty, 4);
        assert!(empty.is_empty());

        let mut single_run = vec![3.0, 1.0, 2.0];
        kway_merge(&mut single_run, 3);
        assert_eq!(single_run, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn insertion_completion_ignores_pre_sorting_quality() {
        let mut data = vec![9.0, 8.0, 7.0, 1.0, 2.0, 3.0, 6.0, 5.0, 4.0, 0.0];
        insertion_completion(&mut data);
        let expected: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(data, expected);
    }
}
