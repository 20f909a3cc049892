use std::ptr;

/// Compare-exchange of `v[lo]` and `v[hi]`: afterwards `v[lo] <= v[hi]`.
///
/// The pair is swapped only when `v[hi] < v[lo]`, so unordered values (NaN)
/// are left where they are and the slice stays a permutation of its input.
///
/// # Safety
///
/// `lo` and `hi` must both be in bounds for `v`.
#[inline(always)]
pub unsafe fn cswap_unchecked<T: Copy + PartialOrd>(v: &mut [T], lo: usize, hi: usize) {
    debug_assert!(lo < hi);
    debug_assert!(hi < v.len());

    unsafe {
        let base = v.as_mut_ptr();
        let pa = base.add(lo);
        let pb = base.add(hi);
        let a = *pa;
        let b = *pb;
        let swap = b < a;
        *pa = if swap { b } else { a };
        *pb = if swap { a } else { b };
    }
}

#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn insertion_sort(data: &mut [f64]) {
    let len = data.len();
    if len < 2 {
        return;
    }

    for i in 1..len {
        let key = data[i];
        let mut j = i;
        // Hot loop: unchecked accesses remove repeated bounds checks.
        unsafe {
            while j > 0 {
                let prev = *data.get_unchecked(j - 1);
                if !(prev > key) {
                    break;
                }
                *data.get_unchecked_mut(j) = prev;
                j -= 1;
            }
            *data.get_unchecked_mut(j) = key;
        }
    }
}

#[inline]
pub fn generic_sort(data: &mut [f64]) {
    data.sort_unstable_by(f64::total_cmp);
}

#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn is_sorted_non_decreasing(data: &[f64]) -> bool {
    data.windows(2).all(|w| !(w[1] < w[0]))
}

/// Multiset equality on bit patterns, so `-0.0`/`0.0` and NaN payloads count.
pub fn same_multiset(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut x: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
    let mut y: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
    x.sort_unstable();
    y.sort_unstable();
    x == y
}

/// Merges `src[left..mid]` and `src[mid..right]` into `dst[left..right]`.
///
/// Takes from the left run on ties and whenever the right value does not
/// compare below the left one.
#[inline]
pub fn merge_ranges(src: &[f64], dst: &mut [f64], left: usize, mid: usize, right: usize) {
    let mut i = left;
    let mut j = mid;
    let mut k = left;

    while i < mid && j < right {
        if src[j] < src[i] {
            dst[k] = src[j];
            j += 1;
        } else {
            dst[k] = src[i];
            i += 1;
        }
        k += 1;
    }

    if i < mid {
        copy_f64_slice(&mut dst[k..(k + (mid - i))], &src[i..mid]);
    } else if j < right {
        copy_f64_slice(&mut dst[k..(k + (right - j))], &src[j..right]);
    }
}

#[inline]
pub fn copy_f64_slice(dst: &mut [f64], src: &[f64]) {
    debug_assert_eq!(dst.len(), src.len());
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_mut_ptr(), dst.len());
    }
}
