// Order statistics over sorted measurements
//
// Sorting always happens on a side array of indices so the sample store
// itself is never reordered.

/// Indices of `items` sorted by an extracted key
///
/// The sort is stable, so equal keys keep their original relative order.
pub fn sort_indices_by_key<T, K, F>(items: &[T], key: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by_key(|&i| key(&items[i]));
    indices
}

/// Middle value of sorted data, averaging the two middle values for even counts
pub fn median(sorted: &[i64]) -> Option<i64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some(midpoint(sorted[n / 2 - 1], sorted[n / 2]))
    }
}

/// Nearest-rank percentile of sorted data
///
/// A percentile `p` needs at least `ceil(100 / (100 - p))` samples; with
/// fewer the value is unavailable. Otherwise the element at index
/// `count - floor(count / required)` is taken, without interpolation.
pub fn percentile(p: u32, sorted: &[i64]) -> Option<i64> {
    if p >= 100 {
        return None;
    }
    let span = (100 - p) as usize;
    let required = 100_usize.div_ceil(span);
    let count = sorted.len();
    if count < required {
        return None;
    }
    sorted.get(count - count / required).copied()
}

/// Integer mean of two values, rounded toward the lower one
pub(crate) fn midpoint(a: i64, b: i64) -> i64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo + (hi - lo) / 2
}
