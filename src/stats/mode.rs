// Half-sample mode estimation
//
// Repeatedly narrows sorted data to the densest window of floor(n/2)+1
// consecutive values until one, two or three values remain.

use super::order::midpoint;

/// Estimate the mode of sorted data
///
/// Returns `None` for empty input. The window search keeps the first
/// minimal-span window it finds (strict `<`), so among equally narrow
/// windows the earliest one wins.
pub fn half_sample_mode(sorted: &[i64]) -> Option<i64> {
    let mut lo = 0;
    let mut n = sorted.len();

    loop {
        match n {
            0 => return None,
            1 => return Some(sorted[lo]),
            2 => return Some(midpoint(sorted[lo], sorted[lo + 1])),
            3 => {
                let (a, b, c) = (sorted[lo], sorted[lo + 1], sorted[lo + 2]);
                return if b - a <= c - b {
                    Some(midpoint(a, b))
                } else {
                    Some(midpoint(b, c))
                };
            }
            _ => {
                let h = n / 2;
                let mut best = lo;
                let mut best_span = sorted[lo + h] - sorted[lo];
                for start in lo + 1..=lo + n - (h + 1) {
                    let span = sorted[start + h] - sorted[start];
                    if span < best_span {
                        best = start;
                        best_span = span;
                    }
                }
                lo = best;
                n = h + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(half_sample_mode(&[]), None);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(half_sample_mode(&[17]), Some(17));
    }

    #[test]
    fn test_two_values_average() {
        assert_eq!(half_sample_mode(&[10, 20]), Some(15));
    }

    #[test]
    fn test_three_values_closer_pair() {
        assert_eq!(half_sample_mode(&[1, 10, 12]), Some(11));
        assert_eq!(half_sample_mode(&[1, 3, 12]), Some(2));
    }

    #[test]
    fn test_three_values_tie_favors_lower_pair() {
        assert_eq!(half_sample_mode(&[0, 10, 20]), Some(5));
    }

    #[test]
    fn test_dense_cluster_wins() {
        let data = [1, 50, 100, 101, 102, 103, 104, 500, 1000];
        let mode = half_sample_mode(&data).unwrap();
        assert!((100..=104).contains(&mode), "mode = {}", mode);
    }

    #[test]
    fn test_four_values_reduce_to_three() {
        // h = 2, windows of 3: [0,1,2] span 2, [1,2,10] span 9
        assert_eq!(half_sample_mode(&[0, 1, 2, 10]), Some(0));
    }

    #[test]
    fn test_tied_windows_keep_earliest() {
        // Both windows of 3 span 2; the first one is kept
        let data = [0, 1, 2, 3];
        assert_eq!(half_sample_mode(&data), Some(0));
    }

    #[test]
    fn test_constant_data() {
        assert_eq!(half_sample_mode(&[7; 33]), Some(7));
    }

    #[test]
    fn test_mode_within_bounds() {
        let data: Vec<i64> = (0..100).map(|i| i * i).collect();
        let mode = half_sample_mode(&data).unwrap();
        assert!(mode >= data[0] && mode <= data[99]);
    }
}
