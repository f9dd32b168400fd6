//! Differencing and re-integration of series.

/// Applies first differences `d` times. Each pass shortens the series by one;
/// the result is empty once `d >= data.len()`.
pub fn difference(data: &[f64], d: usize) -> Vec<f64> {
    let mut out = data.to_vec();
    for _ in 0..d {
        if out.len() < 2 {
            return Vec::new();
        }
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Last value of each differencing level `0..d` of `data`.
///
/// `tails[k]` is the final element of the `k`-times differenced series.
/// These anchor the cumulative sums that undo differencing in
/// [`integrate`].
pub(crate) fn tails(data: &[f64], d: usize) -> Vec<f64> {
    let mut tails = Vec::with_capacity(d);
    let mut level = data.to_vec();
    for _ in 0..d {
        match level.last() {
            Some(&last) => tails.push(last),
            None => break,
        }
        level = difference(&level, 1);
    }
    tails
}

/// Undoes `tails.len()` differences of a forecast path.
///
/// `forecast` lives on the most-differenced scale; each level is restored by
/// a cumulative sum anchored at that level's last observed value.
pub(crate) fn integrate(forecast: &[f64], tails: &[f64]) -> Vec<f64> {
    let mut path = forecast.to_vec();
    for &anchor in tails.iter().rev() {
        let mut prev = anchor;
        for x in path.iter_mut() {
            prev += *x;
            *x = prev;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn difference_zero_is_identity() {
        assert_eq!(difference(&[1.0, 3.0, 6.0], 0), vec![1.0, 3.0, 6.0]);
    }

    #[test]
    fn difference_once_and_twice() {
        let data = [1.0, 3.0, 6.0, 10.0];
        assert_eq!(difference(&data, 1), vec![2.0, 3.0, 4.0]);
        assert_eq!(difference(&data, 2), vec![1.0, 1.0]);
    }

    #[test]
    fn difference_too_short() {
        assert!(difference(&[1.0], 1).is_empty());
        assert!(difference(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn tails_per_level() {
        let data = [1.0, 3.0, 6.0, 10.0];
        assert_eq!(tails(&data, 2), vec![10.0, 4.0]);
        assert!(tails(&data, 0).is_empty());
    }

    #[test]
    fn integrate_d1_continues_level() {
        let out = integrate(&[1.0, 1.0, 1.0], &[10.0]);
        assert_eq!(out, vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn integrate_d2_continues_quadratic() {
        // 1, 3, 6, 10 has second differences of 1; continue with 15, 21.
        let data = [1.0, 3.0, 6.0, 10.0];
        let out = integrate(&[1.0, 1.0], &tails(&data, 2));
        assert_abs_diff_eq!(out[0], 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 21.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_without_tails_is_identity() {
        assert_eq!(integrate(&[0.5, 0.25], &[]), vec![0.5, 0.25]);
    }
}
