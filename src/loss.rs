//! Loss used to report training progress.
//!
//! `train` itself does not consume a loss value: its update rule is written directly in
//! terms of `target - output`. These helpers only measure how well a network fits.

/// Mean squared error, `mean((pred - target)^2)`.
///
/// Panics if the slices differ in length.
#[inline]
pub fn mse(pred: &[f32], target: &[f32]) -> f32 {
    assert_eq!(
        pred.len(),
        target.len(),
        "pred len {} does not match target len {}",
        pred.len(),
        target.len()
    );

    if pred.is_empty() {
        return 0.0;
    }

    let mut sum_sq = 0.0_f32;
    for (p, t) in pred.iter().zip(target) {
        let diff = p - t;
        sum_sq = diff.mul_add(diff, sum_sq);
    }
    sum_sq / pred.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_is_zero_when_equal() {
        assert_eq!(mse(&[0.1, -0.4], &[0.1, -0.4]), 0.0);
    }

    #[test]
    fn mse_averages_squared_differences() {
        // (1^2 + 3^2) / 2
        assert_eq!(mse(&[1.0, 0.0], &[0.0, 3.0]), 5.0);
    }

    #[test]
    #[should_panic]
    fn mse_panics_on_len_mismatch() {
        mse(&[1.0], &[1.0, 2.0]);
    }
}
