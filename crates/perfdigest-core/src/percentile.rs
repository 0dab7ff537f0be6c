// Dweve PerfDigest - Benchmark Result Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Nearest-rank percentile estimation.
//!
//! The estimator never interpolates: the returned value is always one of the
//! samples, so `min <= p95 <= p99 <= max` holds for every group and reruns on
//! the same data are bit-for-bit reproducible.
//!
//! # Rounding
//!
//! The rank is `round((n - 1) * pct)` using [`f64::round`], i.e. halves round
//! away from zero. The operand is never negative, so this is round-half-up:
//! for three samples `pct = 0.25` gives rank `0.5`, which selects index `1`.

/// Computes the nearest-rank percentile of `values`.
///
/// Returns `0.0` for an empty slice. `pct` is a fraction in `[0, 1]`; values
/// outside that range are clamped.
///
/// # Examples
///
/// ```
/// use perfdigest_core::percentile::percentile;
///
/// assert_eq!(percentile(&[30.0, 10.0, 20.0], 0.5), 20.0);
/// assert_eq!(percentile(&[], 0.95), 0.0);
/// ```
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, pct)
}

/// Same as [`percentile`] for a slice already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 1.0) };
    let last = sorted.len() - 1;
    let index = ((last as f64) * pct).round() as usize;
    sorted[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(percentile(&[], 0.0), 0.0);
        assert_eq!(percentile(&[], 0.95), 0.0);
        assert_eq!(percentile(&[], 1.0), 0.0);
    }

    #[test]
    fn test_single_sample() {
        assert_eq!(percentile(&[42.0], 0.0), 42.0);
        assert_eq!(percentile(&[42.0], 0.99), 42.0);
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let values = [5.0, 1.0, 9.0, 3.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 1.0), 9.0);
    }

    #[test]
    fn test_two_samples_p95_is_upper() {
        // (2 - 1) * 0.95 = 0.95 -> index 1
        assert_eq!(percentile(&[10.0, 20.0], 0.95), 20.0);
        assert_eq!(percentile(&[10.0, 20.0], 0.99), 20.0);
    }

    #[test]
    fn test_half_rounds_up() {
        // (3 - 1) * 0.25 = 0.5 -> index 1
        assert_eq!(percentile(&[1.0, 2.0, 3.0], 0.25), 2.0);
        // (3 - 1) * 0.75 = 1.5 -> index 2
        assert_eq!(percentile(&[1.0, 2.0, 3.0], 0.75), 3.0);
        // (5 - 1) * 0.625 = 2.5 -> index 3
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.625), 4.0);
    }

    #[test]
    fn test_hundred_samples() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        // 99 * 0.95 = 94.05 -> index 94
        assert_eq!(percentile(&values, 0.95), 95.0);
        // 99 * 0.99 = 98.01 -> index 98
        assert_eq!(percentile(&values, 0.99), 99.0);
    }

    #[test]
    fn test_out_of_range_pct_is_clamped() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(percentile(&values, -0.5), 1.0);
        assert_eq!(percentile(&values, 1.5), 3.0);
        assert_eq!(percentile(&values, f64::NAN), 1.0);
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = [3.0, 1.0, 2.0, 5.0, 4.0];
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(percentile(&a, 0.95), percentile(&b, 0.95));
    }
}
