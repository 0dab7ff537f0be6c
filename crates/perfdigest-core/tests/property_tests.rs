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

//! Property-based tests for aggregation using proptest.
//!
//! - Percentile bounds: p0 is the minimum, p100 the maximum
//! - Nearest rank: every percentile is one of the samples
//! - Ordering: min <= p95 <= p99 <= max for every group
//! - Cross-check: single-metric components equal their metric
//! - Comparison: exactly the key intersection, zero deltas on self-comparison

use perfdigest_core::{
    aggregate, compare_to_baseline, percentile, BaselineDocument, MeasurementRecord,
    ReportDocument,
};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::TempDir;

// ===== Generators =====

/// Finite, non-negative durations in milliseconds.
fn duration() -> impl Strategy<Value = f64> {
    (0u32..1_000_000u32).prop_map(|v| f64::from(v) / 100.0)
}

fn samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(duration(), 1..200)
}

fn component() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["db", "ui", "net", "shell"]).prop_map(str::to_string)
}

fn op_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["read", "write", "paint", "launch"]).prop_map(str::to_string)
}

fn record() -> impl Strategy<Value = MeasurementRecord> {
    (component(), op_name(), duration())
        .prop_map(|(component, name, ms)| MeasurementRecord::new(component, name, ms))
}

fn records() -> impl Strategy<Value = Vec<MeasurementRecord>> {
    prop::collection::vec(record(), 1..120)
}

// ===== Percentile Properties =====

proptest! {
    #[test]
    fn prop_percentile_bounds(values in samples()) {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(percentile(&values, 0.0), min);
        prop_assert_eq!(percentile(&values, 1.0), max);
    }

    #[test]
    fn prop_percentile_is_a_sample(values in samples(), pct in 0.0f64..=1.0) {
        let p = percentile(&values, pct);
        prop_assert!(values.contains(&p));
    }

    #[test]
    fn prop_percentile_empty_is_zero(pct in 0.0f64..=1.0) {
        prop_assert_eq!(percentile(&[], pct), 0.0);
    }

    #[test]
    fn prop_percentile_monotonic(values in samples(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(percentile(&values, lo) <= percentile(&values, hi));
    }
}

// ===== Aggregation Properties =====

proptest! {
    #[test]
    fn prop_stats_ordering(records in records()) {
        let agg = aggregate(&records);
        for (_, stats) in agg.metrics.iter().chain(agg.components.iter()) {
            prop_assert!(stats.count >= 1);
            prop_assert!(stats.min_ms <= stats.p95_ms);
            prop_assert!(stats.p95_ms <= stats.p99_ms);
            prop_assert!(stats.p99_ms <= stats.max_ms);
            prop_assert!(stats.min_ms <= stats.avg_ms + 1e-9);
            prop_assert!(stats.avg_ms <= stats.max_ms + 1e-9);
        }
    }

    #[test]
    fn prop_counts_add_up(records in records()) {
        let agg = aggregate(&records);
        let metric_total: usize = agg.metrics.iter().map(|(_, s)| s.count).sum();
        let component_total: usize = agg.components.iter().map(|(_, s)| s.count).sum();
        prop_assert_eq!(metric_total, records.len());
        prop_assert_eq!(component_total, records.len());
    }

    #[test]
    fn prop_single_metric_component_matches(name in op_name(), values in samples()) {
        let records: Vec<MeasurementRecord> = values
            .iter()
            .map(|&ms| MeasurementRecord::new("solo", name.clone(), ms))
            .collect();
        let agg = aggregate(&records);
        let key = format!("solo.{}", name);
        prop_assert_eq!(agg.components.get("solo"), agg.metrics.get(&key));
    }

    #[test]
    fn prop_comparison_covers_intersection(current in records(), previous in records()) {
        let current_agg = aggregate(&current);
        let previous_agg = aggregate(&previous);
        let baseline = BaselineDocument::from_table(&previous_agg.metrics);

        let comparisons = compare_to_baseline(&current_agg.metrics, &baseline);
        let compared: HashSet<&str> = comparisons.iter().map(|c| c.metric.as_str()).collect();
        let expected: HashSet<&str> = current_agg
            .metrics
            .keys()
            .filter(|k| previous_agg.metrics.contains_key(k))
            .collect();

        prop_assert_eq!(compared.len(), comparisons.len());
        prop_assert_eq!(compared, expected);
    }

    #[test]
    fn prop_zero_baseline_gives_zero_pct(current in records()) {
        let agg = aggregate(&current);
        let mut baseline = BaselineDocument::from_table(&agg.metrics);
        for stats in baseline.metrics.values_mut() {
            stats.avg_ms = 0.0;
            stats.p95_ms = 0.0;
        }

        for entry in compare_to_baseline(&agg.metrics, &baseline) {
            prop_assert_eq!(entry.avg_delta_pct, 0.0);
            prop_assert_eq!(entry.p95_delta_pct, 0.0);
        }
    }
}

// ===== Round Trip =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_self_comparison_is_zero(records in records()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let agg = aggregate(&records);
        ReportDocument::assemble(&agg, None, None).write(&path).unwrap();

        let baseline = perfdigest_core::load_baseline(&path).unwrap().unwrap();
        let comparisons = compare_to_baseline(&agg.metrics, &baseline);

        prop_assert_eq!(comparisons.len(), agg.metrics.len());
        for entry in comparisons {
            prop_assert_eq!(entry.avg_delta_ms, 0.0);
            prop_assert_eq!(entry.p95_delta_ms, 0.0);
        }
    }
}
